use chrono::{DateTime, Days, Duration, Months, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::normalize::eastern_from_local;
use crate::violation::{Violation, ViolationType};

/// The busiest one year window for one group of camera violations.
///
/// All four boundary fields are `None` exactly when `max_streak` is zero.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraStreakData {
    pub max_streak: usize,
    pub streak_start: Option<DateTime<Tz>>,
    pub streak_end: Option<DateTime<Tz>>,
    pub streak_start_utc: Option<DateTime<Utc>>,
    pub streak_end_utc: Option<DateTime<Utc>>,
    pub total: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraData {
    pub bus_lane_camera_violations: CameraStreakData,
    /// Red light and school zone speed cameras.
    pub camera_violations: CameraStreakData,
    pub camera_violations_with_bus_lane_camera_violations: CameraStreakData,
    pub red_light_camera_violations: CameraStreakData,
    pub school_zone_speed_camera_violations: CameraStreakData,
}

fn is_bus_lane(t: &ViolationType) -> bool {
    matches!(t, ViolationType::BusLaneViolation)
}

fn is_red_light(t: &ViolationType) -> bool {
    matches!(t, ViolationType::FailureToStopAtRedLight)
}

fn is_speed_camera(t: &ViolationType) -> bool {
    matches!(t, ViolationType::SchoolZoneSpeedCameraViolation)
}

pub fn aggregate_camera_streaks(violations: &[Violation]) -> CameraData {
    CameraData {
        bus_lane_camera_violations: streak_for(violations, is_bus_lane),
        camera_violations: streak_for(violations, |t| is_red_light(t) || is_speed_camera(t)),
        camera_violations_with_bus_lane_camera_violations: streak_for(violations, |t| {
            is_red_light(t) || is_speed_camera(t) || is_bus_lane(t)
        }),
        red_light_camera_violations: streak_for(violations, is_red_light),
        school_zone_speed_camera_violations: streak_for(violations, is_speed_camera),
    }
}

fn streak_for<F>(violations: &[Violation], in_group: F) -> CameraStreakData
where
    F: Fn(&ViolationType) -> bool,
{
    let group: Vec<&Violation> = violations
        .iter()
        .filter(|v| v.humanized_description.as_ref().is_some_and(&in_group))
        .collect();
    let timestamps: Vec<DateTime<Tz>> = group
        .iter()
        .filter_map(|v| v.formatted_time_eastern.clone())
        .collect();

    CameraStreakData {
        total: group.len(),
        ..max_streak(&timestamps)
    }
}

/// Exclusive end of the window opened at `start`: one calendar year less a
/// day later, counted on the New York wall clock.
fn window_end(start: &DateTime<Tz>) -> DateTime<Tz> {
    let local = start.naive_local();
    let end = local
        .checked_add_months(Months::new(12))
        .and_then(|t| t.checked_sub_days(Days::new(1)))
        .unwrap_or(local + Duration::days(364));
    eastern_from_local(end).unwrap_or_else(|| start.clone() + (end - local))
}

/// Opens a window at every timestamp in input order and keeps the first
/// window holding the most timestamps. The reported bounds are the earliest
/// and latest timestamps inside that window.
fn max_streak(timestamps: &[DateTime<Tz>]) -> CameraStreakData {
    let mut best = CameraStreakData::default();

    for start in timestamps {
        let end = window_end(start);
        let mut members = timestamps.iter().filter(|t| *t >= start && **t < end);

        let Some(first) = members.next() else {
            continue;
        };
        let (count, earliest, latest) =
            members.fold((1, first.clone(), first.clone()), |(n, lo, hi), t| {
                (n + 1, lo.min(t.clone()), hi.max(t.clone()))
            });

        if count > best.max_streak {
            best = CameraStreakData {
                max_streak: count,
                streak_start_utc: Some(earliest.with_timezone(&Utc)),
                streak_end_utc: Some(latest.with_timezone(&Utc)),
                streak_start: Some(earliest),
                streak_end: Some(latest),
                total: 0,
            };
        }
    }

    best
}
