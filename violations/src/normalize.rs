use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::America::New_York;
use chrono_tz::Tz;
use log::{debug, warn};

use crate::address::{normalize_address_with, title_case};
use crate::lookups::Lookups;
use crate::raw::{FiscalYearRecord, OpenParkingAndCameraRecord, RawViolation};
use crate::violation::{DataSource, Violation};

/// Turns a raw record from `source` into a `Violation`. Unparseable values
/// become `None`; nothing here fails.
pub fn normalize_violation(
    raw: &RawViolation,
    source: &DataSource,
    lookups: &dyn Lookups,
) -> Violation {
    let formatted_time_eastern = issue_timestamp(raw.issue_date(), raw.violation_time());
    if formatted_time_eastern.is_none() {
        warn!(
            "Summons {} has an unparseable issue date {:?}",
            raw.summons_number(),
            raw.issue_date()
        );
    }

    let formatted_time_utc = formatted_time_eastern
        .as_ref()
        .map(|t| t.with_timezone(&Utc));

    let base = Violation {
        summons_number: raw.summons_number().trim().to_string(),
        plate: raw.plate().trim().to_uppercase(),
        registration_state: non_empty(raw.state()),
        plate_type: non_empty(raw.plate_type()),
        issue_date: non_empty(Some(raw.issue_date())),
        violation_time: non_empty(Some(raw.violation_time())),
        formatted_time_eastern,
        formatted_time_utc,
        from_databases: vec![source.clone()],
        ..Default::default()
    };

    let violation = match raw {
        RawViolation::OpenParkingAndCamera(record) => {
            normalize_open_parking_and_camera(base, record, lookups)
        }
        RawViolation::FiscalYear(record) => normalize_fiscal_year(base, raw, record, lookups),
    };
    debug!(
        "Normalized summons {} from {}",
        violation.summons_number, source.endpoint
    );
    violation
}

fn normalize_open_parking_and_camera(
    base: Violation,
    record: &OpenParkingAndCameraRecord,
    lookups: &dyn Lookups,
) -> Violation {
    let fine = parse_amount(record.fine_amount.as_deref());
    let penalty = parse_amount(record.penalty_amount.as_deref());
    let interest = parse_amount(record.interest_amount.as_deref());
    let fined = match (fine, penalty, interest) {
        (None, None, None) => None,
        _ => Some(fine.unwrap_or(0.0) + penalty.unwrap_or(0.0) + interest.unwrap_or(0.0)),
    };

    Violation {
        humanized_description: lookups.violation_type(None, record.violation.as_deref()),
        violation_county: record
            .county
            .as_deref()
            .map(|c| lookups.borough(c))
            .unwrap_or_default(),
        violation_precinct: non_empty(record.precinct.as_deref()),
        issuing_agency: record
            .issuing_agency
            .as_deref()
            .and_then(|a| lookups.issuing_agency(a)),
        violation_status: record
            .violation_status
            .as_deref()
            .and_then(|s| lookups.violation_status(s)),
        judgment_entry_date: non_empty(record.judgment_entry_date.as_deref()),
        fined,
        paid: parse_amount(record.payment_amount.as_deref()),
        reduced: parse_amount(record.reduction_amount.as_deref()),
        outstanding: parse_amount(record.amount_due.as_deref()),
        summons_image_url: record
            .summons_image
            .as_ref()
            .and_then(|image| non_empty(image.url.as_deref())),
        ..base
    }
}

fn normalize_fiscal_year(
    base: Violation,
    raw: &RawViolation,
    record: &FiscalYearRecord,
    lookups: &dyn Lookups,
) -> Violation {
    let expanded = raw.map_streets(|street| lookups.expand_street(street));

    Violation {
        violation_code: non_empty(record.violation_code.as_deref()),
        humanized_description: lookups.violation_type(
            record.violation_code.as_deref(),
            record.violation_description.as_deref(),
        ),
        violation_county: record
            .violation_county
            .as_deref()
            .map(|c| lookups.borough(c))
            .unwrap_or_default(),
        violation_precinct: non_empty(record.violation_precinct.as_deref()),
        issuing_agency: record
            .issuing_agency
            .as_deref()
            .and_then(|a| lookups.issuing_agency(a)),
        location: normalize_address_with(raw, |street| lookups.expand_street(street)),
        house_number: non_empty(record.house_number.as_deref()),
        street_name: non_empty(expanded.street_name()).map(|s| title_case(&s)),
        intersecting_street: non_empty(expanded.intersecting_street()).map(|s| title_case(&s)),
        vehicle_body_type: record
            .vehicle_body_type
            .as_deref()
            .and_then(|b| lookups.body_type(b)),
        vehicle_make: non_empty(record.vehicle_make.as_deref()),
        vehicle_color: non_empty(record.vehicle_color.as_deref()),
        vehicle_year: non_empty(record.vehicle_year.as_deref()).filter(|y| y != "0"),
        ..base
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_amount(value: Option<&str>) -> Option<f64> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    match value.parse::<f64>() {
        Ok(amount) => Some(amount),
        Err(e) => {
            warn!("Ignoring unparseable amount {:?}: {}", value, e);
            None
        }
    }
}

/// Combines an issue date with a violation time in New York local time.
/// A missing or unreadable time means midnight.
pub fn issue_timestamp(issue_date: &str, violation_time: &str) -> Option<DateTime<Tz>> {
    let date = parse_issue_date(issue_date)?;
    let time = parse_violation_time(violation_time).unwrap_or_default();
    eastern_from_local(NaiveDateTime::new(date, time))
}

/// Resolves a New York wall-clock time. Ambiguous fall-back times take the
/// earlier instant; times inside the spring-forward gap move an hour later.
pub(crate) fn eastern_from_local(local: NaiveDateTime) -> Option<DateTime<Tz>> {
    New_York
        .from_local_datetime(&local)
        .earliest()
        .or_else(|| New_York.from_local_datetime(&(local + Duration::hours(1))).earliest())
}

fn parse_issue_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%m/%d/%Y") {
        return Some(date);
    }
    value
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Reads "0932A", "09:32P" or a 24 hour "2132".
fn parse_violation_time(value: &str) -> Option<NaiveTime> {
    let cleaned: String = value
        .trim()
        .to_uppercase()
        .chars()
        .filter(|c| *c != ':')
        .collect();
    let (digits, meridiem) = match cleaned.chars().last()? {
        'A' | 'P' => cleaned.split_at(cleaned.len() - 1),
        _ => (cleaned.as_str(), ""),
    };
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let mut hour: u32 = digits[..2].parse().ok()?;
    let minute: u32 = digits[2..].parse().ok()?;
    match meridiem {
        "A" if hour == 12 => hour = 0,
        "P" if hour < 12 => hour += 12,
        _ => {}
    }
    NaiveTime::from_hms_opt(hour, minute, 0)
}
