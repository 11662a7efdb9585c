use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    OpenParkingAndCamera,
    FiscalYear,
}

/// An upstream dataset. Serializes as its endpoint, which is what
/// `from_databases` names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataSource {
    pub endpoint: String,
    pub kind: SourceKind,
}

impl DataSource {
    pub fn open_parking_and_camera(endpoint: impl Into<String>) -> Self {
        DataSource {
            endpoint: endpoint.into(),
            kind: SourceKind::OpenParkingAndCamera,
        }
    }

    pub fn fiscal_year(endpoint: impl Into<String>) -> Self {
        DataSource {
            endpoint: endpoint.into(),
            kind: SourceKind::FiscalYear,
        }
    }
}

impl Serialize for DataSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.endpoint)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Borough {
    Bronx,
    Brooklyn,
    Manhattan,
    Queens,
    StatenIsland,
    #[default]
    NoBoroughAvailable,
}

impl fmt::Display for Borough {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Borough::Bronx => "Bronx",
            Borough::Brooklyn => "Brooklyn",
            Borough::Manhattan => "Manhattan",
            Borough::Queens => "Queens",
            Borough::StatenIsland => "Staten Island",
            Borough::NoBoroughAvailable => "No Borough Available",
        };
        f.write_str(name)
    }
}

impl Serialize for Borough {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Humanized violation descriptions. `Other` carries upstream descriptions
/// that have no dedicated variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViolationType {
    BusLaneViolation,
    FailureToStopAtRedLight,
    SchoolZoneSpeedCameraViolation,
    NoStandingDayTimeLimits,
    NoStandingBusStop,
    NoParkingDayTimeLimits,
    NoParkingStreetCleaning,
    NoStandingCommercialMeterZone,
    ExpiredMeter,
    FailureToDisplayMeterReceipt,
    FireHydrant,
    DoubleParking,
    BikeLane,
    InspectionSticker,
    RegistrationSticker,
    ObstructingDriveway,
    Other(String),
}

impl ViolationType {
    pub const NO_DESCRIPTION: &'static str = "No Violation Description Available";

    pub fn description(&self) -> &str {
        match self {
            ViolationType::BusLaneViolation => "Bus Lane Violation",
            ViolationType::FailureToStopAtRedLight => "Failure to Stop at Red Light",
            ViolationType::SchoolZoneSpeedCameraViolation => "School Zone Speed Camera Violation",
            ViolationType::NoStandingDayTimeLimits => "No Standing - Day/Time Limits",
            ViolationType::NoStandingBusStop => "No Standing - Bus Stop",
            ViolationType::NoParkingDayTimeLimits => "No Parking - Day/Time Limits",
            ViolationType::NoParkingStreetCleaning => "No Parking - Street Cleaning",
            ViolationType::NoStandingCommercialMeterZone => "No Standing - Commercial Meter Zone",
            ViolationType::ExpiredMeter => "Expired Meter",
            ViolationType::FailureToDisplayMeterReceipt => "Failure to Display Meter Receipt",
            ViolationType::FireHydrant => "Fire Hydrant",
            ViolationType::DoubleParking => "Double Parking",
            ViolationType::BikeLane => "Blocking Bike Lane",
            ViolationType::InspectionSticker => "Inspection Sticker Expired or Missing",
            ViolationType::RegistrationSticker => "Registration Sticker Expired or Missing",
            ViolationType::ObstructingDriveway => "Obstructing Driveway",
            ViolationType::Other(description) => description,
        }
    }
}

impl fmt::Display for ViolationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl Serialize for ViolationType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.description())
    }
}

/// A normalized violation. `summons_number` identifies the physical ticket.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub summons_number: String,
    pub plate: String,
    pub registration_state: Option<String>,
    pub plate_type: Option<String>,
    pub issue_date: Option<String>,
    pub violation_time: Option<String>,
    pub formatted_time_eastern: Option<DateTime<Tz>>,
    pub formatted_time_utc: Option<DateTime<Utc>>,
    pub violation_code: Option<String>,
    pub humanized_description: Option<ViolationType>,
    pub violation_county: Borough,
    pub violation_precinct: Option<String>,
    pub issuing_agency: Option<String>,
    pub location: Option<String>,
    pub house_number: Option<String>,
    pub street_name: Option<String>,
    pub intersecting_street: Option<String>,
    pub vehicle_body_type: Option<String>,
    pub vehicle_make: Option<String>,
    pub vehicle_color: Option<String>,
    pub vehicle_year: Option<String>,
    pub violation_status: Option<String>,
    pub judgment_entry_date: Option<String>,
    pub fined: Option<f64>,
    pub paid: Option<f64>,
    pub reduced: Option<f64>,
    pub outstanding: Option<f64>,
    pub summons_image_url: Option<String>,
    pub from_databases: Vec<DataSource>,
}

impl Violation {
    /// True when every contributing endpoint is of `kind`.
    pub fn is_only_from(&self, kind: SourceKind) -> bool {
        !self.from_databases.is_empty() && self.from_databases.iter().all(|d| d.kind == kind)
    }

    /// Fills every undefined field of `self` from `fallback`. Endpoint lists
    /// are concatenated with `self`'s first.
    pub fn overlay(self, fallback: Violation) -> Violation {
        let mut from_databases = self.from_databases;
        from_databases.extend(fallback.from_databases);

        let violation_county = match self.violation_county {
            Borough::NoBoroughAvailable => fallback.violation_county,
            county => county,
        };

        Violation {
            summons_number: self.summons_number,
            plate: self.plate,
            registration_state: self.registration_state.or(fallback.registration_state),
            plate_type: self.plate_type.or(fallback.plate_type),
            issue_date: self.issue_date.or(fallback.issue_date),
            violation_time: self.violation_time.or(fallback.violation_time),
            formatted_time_eastern: self
                .formatted_time_eastern
                .or(fallback.formatted_time_eastern),
            formatted_time_utc: self.formatted_time_utc.or(fallback.formatted_time_utc),
            violation_code: self.violation_code.or(fallback.violation_code),
            humanized_description: self
                .humanized_description
                .or(fallback.humanized_description),
            violation_county,
            violation_precinct: self.violation_precinct.or(fallback.violation_precinct),
            issuing_agency: self.issuing_agency.or(fallback.issuing_agency),
            location: self.location.or(fallback.location),
            house_number: self.house_number.or(fallback.house_number),
            street_name: self.street_name.or(fallback.street_name),
            intersecting_street: self.intersecting_street.or(fallback.intersecting_street),
            vehicle_body_type: self.vehicle_body_type.or(fallback.vehicle_body_type),
            vehicle_make: self.vehicle_make.or(fallback.vehicle_make),
            vehicle_color: self.vehicle_color.or(fallback.vehicle_color),
            vehicle_year: self.vehicle_year.or(fallback.vehicle_year),
            violation_status: self.violation_status.or(fallback.violation_status),
            judgment_entry_date: self.judgment_entry_date.or(fallback.judgment_entry_date),
            fined: self.fined.or(fallback.fined),
            paid: self.paid.or(fallback.paid),
            reduced: self.reduced.or(fallback.reduced),
            outstanding: self.outstanding.or(fallback.outstanding),
            summons_image_url: self.summons_image_url.or(fallback.summons_image_url),
            from_databases,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_prefers_defined_fields() {
        let winner = Violation {
            summons_number: "1".to_string(),
            street_name: None,
            fined: Some(50.0),
            from_databases: vec![DataSource::fiscal_year("fy2023")],
            ..Default::default()
        };
        let fallback = Violation {
            summons_number: "1".to_string(),
            street_name: Some("Broadway".to_string()),
            fined: Some(65.0),
            violation_county: Borough::Queens,
            from_databases: vec![DataSource::open_parking_and_camera("opacv")],
            ..Default::default()
        };

        let merged = winner.overlay(fallback);
        assert_eq!(merged.street_name.as_deref(), Some("Broadway"));
        assert_eq!(merged.fined, Some(50.0));
        assert_eq!(merged.violation_county, Borough::Queens);
        assert_eq!(
            merged.from_databases,
            vec![
                DataSource::fiscal_year("fy2023"),
                DataSource::open_parking_and_camera("opacv")
            ]
        );
    }

    #[test]
    fn test_is_only_from() {
        let mut violation = Violation {
            from_databases: vec![DataSource::open_parking_and_camera("opacv")],
            ..Default::default()
        };
        assert!(violation.is_only_from(SourceKind::OpenParkingAndCamera));

        violation.from_databases.push(DataSource::fiscal_year("fy2023"));
        assert!(!violation.is_only_from(SourceKind::OpenParkingAndCamera));
    }

    #[test]
    fn test_from_databases_serializes_as_endpoints() {
        let violation = Violation {
            summons_number: "1".to_string(),
            from_databases: vec![
                DataSource::fiscal_year("fy2023"),
                DataSource::open_parking_and_camera("opacv"),
            ],
            ..Default::default()
        };
        let json = serde_json::to_value(&violation).unwrap();
        assert_eq!(json["fromDatabases"], serde_json::json!(["fy2023", "opacv"]));
        assert_eq!(json["violationCounty"], "No Borough Available");
    }

    #[test]
    fn test_display_strings() {
        assert_eq!(Borough::StatenIsland.to_string(), "Staten Island");
        assert_eq!(
            ViolationType::FailureToStopAtRedLight.to_string(),
            "Failure to Stop at Red Light"
        );
        assert_eq!(ViolationType::Other("Idling".to_string()).to_string(), "Idling");
    }
}
