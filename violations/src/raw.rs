use serde::Deserialize;

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct SummonsImage {
    pub url: Option<String>,
    pub description: Option<String>,
}

/// A row of the open parking and camera violations dataset.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct OpenParkingAndCameraRecord {
    pub summons_number: String,
    pub plate: String,
    pub issue_date: String,
    pub violation_time: String,
    pub state: Option<String>,
    pub license_type: Option<String>,
    pub violation: Option<String>,
    pub judgment_entry_date: Option<String>,
    pub fine_amount: Option<String>,
    pub penalty_amount: Option<String>,
    pub interest_amount: Option<String>,
    pub reduction_amount: Option<String>,
    pub payment_amount: Option<String>,
    pub amount_due: Option<String>,
    pub precinct: Option<String>,
    pub county: Option<String>,
    pub issuing_agency: Option<String>,
    pub violation_status: Option<String>,
    pub summons_image: Option<SummonsImage>,
}

/// A row of one of the per fiscal year parking violation datasets.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct FiscalYearRecord {
    pub summons_number: String,
    pub plate_id: String,
    pub issue_date: String,
    pub violation_time: String,
    pub registration_state: Option<String>,
    pub plate_type: Option<String>,
    pub violation_code: Option<String>,
    pub violation_description: Option<String>,
    pub vehicle_body_type: Option<String>,
    pub vehicle_make: Option<String>,
    pub vehicle_color: Option<String>,
    pub vehicle_year: Option<String>,
    pub vehicle_expiration_date: Option<String>,
    pub issuing_agency: Option<String>,
    pub violation_county: Option<String>,
    pub violation_precinct: Option<String>,
    pub issuer_precinct: Option<String>,
    pub house_number: Option<String>,
    pub street_name: Option<String>,
    pub intersecting_street: Option<String>,
    pub violation_location: Option<String>,
    pub law_section: Option<String>,
    pub sub_division: Option<String>,
    pub date_first_observed: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawViolation {
    OpenParkingAndCamera(OpenParkingAndCameraRecord),
    FiscalYear(FiscalYearRecord),
}

impl RawViolation {
    pub fn summons_number(&self) -> &str {
        match self {
            RawViolation::OpenParkingAndCamera(r) => &r.summons_number,
            RawViolation::FiscalYear(r) => &r.summons_number,
        }
    }

    pub fn plate(&self) -> &str {
        match self {
            RawViolation::OpenParkingAndCamera(r) => &r.plate,
            RawViolation::FiscalYear(r) => &r.plate_id,
        }
    }

    pub fn state(&self) -> Option<&str> {
        match self {
            RawViolation::OpenParkingAndCamera(r) => r.state.as_deref(),
            RawViolation::FiscalYear(r) => r.registration_state.as_deref(),
        }
    }

    pub fn plate_type(&self) -> Option<&str> {
        match self {
            RawViolation::OpenParkingAndCamera(r) => r.license_type.as_deref(),
            RawViolation::FiscalYear(r) => r.plate_type.as_deref(),
        }
    }

    pub fn issue_date(&self) -> &str {
        match self {
            RawViolation::OpenParkingAndCamera(r) => &r.issue_date,
            RawViolation::FiscalYear(r) => &r.issue_date,
        }
    }

    pub fn violation_time(&self) -> &str {
        match self {
            RawViolation::OpenParkingAndCamera(r) => &r.violation_time,
            RawViolation::FiscalYear(r) => &r.violation_time,
        }
    }

    pub fn house_number(&self) -> Option<&str> {
        match self {
            RawViolation::OpenParkingAndCamera(_) => None,
            RawViolation::FiscalYear(r) => r.house_number.as_deref(),
        }
    }

    pub fn street_name(&self) -> Option<&str> {
        match self {
            RawViolation::OpenParkingAndCamera(_) => None,
            RawViolation::FiscalYear(r) => r.street_name.as_deref(),
        }
    }

    pub fn intersecting_street(&self) -> Option<&str> {
        match self {
            RawViolation::OpenParkingAndCamera(_) => None,
            RawViolation::FiscalYear(r) => r.intersecting_street.as_deref(),
        }
    }

    /// Returns a copy with both street columns passed through `expand`.
    pub fn map_streets<F>(&self, expand: F) -> RawViolation
    where
        F: Fn(&str) -> String,
    {
        match self {
            RawViolation::OpenParkingAndCamera(_) => self.clone(),
            RawViolation::FiscalYear(r) => RawViolation::FiscalYear(FiscalYearRecord {
                street_name: r.street_name.as_deref().map(&expand),
                intersecting_street: r.intersecting_street.as_deref().map(&expand),
                ..r.clone()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_open_parking_record() {
        let json = r#"{
            "plate": "ABC1234",
            "state": "NY",
            "license_type": "PAS",
            "summons_number": "4715634490",
            "issue_date": "03/14/2023",
            "violation_time": "09:32A",
            "violation": "PHTO SCHOOL ZN SPEED VIOLATION",
            "fine_amount": "50",
            "amount_due": "0",
            "county": "QN",
            "summons_image": { "url": "http://example.com/img", "description": "View Summons" }
        }"#;
        let record: OpenParkingAndCameraRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.summons_number, "4715634490");
        assert_eq!(record.fine_amount.as_deref(), Some("50"));
        assert_eq!(record.penalty_amount, None);
        assert_eq!(
            record.summons_image.and_then(|i| i.url).as_deref(),
            Some("http://example.com/img")
        );
    }

    #[test]
    fn test_missing_mandatory_field_fails() {
        let json = r#"{ "plate_id": "ABC1234", "issue_date": "03/14/2023", "violation_time": "0932A" }"#;
        assert!(serde_json::from_str::<FiscalYearRecord>(json).is_err());
    }

    #[test]
    fn test_accessors_cover_both_sources() {
        let fiscal = RawViolation::FiscalYear(FiscalYearRecord {
            summons_number: "1".to_string(),
            plate_id: "ABC1234".to_string(),
            registration_state: Some("NY".to_string()),
            street_name: Some("BROADWAY".to_string()),
            ..Default::default()
        });
        assert_eq!(fiscal.plate(), "ABC1234");
        assert_eq!(fiscal.state(), Some("NY"));
        assert_eq!(fiscal.street_name(), Some("BROADWAY"));

        let open = RawViolation::OpenParkingAndCamera(OpenParkingAndCameraRecord {
            summons_number: "1".to_string(),
            plate: "ABC1234".to_string(),
            ..Default::default()
        });
        assert_eq!(open.street_name(), None);
        assert_eq!(open.house_number(), None);
    }

    #[test]
    fn test_map_streets() {
        let fiscal = RawViolation::FiscalYear(FiscalYearRecord {
            street_name: Some("5 AVE".to_string()),
            intersecting_street: None,
            ..Default::default()
        });
        let mapped = fiscal.map_streets(|s| s.replace("AVE", "AVENUE"));
        assert_eq!(mapped.street_name(), Some("5 AVENUE"));
        assert_eq!(mapped.intersecting_street(), None);
    }
}
