use crate::address::title_case;
use crate::violation::{Borough, ViolationType};

/// Code tables consulted while normalizing raw records.
pub trait Lookups: Send + Sync {
    fn issuing_agency(&self, code: &str) -> Option<String>;

    fn body_type(&self, code: &str) -> Option<String>;

    fn violation_status(&self, status: &str) -> Option<String>;

    fn borough(&self, county: &str) -> Borough;

    /// Resolves a violation from its numeric code when there is one, and
    /// from the upstream description text otherwise.
    fn violation_type(
        &self,
        code: Option<&str>,
        description: Option<&str>,
    ) -> Option<ViolationType>;

    /// Expands street abbreviations and numeric ordinals, e.g. "W 72 ST"
    /// becomes "WEST 72ND STREET".
    fn expand_street(&self, street: &str) -> String;
}

/// The built-in tables. Covers the five boroughs, the camera violations and
/// the most frequently written parking codes.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicLookups;

impl Lookups for BasicLookups {
    fn issuing_agency(&self, code: &str) -> Option<String> {
        let code = code.trim().to_uppercase();
        let name = match code.as_str() {
            "" => return None,
            "P" => "Police Department",
            "T" => "Traffic",
            "S" => "Department of Sanitation",
            "K" => "Parks Department",
            "V" => "Department of Transportation",
            "X" => "Other/Unknown Agencies",
            other => return Some(title_case(other)),
        };
        Some(name.to_string())
    }

    fn body_type(&self, code: &str) -> Option<String> {
        let code = code.trim().to_uppercase();
        let name = match code.as_str() {
            "" => return None,
            "2DSD" => "Two-Door Sedan",
            "4DSD" | "SDN" => "Sedan",
            "SUBN" | "SUV" => "Suburban",
            "CONV" => "Convertible",
            "PICK" => "Pick-Up Truck",
            "DELV" => "Delivery Truck",
            "VAN" => "Van",
            "TAXI" => "Taxi",
            "BUS" => "Bus",
            "MCY" => "Motorcycle",
            "TRAC" => "Tractor",
            other => other,
        };
        Some(name.to_string())
    }

    fn violation_status(&self, status: &str) -> Option<String> {
        let status = status.trim().to_uppercase();
        let name = match status.as_str() {
            "" => return None,
            "HEARING HELD-GUILTY" => "Hearing Held - Guilty",
            "HEARING HELD-NOT GUILTY" => "Hearing Held - Not Guilty",
            "HEARING HELD-GUILTY REDUCTION" => "Hearing Held - Guilty Reduction",
            "HEARING HELD-REINSTATEMENT" => "Hearing Held - Reinstatement",
            "HEARING PENDING" => "Hearing Pending",
            "HEARING ADJOURNMENT" => "Hearing Adjournment",
            "APPEAL ABANDONED" => "Appeal Abandoned",
            "APPEAL AFFIRMED" => "Appeal Affirmed",
            "APPEAL REVERSED" => "Appeal Reversed",
            other => return Some(title_case(other)),
        };
        Some(name.to_string())
    }

    fn borough(&self, county: &str) -> Borough {
        match county.trim().to_uppercase().as_str() {
            "BX" | "BRONX" => Borough::Bronx,
            "BK" | "K" | "KINGS" => Borough::Brooklyn,
            "MN" | "NY" | "MAN" => Borough::Manhattan,
            "Q" | "QN" | "QNS" | "QUEEN" => Borough::Queens,
            "R" | "RICH" | "ST" => Borough::StatenIsland,
            _ => Borough::NoBoroughAvailable,
        }
    }

    fn violation_type(
        &self,
        code: Option<&str>,
        description: Option<&str>,
    ) -> Option<ViolationType> {
        if let Some(code) = code.and_then(|c| c.trim().parse::<u32>().ok())
            && let Some(known) = violation_type_for_code(code)
        {
            return Some(known);
        }

        let description = description?.trim().to_uppercase();
        if description.is_empty() {
            return None;
        }
        let known = match description.as_str() {
            "BUS LANE VIOLATION" => ViolationType::BusLaneViolation,
            "FAILURE TO STOP AT RED LIGHT" => ViolationType::FailureToStopAtRedLight,
            "PHTO SCHOOL ZN SPEED VIOLATION" | "SCHOOL ZONE SPEED CAMERA VIOLATION" => {
                ViolationType::SchoolZoneSpeedCameraViolation
            }
            "NO STANDING-DAY/TIME LIMITS" => ViolationType::NoStandingDayTimeLimits,
            "NO STANDING-BUS STOP" => ViolationType::NoStandingBusStop,
            "NO PARKING-DAY/TIME LIMITS" => ViolationType::NoParkingDayTimeLimits,
            "NO PARKING-STREET CLEANING" => ViolationType::NoParkingStreetCleaning,
            "NO STANDING-COMM METER ZONE" => ViolationType::NoStandingCommercialMeterZone,
            "EXPIRED METER" | "EXPIRED MUNI METER" => ViolationType::ExpiredMeter,
            "FAIL TO DSPLY MUNI METER RECPT" => ViolationType::FailureToDisplayMeterReceipt,
            "FIRE HYDRANT" => ViolationType::FireHydrant,
            "DOUBLE PARKING" => ViolationType::DoubleParking,
            "BIKE LANE" => ViolationType::BikeLane,
            "INSP. STICKER-EXPIRED/MISSING" => ViolationType::InspectionSticker,
            "REG. STICKER-EXPIRED/MISSING" => ViolationType::RegistrationSticker,
            "OBSTRUCTING DRIVEWAY" => ViolationType::ObstructingDriveway,
            other => ViolationType::Other(title_case(other)),
        };
        Some(known)
    }

    fn expand_street(&self, street: &str) -> String {
        let tokens: Vec<&str> = street.split_whitespace().collect();
        let last = tokens.len().saturating_sub(1);
        tokens
            .iter()
            .enumerate()
            .map(|(i, token)| expand_token(token, i == last))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn violation_type_for_code(code: u32) -> Option<ViolationType> {
    let known = match code {
        5 => ViolationType::BusLaneViolation,
        7 => ViolationType::FailureToStopAtRedLight,
        14 => ViolationType::NoStandingDayTimeLimits,
        19 => ViolationType::NoStandingBusStop,
        20 => ViolationType::NoParkingDayTimeLimits,
        21 => ViolationType::NoParkingStreetCleaning,
        31 => ViolationType::NoStandingCommercialMeterZone,
        36 => ViolationType::SchoolZoneSpeedCameraViolation,
        37 => ViolationType::ExpiredMeter,
        38 => ViolationType::FailureToDisplayMeterReceipt,
        40 => ViolationType::FireHydrant,
        46 => ViolationType::DoubleParking,
        48 => ViolationType::BikeLane,
        70 => ViolationType::RegistrationSticker,
        71 => ViolationType::InspectionSticker,
        98 => ViolationType::ObstructingDriveway,
        _ => return None,
    };
    Some(known)
}

fn expand_token(token: &str, is_last: bool) -> String {
    let upper = token.to_uppercase();
    let expanded = match upper.as_str() {
        "AVE" | "AV" => "AVENUE",
        "ST" if is_last => "STREET",
        "ST" => "SAINT",
        "BLVD" => "BOULEVARD",
        "PL" => "PLACE",
        "RD" => "ROAD",
        "DR" => "DRIVE",
        "PKWY" => "PARKWAY",
        "EXPY" | "EXWY" => "EXPRESSWAY",
        "HWY" => "HIGHWAY",
        "N" => "NORTH",
        "S" => "SOUTH",
        "E" => "EAST",
        "W" => "WEST",
        _ if !upper.is_empty() && upper.chars().all(|c| c.is_ascii_digit()) => {
            return ordinal(&upper);
        }
        _ => return upper,
    };
    expanded.to_string()
}

fn ordinal(digits: &str) -> String {
    let n: u64 = digits.parse().unwrap_or(0);
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "TH",
        (1, _) => "ST",
        (2, _) => "ND",
        (3, _) => "RD",
        _ => "TH",
    };
    format!("{digits}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_borough_codes() {
        let lookups = BasicLookups;
        assert_eq!(lookups.borough("K"), Borough::Brooklyn);
        assert_eq!(lookups.borough("qn"), Borough::Queens);
        assert_eq!(lookups.borough("NY"), Borough::Manhattan);
        assert_eq!(lookups.borough(""), Borough::NoBoroughAvailable);
    }

    #[test]
    fn test_violation_type_from_code_and_description() {
        let lookups = BasicLookups;
        assert_eq!(
            lookups.violation_type(Some("05"), None),
            Some(ViolationType::BusLaneViolation)
        );
        assert_eq!(
            lookups.violation_type(None, Some("PHTO SCHOOL ZN SPEED VIOLATION")),
            Some(ViolationType::SchoolZoneSpeedCameraViolation)
        );
        assert_eq!(
            lookups.violation_type(Some("99"), Some("IDLING")),
            Some(ViolationType::Other("Idling".to_string()))
        );
        assert_eq!(lookups.violation_type(None, Some("  ")), None);
        assert_eq!(lookups.violation_type(None, None), None);
    }

    #[test]
    fn test_expand_street() {
        let lookups = BasicLookups;
        assert_eq!(lookups.expand_street("W 72 ST"), "WEST 72ND STREET");
        assert_eq!(lookups.expand_street("ST NICHOLAS AVE"), "SAINT NICHOLAS AVENUE");
        assert_eq!(lookups.expand_street("E 111 ST"), "EAST 111TH STREET");
        assert_eq!(lookups.expand_street("BROADWAY"), "BROADWAY");
    }

    #[test]
    fn test_ordinals() {
        assert_eq!(ordinal("1"), "1ST");
        assert_eq!(ordinal("22"), "22ND");
        assert_eq!(ordinal("13"), "13TH");
        assert_eq!(ordinal("103"), "103RD");
    }

    #[test]
    fn test_agency_and_status() {
        let lookups = BasicLookups;
        assert_eq!(lookups.issuing_agency("P").as_deref(), Some("Police Department"));
        assert_eq!(
            lookups.issuing_agency("DEPARTMENT OF TRANSPORTATION").as_deref(),
            Some("Department Of Transportation")
        );
        assert_eq!(
            lookups.violation_status("HEARING HELD-GUILTY").as_deref(),
            Some("Hearing Held - Guilty")
        );
        assert_eq!(lookups.body_type("SUBN").as_deref(), Some("Suburban"));
        assert_eq!(lookups.body_type(" ").as_deref(), None);
    }
}
