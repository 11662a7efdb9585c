use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::violation::{Violation, ViolationType};

pub const NO_YEAR: &str = "No Year Available";

/// Violation counts by borough, violation type and Eastern calendar year.
/// Keys that never occur are absent.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyData {
    pub boroughs: BTreeMap<String, usize>,
    pub violation_types: BTreeMap<String, usize>,
    pub years: BTreeMap<String, usize>,
}

pub fn aggregate_frequency(violations: &[Violation]) -> FrequencyData {
    let mut frequency = FrequencyData::default();

    for violation in violations {
        *frequency
            .boroughs
            .entry(violation.violation_county.to_string())
            .or_default() += 1;

        let description = violation
            .humanized_description
            .as_ref()
            .map(ViolationType::description)
            .unwrap_or(ViolationType::NO_DESCRIPTION);
        *frequency
            .violation_types
            .entry(description.to_string())
            .or_default() += 1;

        let year = violation
            .formatted_time_eastern
            .as_ref()
            .map(|t| t.year().to_string())
            .unwrap_or_else(|| NO_YEAR.to_string());
        *frequency.years.entry(year).or_default() += 1;
    }

    frequency
}
