use serde::Serialize;

use crate::violation::Violation;

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FineData {
    pub total_fined: f64,
    pub total_paid: f64,
    pub total_reduced: f64,
    pub total_outstanding: f64,
    /// Outstanding amounts on tickets that have a judgment entry date.
    pub total_in_judgment: f64,
}

impl FineData {
    pub fn are_fines_assessed(&self) -> bool {
        self.total_fined > 0.0
    }

    /// Largest of the fined/paid/reduced/outstanding totals. The judgment
    /// total is a subset of outstanding and is left out.
    pub fn max_amount(&self) -> f64 {
        [
            self.total_fined,
            self.total_paid,
            self.total_reduced,
            self.total_outstanding,
        ]
        .into_iter()
        .fold(0.0, f64::max)
    }
}

pub fn aggregate_fines(violations: &[Violation]) -> FineData {
    violations.iter().fold(FineData::default(), |mut totals, v| {
        totals.total_fined += v.fined.unwrap_or(0.0);
        totals.total_paid += v.paid.unwrap_or(0.0);
        totals.total_reduced += v.reduced.unwrap_or(0.0);
        totals.total_outstanding += v.outstanding.unwrap_or(0.0);
        if v.judgment_entry_date.is_some() {
            totals.total_in_judgment += v.outstanding.unwrap_or(0.0);
        }
        totals
    })
}
