use log::debug;

use crate::violation::{SourceKind, Violation};

/// Collapses violations that share a summons number, keeping the position
/// of the first occurrence.
///
/// When the record already collected came only from open parking and camera
/// endpoints, the incoming record's defined fields win; otherwise the
/// collected record's fields win.
pub fn merge_violations(violations: Vec<Violation>) -> Vec<Violation> {
    let mut merged: Vec<Violation> = Vec::with_capacity(violations.len());

    for incoming in violations {
        let existing = merged
            .iter()
            .position(|v| v.summons_number == incoming.summons_number);

        match existing {
            None => merged.push(incoming),
            Some(index) => {
                debug!("Merging duplicate summons {}", incoming.summons_number);
                let accumulated = std::mem::take(&mut merged[index]);
                merged[index] = if accumulated.is_only_from(SourceKind::OpenParkingAndCamera) {
                    incoming.overlay(accumulated)
                } else {
                    accumulated.overlay(incoming)
                };
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::violation::DataSource;

    fn violation(summons: &str, source: DataSource) -> Violation {
        Violation {
            summons_number: summons.to_string(),
            from_databases: vec![source],
            ..Default::default()
        }
    }

    fn opacv() -> DataSource {
        DataSource::open_parking_and_camera("opacv")
    }

    fn fiscal(year: &str) -> DataSource {
        DataSource::fiscal_year(format!("fy{year}"))
    }

    #[test]
    fn test_distinct_summons_are_kept_in_order() {
        let input = vec![
            violation("3", opacv()),
            violation("1", fiscal("2023")),
            violation("2", opacv()),
        ];
        let merged = merge_violations(input.clone());
        assert_eq!(merged, input);
    }

    #[test]
    fn test_fiscal_year_street_survives_open_parking_record() {
        let open_parking = Violation {
            street_name: None,
            paid: Some(65.0),
            ..violation("1", opacv())
        };
        let fiscal_year = Violation {
            street_name: Some("Broadway".to_string()),
            ..violation("1", fiscal("2023"))
        };

        let merged = merge_violations(vec![open_parking, fiscal_year]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].street_name.as_deref(), Some("Broadway"));
        assert_eq!(merged[0].paid, Some(65.0));
        assert_eq!(merged[0].from_databases, vec![fiscal("2023"), opacv()]);
    }

    #[test]
    fn test_accumulated_fiscal_year_record_wins() {
        let fiscal_year = Violation {
            violation_precinct: Some("19".to_string()),
            ..violation("1", fiscal("2023"))
        };
        let open_parking = Violation {
            violation_precinct: Some("000".to_string()),
            outstanding: Some(0.0),
            ..violation("1", opacv())
        };

        let merged = merge_violations(vec![fiscal_year, open_parking]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].violation_precinct.as_deref(), Some("19"));
        assert_eq!(merged[0].outstanding, Some(0.0));
        assert_eq!(merged[0].from_databases, vec![fiscal("2023"), opacv()]);
    }

    #[test]
    fn test_first_seen_position_is_kept() {
        let merged = merge_violations(vec![
            violation("1", opacv()),
            violation("2", opacv()),
            violation("1", fiscal("2022")),
        ]);
        let order: Vec<&str> = merged.iter().map(|v| v.summons_number.as_str()).collect();
        assert_eq!(order, ["1", "2"]);
    }

    #[test]
    fn test_three_way_merge_chain() {
        let merged = merge_violations(vec![
            violation("1", opacv()),
            violation("1", fiscal("2022")),
            violation("1", fiscal("2023")),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(
            merged[0].from_databases,
            vec![fiscal("2022"), opacv(), fiscal("2023")]
        );
    }

    #[test]
    fn test_merge_is_idempotent() {
        let once = merge_violations(vec![
            violation("1", opacv()),
            violation("2", fiscal("2023")),
            violation("1", fiscal("2023")),
            violation("2", opacv()),
        ]);
        let twice = merge_violations(once.clone());
        assert_eq!(once, twice);
    }
}
