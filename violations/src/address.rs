use crate::raw::RawViolation;

/// Width of the legacy street columns. Values that fill the column were cut
/// off mid-word upstream.
const FIELD_WIDTH: usize = 20;

/// Rebuilds a street address from the fixed-width house number and street
/// columns of a raw record. Returns `None` when there is no street name.
pub fn normalize_address(raw: &RawViolation) -> Option<String> {
    normalize_address_with(raw, str::to_string)
}

/// Like `normalize_address`, with `expand_street` applied to both street
/// columns. Column width and truncation are judged on the raw text, so an
/// expansion that grows past the column width is kept whole.
pub fn normalize_address_with<F>(raw: &RawViolation, expand_street: F) -> Option<String>
where
    F: Fn(&str) -> String,
{
    let street1 = raw.street_name()?;
    let parts = [
        raw.house_number().map(|house| (house, false)),
        Some((street1, true)),
        raw.intersecting_street().map(|street2| (street2, true)),
    ];

    let mut address = String::new();
    let mut previous_truncated = true;
    for (part, is_street) in parts.into_iter().flatten() {
        let part = truncate(part);
        if !address.is_empty() && !previous_truncated {
            address.push(' ');
        }
        previous_truncated = is_truncated(part);
        if is_street {
            address.push_str(expand_street(part.trim_end()).trim_end());
        } else {
            address.push_str(part.trim_end());
        }
    }

    Some(title_case(&address))
}

fn truncate(field: &str) -> &str {
    match field.char_indices().nth(FIELD_WIDTH) {
        Some((index, _)) => &field[..index],
        None => field,
    }
}

fn is_truncated(field: &str) -> bool {
    field.chars().count() == FIELD_WIDTH && !field.ends_with(' ')
}

/// Lowercases every space separated token and uppercases its first
/// character, so "72ND" becomes "72nd" and "I/O" becomes "I/o".
pub fn title_case(value: &str) -> String {
    value
        .split(' ')
        .map(|token| {
            let lower = token.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::FiscalYearRecord;

    fn record(house: Option<&str>, street1: Option<&str>, street2: Option<&str>) -> RawViolation {
        RawViolation::FiscalYear(FiscalYearRecord {
            summons_number: "1".to_string(),
            plate_id: "ABC1234".to_string(),
            issue_date: "2023-01-01T00:00:00.000".to_string(),
            house_number: house.map(str::to_string),
            street_name: street1.map(str::to_string),
            intersecting_street: street2.map(str::to_string),
            ..Default::default()
        })
    }

    #[test]
    fn test_missing_street_name() {
        assert_eq!(normalize_address(&record(Some("10"), None, Some("BROADWAY"))), None);
    }

    #[test]
    fn test_street_only() {
        assert_eq!(
            normalize_address(&record(None, Some("WEST 72ND STREET"), None)),
            Some("West 72nd Street".to_string())
        );
    }

    #[test]
    fn test_house_number_and_streets() {
        assert_eq!(
            normalize_address(&record(Some("123"), Some("BROADWAY"), Some("W 42ND ST"))),
            Some("123 Broadway W 42nd St".to_string())
        );
    }

    #[test]
    fn test_truncated_field_is_joined_directly() {
        // Exactly twenty characters: the next column continues the word
        let street1 = "BROOKLYN QUEENS EXPR";
        assert_eq!(street1.len(), 20);
        assert_eq!(
            normalize_address(&record(None, Some(street1), Some("ESSWAY"))),
            Some("Brooklyn Queens Expressway".to_string())
        );
    }

    #[test]
    fn test_full_width_field_ending_in_space_is_separated() {
        let street1 = "BROOKLYN QUEENS EXP ";
        assert_eq!(street1.len(), 20);
        assert_eq!(
            normalize_address(&record(None, Some(street1), Some("EXIT 3"))),
            Some("Brooklyn Queens Exp Exit 3".to_string())
        );
    }

    #[test]
    fn test_long_fields_are_cut_to_width() {
        assert_eq!(
            normalize_address(&record(None, Some("ABCDEFGHIJKLMNOPQRSTUVWXYZ"), None)),
            Some("Abcdefghijklmnopqrst".to_string())
        );
    }

    #[test]
    fn test_expanded_streets_keep_their_separators() {
        let expand = |street: &str| street.replace("ST NICHOLAS AVE", "SAINT NICHOLAS AVENUE");
        assert_eq!(
            normalize_address_with(
                &record(Some("100"), Some("ST NICHOLAS AVE"), Some("W 145 ST")),
                expand
            ),
            Some("100 Saint Nicholas Avenue W 145 St".to_string())
        );
    }

    #[test]
    fn test_expansion_does_not_hide_raw_truncation() {
        let street1 = "BROOKLYN QUEENS EXPR";
        assert_eq!(
            normalize_address_with(&record(None, Some(street1), Some("ESSWAY")), |s| {
                s.to_lowercase()
            }),
            Some("Brooklyn Queens Expressway".to_string())
        );
    }

    #[test]
    fn test_title_case_is_naive() {
        assert_eq!(title_case("I/O PLAZA 72ND"), "I/o Plaza 72nd");
    }
}
