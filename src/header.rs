//! Splits composite headers such as `vitesse.km.h` into a logical name and a
//! measurement unit.

/// Unit tokens recognised as the start of a header's unit suffix.
pub const UNIT_VOCABULARY: &[&str] = &[
    "t", "kg", "g", "mg", "km", "hm", "dam", "m", "dm", "cm", "mm", "co2e",
];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderParts {
    pub name_parts: Vec<String>,
    pub unit_parts: Vec<String>,
}

impl HeaderParts {
    pub fn logical_name(&self) -> String {
        self.name_parts.join(" ")
    }
}

pub fn is_unit_token(segment: &str) -> bool {
    UNIT_VOCABULARY.contains(&segment)
}

/// Everything from the first unit token onwards is the unit; this never fails.
pub fn decompose_header(raw: &str) -> HeaderParts {
    let segments = raw.split('.').map(str::to_string).collect::<Vec<_>>();
    let split_at = segments
        .iter()
        .position(|segment| is_unit_token(segment))
        .unwrap_or(segments.len());
    let mut name_parts = segments;
    let unit_parts = name_parts.split_off(split_at);
    HeaderParts {
        name_parts,
        unit_parts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parts(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn single_unit_suffix() {
        let header = decompose_header("distance.km");
        assert_eq!(header.name_parts, parts(&["distance"]));
        assert_eq!(header.unit_parts, parts(&["km"]));
    }

    #[test]
    fn unit_suffix_keeps_trailing_segments() {
        let header = decompose_header("vitesse.km.h");
        assert_eq!(header.name_parts, parts(&["vitesse"]));
        assert_eq!(header.unit_parts, parts(&["km", "h"]));
    }

    #[test]
    fn header_without_unit() {
        let header = decompose_header("total.amount");
        assert_eq!(header.name_parts, parts(&["total", "amount"]));
        assert!(header.unit_parts.is_empty());
        assert_eq!(header.logical_name(), "total amount");
    }

    #[test]
    fn leading_unit_leaves_empty_name() {
        let header = decompose_header("kg.total");
        assert!(header.name_parts.is_empty());
        assert_eq!(header.unit_parts, parts(&["kg", "total"]));
        assert_eq!(header.logical_name(), "");
    }

    #[test]
    fn unit_match_is_case_sensitive() {
        let header = decompose_header("mass.KG");
        assert_eq!(header.name_parts, parts(&["mass", "KG"]));
        assert!(header.unit_parts.is_empty());
    }

    #[test]
    fn empty_header_is_one_empty_segment() {
        let header = decompose_header("");
        assert_eq!(header.name_parts, parts(&[""]));
        assert!(header.unit_parts.is_empty());
    }

    proptest! {
        #[test]
        fn decomposition_reconstructs_segments(raw in "[a-z0-9.]{0,24}") {
            let header = decompose_header(&raw);
            let mut rebuilt = header.name_parts.clone();
            rebuilt.extend(header.unit_parts.clone());
            let expected = raw.split('.').map(str::to_string).collect::<Vec<_>>();
            prop_assert_eq!(rebuilt, expected);
            prop_assert!(header.name_parts.iter().all(|segment| !is_unit_token(segment)));
        }
    }
}
