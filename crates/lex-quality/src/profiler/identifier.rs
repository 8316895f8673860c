//! Identifier column detection.

use crate::policy::{ID_NAME_MIN_UNIQUE_RATIO, NEAR_UNIQUE_RATIO};
use crate::types::ColumnProfile;
use once_cell::sync::Lazy;
use regex::Regex;

// Identifier name patterns - compiled once at startup
static ID_NAME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)^(id|uuid|guid|key)$").expect("Invalid regex: bare identifier"),
        Regex::new(r"(?i)[_\-\s](id|uuid|guid)$").expect("Invalid regex: identifier suffix"),
        Regex::new(r"(?i)^(id|uuid|guid)[_\-\s]").expect("Invalid regex: identifier prefix"),
        Regex::new(r"^[a-z][a-zA-Z0-9]*(Id|ID)$").expect("Invalid regex: camelCase identifier"),
    ]
});

/// Whether a column name reads like an identifier (`id`, `user_id`, `orderId`, ...).
pub fn is_identifier_name(name: &str) -> bool {
    let name = name.trim();
    ID_NAME_PATTERNS.iter().any(|pattern| pattern.is_match(name))
}

/// Whether a profiled column behaves like an identifier.
///
/// Near-unique columns qualify on their own. Identifier-named columns
/// qualify unless most of their values repeat.
pub fn is_identifier_like(profile: &ColumnProfile) -> bool {
    if profile.non_null == 0 {
        return false;
    }

    let ratio = profile.uniqueness_ratio();
    ratio > NEAR_UNIQUE_RATIO || (is_identifier_name(&profile.name) && ratio >= ID_NAME_MIN_UNIQUE_RATIO)
}

/// An identifier-like column that still holds duplicate values.
pub fn is_suspicious_identifier(profile: &ColumnProfile) -> bool {
    is_identifier_like(profile) && profile.has_duplicates()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColumnKind;

    fn profile(name: &str, non_null: usize, unique: usize) -> ColumnProfile {
        ColumnProfile {
            name: name.to_string(),
            dtype: "Int64".to_string(),
            kind: ColumnKind::Numeric,
            is_numeric: true,
            non_null,
            missing: 0,
            missing_share: 0.0,
            unique,
            min: None,
            max: None,
            mean: None,
            std: None,
            example_values: Vec::new(),
        }
    }

    #[test]
    fn test_identifier_names() {
        for name in ["id", "ID", "user_id", "client_id", "order-id", "uuid", "id_user", "customerId", "rowID"] {
            assert!(is_identifier_name(name), "{} should look like an identifier", name);
        }
    }

    #[test]
    fn test_non_identifier_names() {
        for name in ["idea", "valid", "paid", "width", "amount", "Identity", "video"] {
            assert!(!is_identifier_name(name), "{} should not look like an identifier", name);
        }
    }

    #[test]
    fn test_named_identifier_with_duplicates_is_suspicious() {
        // user_id = [1, 1, 3, 4]
        assert!(is_suspicious_identifier(&profile("user_id", 4, 3)));
    }

    #[test]
    fn test_unique_identifier_is_not_suspicious() {
        assert!(!is_suspicious_identifier(&profile("id", 4, 4)));
    }

    #[test]
    fn test_foreign_key_is_not_suspicious() {
        // category_id with heavy repetition is a foreign key, not a broken identifier
        assert!(!is_suspicious_identifier(&profile("category_id", 100, 5)));
    }

    #[test]
    fn test_near_unique_column_without_id_name() {
        assert!(is_suspicious_identifier(&profile("reference", 1000, 997)));
        assert!(!is_suspicious_identifier(&profile("reference", 1000, 900)));
    }

    #[test]
    fn test_all_missing_column_is_not_identifier() {
        assert!(!is_identifier_like(&profile("id", 0, 0)));
    }
}
