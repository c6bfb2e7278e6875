use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

use crate::error::{EmployeeError, EmployeeResult};

/// Canonical hyphenated UUID: 8-4-4-4-12 hex digits, any case
static CANONICAL_UUID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("canonical UUID pattern is valid")
});

/// Validate an employee id and parse it.
///
/// Only the canonical hyphenated form is accepted. Braced, URN and simple
/// (unhyphenated) forms that `Uuid::parse_str` would tolerate are rejected.
pub fn parse_employee_id(raw: &str) -> EmployeeResult<Uuid> {
    if !CANONICAL_UUID.is_match(raw) {
        return Err(EmployeeError::InvalidId(raw.to_string()));
    }

    Uuid::parse_str(raw).map_err(|_| EmployeeError::InvalidId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_canonical_uuids_in_any_case() {
        for raw in [
            "5255f1a5-f9f7-4be5-829a-134bde088d17",
            "5255F1A5-F9F7-4BE5-829A-134BDE088D17",
            "00000000-0000-0000-0000-000000000000",
        ] {
            let id = parse_employee_id(raw).unwrap();
            assert_eq!(id.to_string(), raw.to_lowercase());
        }
    }

    #[test]
    fn test_rejects_wrong_length() {
        for raw in [
            "",
            "5255f1a5-f9f7-4be5-829a-134bde088d1",
            "5255f1a5-f9f7-4be5-829a-134bde088d170",
        ] {
            assert!(matches!(
                parse_employee_id(raw),
                Err(EmployeeError::InvalidId(_))
            ));
        }
    }

    #[test]
    fn test_rejects_misplaced_hyphens() {
        for raw in [
            "5255f1a5f-9f7-4be5-829a-134bde088d17",
            "5255f1a5-f9f74-be5-829a-134bde088d17",
            "5255f1a5f9f74be5829a134bde088d17",
            "{5255f1a5-f9f7-4be5-829a-134bde088d17}",
            "urn:uuid:5255f1a5-f9f7-4be5-829a-134bde088d17",
        ] {
            assert!(parse_employee_id(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn test_rejects_non_hex_characters() {
        let err = parse_employee_id("5255f1a5-f9f7-4be5-829a-134bde088zzz").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid UUID format: 5255f1a5-f9f7-4be5-829a-134bde088zzz"
        );
        assert!(parse_employee_id(" 5255f1a5-f9f7-4be5-829a-134bde088d17").is_err());
    }
}
