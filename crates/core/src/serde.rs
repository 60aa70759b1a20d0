//! Serde helper functions for form-ish payloads.
//!
//! The booking UI submits empty strings for blank optional fields and
//! checkbox values in several spellings; these helpers normalize both.

use serde::{Deserialize, Deserializer};

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Text(String),
}

fn flag_value<E: serde::de::Error>(flag: Flag) -> Result<bool, E> {
    match flag {
        Flag::Bool(b) => Ok(b),
        Flag::Text(s) => match s.trim() {
            "1" | "true" | "on" => Ok(true),
            "" | "0" | "false" | "off" => Ok(false),
            other => Err(E::custom(format!("invalid flag value: {other}"))),
        },
    }
}

/// Deserialize a checkbox flag: accepts a real boolean or the string
/// spellings a form produces ("1", "0", "true", "false", "on", "").
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Flag>::deserialize(deserializer)? {
        None => Ok(false),
        Some(flag) => flag_value(flag),
    }
}

/// Like [`deserialize_flag`], but keeps an absent field as `None` so a
/// partial update can leave the stored value alone.
pub fn deserialize_optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Flag>::deserialize(deserializer)? {
        None => Ok(None),
        Some(flag) => flag_value(flag).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct TestStruct {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        notes: Option<String>,
        #[serde(default, deserialize_with = "deserialize_flag")]
        taxable: bool,
        #[serde(default, deserialize_with = "deserialize_optional_flag")]
        all_day: Option<bool>,
    }

    #[test]
    fn test_optional_string_empty_is_none() {
        let parsed: TestStruct = serde_json::from_str(r#"{"notes": ""}"#).unwrap();
        assert_eq!(parsed.notes, None);
    }

    #[test]
    fn test_optional_string_whitespace_is_none() {
        let parsed: TestStruct = serde_json::from_str(r#"{"notes": "   "}"#).unwrap();
        assert_eq!(parsed.notes, None);
    }

    #[test]
    fn test_optional_string_value_survives() {
        let parsed: TestStruct = serde_json::from_str(r#"{"notes": "bring treats"}"#).unwrap();
        assert_eq!(parsed.notes, Some("bring treats".to_string()));
    }

    #[test]
    fn test_flag_accepts_bool() {
        let parsed: TestStruct = serde_json::from_str(r#"{"taxable": true}"#).unwrap();
        assert!(parsed.taxable);
    }

    #[test]
    fn test_flag_accepts_checkbox_strings() {
        let parsed: TestStruct = serde_json::from_str(r#"{"taxable": "1"}"#).unwrap();
        assert!(parsed.taxable);

        let parsed: TestStruct = serde_json::from_str(r#"{"taxable": "0"}"#).unwrap();
        assert!(!parsed.taxable);

        let parsed: TestStruct = serde_json::from_str(r#"{"taxable": "on"}"#).unwrap();
        assert!(parsed.taxable);
    }

    #[test]
    fn test_flag_defaults_to_false_when_missing() {
        let parsed: TestStruct = serde_json::from_str(r#"{}"#).unwrap();
        assert!(!parsed.taxable);
    }

    #[test]
    fn test_flag_rejects_garbage() {
        let result: Result<TestStruct, _> = serde_json::from_str(r#"{"taxable": "maybe"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_optional_flag_keeps_absence_distinct() {
        let parsed: TestStruct = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(parsed.all_day, None);

        let parsed: TestStruct = serde_json::from_str(r#"{"all_day": "1"}"#).unwrap();
        assert_eq!(parsed.all_day, Some(true));

        let parsed: TestStruct = serde_json::from_str(r#"{"all_day": false}"#).unwrap();
        assert_eq!(parsed.all_day, Some(false));
    }
}
