//! Registration input validation.
//!
//! Operates on the raw JSON body so that field presence and field type can be
//! reported separately. Checks run in a fixed order and stop at the first
//! failure: presence, type, whitespace, size.

use serde_json::{Map, Value};

/// Fields that must be present in the body (empty values still count).
const REQUIRED_FIELDS: [&str; 2] = ["username", "password"];

/// Fields that, when present, must be JSON strings.
const STRING_FIELDS: [&str; 3] = ["username", "password", "fullName"];

/// Fields that must not carry leading or trailing whitespace.
const TRIMMED_FIELDS: [&str; 2] = ["username", "password"];

/// Minimum password length in characters.
pub const PASSWORD_MIN_LEN: usize = 8;

/// Maximum password length in characters.
pub const PASSWORD_MAX_LEN: usize = 72;

/// Length bounds for one field. `max = None` means unbounded.
struct SizeBound {
    field: &'static str,
    min: usize,
    max: Option<usize>,
}

const SIZED_FIELDS: [SizeBound; 2] = [
    SizeBound {
        field: "username",
        min: 1,
        max: None,
    },
    SizeBound {
        field: "password",
        min: PASSWORD_MIN_LEN,
        max: Some(PASSWORD_MAX_LEN),
    },
];

/// Why a registration body was rejected. Every variant names the field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("Missing field")]
    MissingField(&'static str),

    #[error("Incorrect field type: expected string")]
    WrongType(&'static str),

    #[error("Cannot start or end with whitespace")]
    UntrimmedField(&'static str),

    #[error("Must be at least {min} characters long")]
    TooShort { field: &'static str, min: usize },

    #[error("Must be at most {max} characters long")]
    TooLong { field: &'static str, max: usize },
}

impl RegistrationError {
    /// The body field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField(field)
            | Self::WrongType(field)
            | Self::UntrimmedField(field)
            | Self::TooShort { field, .. }
            | Self::TooLong { field, .. } => *field,
        }
    }
}

/// Registration input that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCredentials {
    pub username: String,
    pub password: String,
    /// Empty when the body did not carry `fullName`.
    pub full_name: String,
}

/// Validate a registration body.
///
/// A body that is not a JSON object is treated as one with no fields, so it
/// fails with `MissingField("username")`.
pub fn validate_registration(input: &Value) -> Result<ValidatedCredentials, RegistrationError> {
    let empty = Map::new();
    let body = input.as_object().unwrap_or(&empty);

    if let Some(field) = REQUIRED_FIELDS.iter().copied().find(|f| !body.contains_key(*f)) {
        return Err(RegistrationError::MissingField(field));
    }

    if let Some(field) = STRING_FIELDS
        .iter()
        .copied()
        .find(|f| body.get(*f).is_some_and(|v| !v.is_string()))
    {
        return Err(RegistrationError::WrongType(field));
    }

    if let Some(field) = TRIMMED_FIELDS.iter().copied().find(|f| {
        let value = string_field(body, f);
        value.trim() != value
    }) {
        return Err(RegistrationError::UntrimmedField(field));
    }

    for bound in &SIZED_FIELDS {
        let len = string_field(body, bound.field).trim().chars().count();
        if len < bound.min {
            return Err(RegistrationError::TooShort {
                field: bound.field,
                min: bound.min,
            });
        }
        if let Some(max) = bound.max.filter(|max| len > *max) {
            return Err(RegistrationError::TooLong {
                field: bound.field,
                max,
            });
        }
    }

    Ok(ValidatedCredentials {
        username: string_field(body, "username").to_string(),
        password: string_field(body, "password").to_string(),
        full_name: string_field(body, "fullName").to_string(),
    })
}

/// Read a field already known to be a string (or absent, yielding `""`).
fn string_field<'a>(body: &'a Map<String, Value>, name: &str) -> &'a str {
    body.get(name).and_then(Value::as_str).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn accepts_valid_body_and_defaults_full_name() {
        let creds = validate_registration(&json!({
            "username": "bobuser",
            "password": "password123",
        }))
        .unwrap();

        assert_eq!(creds.username, "bobuser");
        assert_eq!(creds.password, "password123");
        assert_eq!(creds.full_name, "");
    }

    #[test]
    fn keeps_full_name_untouched() {
        let creds = validate_registration(&json!({
            "username": "bobuser",
            "password": "password123",
            "fullName": "  Bob User ",
        }))
        .unwrap();
        assert_eq!(creds.full_name, "  Bob User ");
    }

    #[test]
    fn missing_username_is_reported_first() {
        let err = validate_registration(&json!({ "password": 42 })).unwrap_err();
        assert_eq!(err, RegistrationError::MissingField("username"));
    }

    #[test]
    fn missing_password() {
        let err = validate_registration(&json!({ "username": "bob" })).unwrap_err();
        assert_eq!(err, RegistrationError::MissingField("password"));
        assert_eq!(err.field(), "password");
    }

    #[test]
    fn non_object_body_counts_as_missing_username() {
        let err = validate_registration(&json!(["username", "password"])).unwrap_err();
        assert_eq!(err, RegistrationError::MissingField("username"));
    }

    #[test]
    fn non_string_fields_are_rejected() {
        let err =
            validate_registration(&json!({ "username": 7, "password": "password123" }))
                .unwrap_err();
        assert_eq!(err, RegistrationError::WrongType("username"));

        let err = validate_registration(&json!({
            "username": "bob",
            "password": "password123",
            "fullName": null,
        }))
        .unwrap_err();
        assert_eq!(err, RegistrationError::WrongType("fullName"));
    }

    #[test]
    fn surrounding_whitespace_is_rejected() {
        let err = validate_registration(&json!({
            "username": " bob",
            "password": "password123",
        }))
        .unwrap_err();
        assert_eq!(err, RegistrationError::UntrimmedField("username"));

        let err = validate_registration(&json!({
            "username": "bob",
            "password": "password123 ",
        }))
        .unwrap_err();
        assert_eq!(err, RegistrationError::UntrimmedField("password"));
    }

    #[test]
    fn empty_username_is_too_short() {
        let err =
            validate_registration(&json!({ "username": "", "password": "password123" }))
                .unwrap_err();
        assert_eq!(
            err,
            RegistrationError::TooShort {
                field: "username",
                min: 1
            }
        );
    }

    #[test]
    fn password_length_bounds() {
        let short = "a".repeat(PASSWORD_MIN_LEN - 1);
        let err = validate_registration(&json!({ "username": "bob", "password": short }))
            .unwrap_err();
        assert_matches!(err, RegistrationError::TooShort { field: "password", min: 8 });

        let long = "a".repeat(PASSWORD_MAX_LEN + 1);
        let err = validate_registration(&json!({ "username": "bob", "password": long }))
            .unwrap_err();
        assert_matches!(err, RegistrationError::TooLong { field: "password", max: 72 });

        for len in [PASSWORD_MIN_LEN, PASSWORD_MAX_LEN] {
            let password = "a".repeat(len);
            assert!(
                validate_registration(&json!({ "username": "bob", "password": password }))
                    .is_ok(),
                "password of length {len} should pass"
            );
        }
    }

    #[test]
    fn password_length_counts_characters() {
        let password = "é".repeat(PASSWORD_MAX_LEN);
        assert!(validate_registration(&json!({ "username": "bob", "password": password })).is_ok());
    }
}
