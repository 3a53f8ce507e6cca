use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

use serde_json::{json, Value as JsonValue};

/// Closed set of `(key, label)` pairs for an enumerated field.
///
/// Only keys are valid input; labels are display metadata.
pub struct ChoiceSet {
    entries: &'static [(&'static str, &'static str)],
    keys: OnceLock<HashSet<&'static str>>,
}

impl ChoiceSet {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            entries,
            keys: OnceLock::new(),
        }
    }

    pub fn entries(&self) -> &'static [(&'static str, &'static str)] {
        self.entries
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(key, _)| *key).collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys
            .get_or_init(|| self.entries.iter().map(|(key, _)| *key).collect())
            .contains(key)
    }

    pub fn label(&self, key: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, label)| *label)
    }

    pub fn validate(&self, value: &str) -> Result<(), FieldError> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(FieldError::InvalidChoice {
                value: value.to_string(),
                allowed: self.keys(),
            })
        }
    }
}

/// Client-facing field name that is persisted under a different name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAlias {
    pub input: &'static str,
    pub stored: &'static str,
}

pub fn input_name<'a>(aliases: &[FieldAlias], stored: &'a str) -> &'a str {
    aliases
        .iter()
        .find(|alias| alias.stored == stored)
        .map(|alias| alias.input)
        .unwrap_or(stored)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("This field is required.")]
    Required,

    #[error("\"{value}\" is not a valid choice.")]
    InvalidChoice {
        value: String,
        allowed: Vec<&'static str>,
    },

    #[error("Ensure this field has no more than {max_length} characters.")]
    TooLong { max_length: u64 },

    #[error("{reason}")]
    MalformedUpload { reason: String },

    #[error("Invalid value, expected {expected}.")]
    Invalid { expected: &'static str },

    #[error("Null characters are not allowed.")]
    NullCharacters,
}

impl FieldError {
    pub fn code(&self) -> &'static str {
        match self {
            FieldError::Required => "required",
            FieldError::InvalidChoice { .. } => "invalid_choice",
            FieldError::TooLong { .. } => "max_length",
            FieldError::MalformedUpload { .. } => "malformed_upload",
            FieldError::Invalid { .. } => "invalid",
            FieldError::NullCharacters => "null_characters_not_allowed",
        }
    }

    pub fn malformed_upload(reason: impl Into<String>) -> Self {
        FieldError::MalformedUpload {
            reason: reason.into(),
        }
    }

    pub fn to_json(&self) -> JsonValue {
        let mut body = json!({
            "code": self.code(),
            "message": self.to_string(),
        });
        match self {
            FieldError::InvalidChoice { value, allowed } => {
                body["value"] = json!(value);
                body["allowed"] = json!(allowed);
            }
            FieldError::TooLong { max_length } => body["max_length"] = json!(max_length),
            _ => {}
        }
        body
    }
}

/// Per-field error set of one request, keyed by client-facing field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<FieldError>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, error: FieldError) {
        self.0.entry(field.into()).or_default().push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> &[FieldError] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Folds `validator` derive output into the set, renaming aliased fields.
    pub fn extend_from_validator(
        &mut self,
        errors: validator::ValidationErrors,
        aliases: &[FieldAlias],
    ) {
        for (field, errs) in errors.field_errors() {
            let name = input_name(aliases, field.as_ref()).to_string();
            for err in errs {
                let converted = match err.code.as_ref() {
                    "length" => FieldError::TooLong {
                        max_length: err
                            .params
                            .get("max")
                            .and_then(JsonValue::as_u64)
                            .unwrap_or_default(),
                    },
                    _ => FieldError::Invalid { expected: "a valid value" },
                };
                self.add(name.clone(), converted);
            }
        }
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Body of a 400 response. Each field maps to its messages at the top
    /// level, the shape form clients read; structured errors sit under `details`.
    pub fn to_response_body(&self) -> JsonValue {
        let mut body: serde_json::Map<String, JsonValue> = self
            .0
            .iter()
            .map(|(field, errors)| {
                let messages = errors.iter().map(|err| json!(err.to_string())).collect();
                (field.clone(), JsonValue::Array(messages))
            })
            .collect();
        body.insert("details".to_string(), self.to_json());
        JsonValue::Object(body)
    }

    pub fn to_json(&self) -> JsonValue {
        let fields: serde_json::Map<String, JsonValue> = self
            .0
            .iter()
            .map(|(field, errors)| {
                (
                    field.clone(),
                    JsonValue::Array(errors.iter().map(FieldError::to_json).collect()),
                )
            })
            .collect();
        JsonValue::Object(fields)
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, errors)| {
                let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
                format!("{}: {}", field, messages.join(" "))
            })
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static COLORS: ChoiceSet = ChoiceSet::new(&[("red", "Qizil"), ("blue", "Ko'k")]);

    #[test]
    fn membership_is_byte_exact_on_keys() {
        assert!(COLORS.contains("red"));
        assert!(!COLORS.contains("Red"));
        assert!(!COLORS.contains(" red"));
        assert!(!COLORS.contains("Qizil"));
    }

    #[test]
    fn invalid_choice_lists_allowed_keys() {
        let err = COLORS.validate("green").unwrap_err();
        assert_eq!(
            err,
            FieldError::InvalidChoice {
                value: "green".into(),
                allowed: vec!["red", "blue"],
            }
        );
        assert_eq!(err.to_json()["allowed"], json!(["red", "blue"]));
    }

    #[test]
    fn labels_resolve_by_key() {
        assert_eq!(COLORS.label("blue"), Some("Ko'k"));
        assert_eq!(COLORS.label("Ko'k"), None);
    }

    #[test]
    fn stored_names_map_back_to_input_names() {
        let aliases = [FieldAlias {
            input: "days",
            stored: "lesson_day",
        }];
        assert_eq!(input_name(&aliases, "lesson_day"), "days");
        assert_eq!(input_name(&aliases, "phone"), "phone");
    }

    #[test]
    fn errors_serialize_per_field() {
        let mut errors = FieldErrors::new();
        errors.add("phone", FieldError::Required);
        errors.add("full_name", FieldError::TooLong { max_length: 150 });
        let body = errors.to_json();
        assert_eq!(body["phone"][0]["code"], "required");
        assert_eq!(body["full_name"][0]["max_length"], 150);
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn response_body_puts_messages_at_top_level() {
        let mut errors = FieldErrors::new();
        errors.add("subject", COLORS.validate("green").unwrap_err());
        errors.add("days", FieldError::Required);
        let body = errors.to_response_body();
        assert_eq!(body["subject"][0], "\"green\" is not a valid choice.");
        assert_eq!(body["days"], json!(["This field is required."]));
        assert_eq!(body["details"]["subject"][0]["code"], "invalid_choice");
    }
}
