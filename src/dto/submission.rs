use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use bytes::Bytes;
use serde_json::Value as JsonValue;

use crate::error::{Error, Result};
use crate::utils::validation::{ChoiceSet, FieldAlias, FieldError, FieldErrors};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// JSON value that has no string form (boolean, array, object).
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Request body flattened into named text fields and file parts,
/// independent of the encoding it arrived in.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    fields: HashMap<String, FieldValue>,
    files: HashMap<String, UploadedFile>,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), FieldValue::Text(value.into()));
        self
    }

    pub fn with_file(mut self, name: impl Into<String>, file: UploadedFile) -> Self {
        self.files.insert(name.into(), file);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }

    /// Renames client-facing fields to their stored names. Stored names
    /// present in the input are dropped first, so they can never be written.
    pub fn apply_aliases(mut self, aliases: &[FieldAlias]) -> Self {
        for alias in aliases {
            self.fields.remove(alias.stored);
            self.files.remove(alias.stored);
        }
        for alias in aliases {
            if let Some(value) = self.fields.remove(alias.input) {
                self.fields.insert(alias.stored.to_string(), value);
            }
            if let Some(file) = self.files.remove(alias.input) {
                self.files.insert(alias.stored.to_string(), file);
            }
        }
        self
    }

    /// Trimmed text of a field that must be present and non-blank.
    pub fn required_text(&self, field: &'static str, errors: &mut FieldErrors) -> Option<String> {
        match self.optional_text(field, errors) {
            Ok(Some(text)) => Some(text),
            Ok(None) => {
                errors.add(field, FieldError::Required);
                None
            }
            Err(()) => None,
        }
    }

    /// Trimmed text of an optional field; blank counts as absent.
    /// `Err` means a field error was already recorded.
    pub fn optional_text(
        &self,
        field: &'static str,
        errors: &mut FieldErrors,
    ) -> std::result::Result<Option<String>, ()> {
        match self.field(field) {
            Some(FieldValue::Text(text)) if text.contains('\0') => {
                errors.add(field, FieldError::NullCharacters);
                Err(())
            }
            Some(FieldValue::Text(text)) if !text.trim().is_empty() => {
                Ok(Some(text.trim().to_string()))
            }
            Some(FieldValue::Unsupported) => {
                errors.add(field, FieldError::Invalid { expected: "a string" });
                Err(())
            }
            _ => Ok(None),
        }
    }

    /// Untrimmed choice key; must match a key of `choices` byte for byte,
    /// so an empty value is an invalid choice. Only a missing field is
    /// `required`. Errors are recorded under `reported_as`, the client-facing name.
    pub fn required_choice(
        &self,
        field: &str,
        reported_as: &str,
        choices: &ChoiceSet,
        errors: &mut FieldErrors,
    ) -> Option<String> {
        let error = match self.field(field) {
            None => FieldError::Required,
            Some(FieldValue::Unsupported) => FieldError::Invalid { expected: "a string" },
            Some(FieldValue::Text(value)) if value.contains('\0') => FieldError::NullCharacters,
            Some(FieldValue::Text(value)) => match choices.validate(value) {
                Ok(()) => return Some(value.clone()),
                Err(err) => err,
            },
        };
        errors.add(reported_as, error);
        None
    }

    fn from_json(value: JsonValue) -> Result<Self> {
        let JsonValue::Object(map) = value else {
            return Err(Error::BadRequest(
                "Invalid data. Expected a JSON object.".into(),
            ));
        };

        let mut submission = Self::new();
        for (name, value) in map {
            let value = match value {
                JsonValue::Null => continue,
                JsonValue::String(text) => FieldValue::Text(text),
                JsonValue::Number(number) => FieldValue::Text(number.to_string()),
                JsonValue::Bool(_) | JsonValue::Array(_) | JsonValue::Object(_) => {
                    FieldValue::Unsupported
                }
            };
            submission.fields.insert(name, value);
        }
        Ok(submission)
    }

    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut submission = Self::new();
        for (name, value) in pairs {
            submission.fields.insert(name, FieldValue::Text(value));
        }
        submission
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut submission = Self::new();
        while let Some(field) = multipart.next_field().await.map_err(|e| {
            tracing::warn!("Failed to read multipart field: {}", e);
            Error::BadRequest(e.body_text())
        })? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let data = field.bytes().await?;
                    submission.files.insert(
                        name,
                        UploadedFile {
                            file_name: Some(file_name),
                            content_type,
                            data,
                        },
                    );
                }
                None => {
                    let text = field.text().await?;
                    submission.fields.insert(name, FieldValue::Text(text));
                }
            }
        }
        Ok(submission)
    }
}

#[async_trait]
impl<S> FromRequest<S> for Submission
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match mime.as_str() {
            "application/json" => {
                let Json(value) = Json::<JsonValue>::from_request(req, state)
                    .await
                    .map_err(|e| Error::BadRequest(e.body_text()))?;
                Self::from_json(value)
            }
            "application/x-www-form-urlencoded" => {
                let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                    .await
                    .map_err(|e| Error::BadRequest(e.body_text()))?;
                Ok(Self::from_pairs(pairs))
            }
            "multipart/form-data" => {
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| Error::BadRequest(e.body_text()))?;
                Self::from_multipart(multipart).await
            }
            _ => Err(Error::UnsupportedMediaType(content_type)),
        }
    }
}
