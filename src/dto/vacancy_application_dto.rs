use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::dto::submission::{FieldValue, Submission, UploadedFile};
use crate::models::vacancy_application::{
    VacancyApplication, CERTIFICATE_NAME_MAX_LENGTH, GENDER_CHOICES,
};
use crate::utils::validation::{FieldError, FieldErrors};

/// Multipart body as documented for clients; parsing goes through [`Submission`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateVacancyApplicationRequest {
    #[schema(example = "Dilnoza Karimova", max_length = 150)]
    pub full_name: String,
    #[schema(example = "+998901234567", max_length = 30)]
    pub phone: String,
    #[schema(example = "female")]
    pub gender: String,
    #[schema(value_type = Option<String>, format = Date, example = "1998-04-12")]
    pub birth_date: Option<NaiveDate>,
    pub about: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub certificates: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Validate)]
pub struct VacancyApplicationPayload {
    #[validate(length(max = 150))]
    pub full_name: String,
    #[validate(length(max = 30))]
    pub phone: String,
    pub gender: String,
    pub birth_date: Option<NaiveDate>,
    pub about: String,
    pub certificates: Option<UploadedFile>,
}

impl VacancyApplicationPayload {
    pub fn from_submission(mut submission: Submission) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let full_name = submission.required_text("full_name", &mut errors);
        let phone = submission.required_text("phone", &mut errors);
        let gender = submission.required_choice("gender", "gender", &GENDER_CHOICES, &mut errors);
        let birth_date = parse_birth_date(&submission, &mut errors);
        let about = submission
            .optional_text("about", &mut errors)
            .ok()
            .flatten()
            .unwrap_or_default();
        let certificates = match take_certificate(&mut submission) {
            Ok(file) => file,
            Err(err) => {
                errors.add("certificates", err);
                None
            }
        };

        let payload = Self {
            full_name: full_name.unwrap_or_default(),
            phone: phone.unwrap_or_default(),
            gender: gender.unwrap_or_default(),
            birth_date,
            about,
            certificates,
        };
        if let Err(length_errors) = payload.validate() {
            errors.extend_from_validator(length_errors, &[]);
        }

        errors.into_result().map(|_| payload)
    }
}

fn parse_birth_date(submission: &Submission, errors: &mut FieldErrors) -> Option<NaiveDate> {
    let raw = submission.optional_text("birth_date", errors).ok().flatten()?;
    match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add("birth_date", FieldError::Invalid { expected: "YYYY-MM-DD" });
            None
        }
    }
}

/// Pulls the optional `certificates` upload out of the submission.
///
/// An empty part without filename (the browser's "no file chosen") and an
/// empty text value both mean no file was sent.
fn take_certificate(submission: &mut Submission) -> Result<Option<UploadedFile>, FieldError> {
    if let Some(file) = submission.take_file("certificates") {
        let file_name = file.file_name.as_deref().unwrap_or_default();
        return match (file_name.is_empty(), file.data.is_empty()) {
            (true, true) => Ok(None),
            (true, false) => Err(FieldError::malformed_upload(
                "No filename could be determined.",
            )),
            (false, true) => Err(FieldError::malformed_upload("The submitted file is empty.")),
            (false, false) if file_name.chars().count() > CERTIFICATE_NAME_MAX_LENGTH => {
                Err(FieldError::TooLong {
                    max_length: CERTIFICATE_NAME_MAX_LENGTH as u64,
                })
            }
            (false, false) => Ok(Some(file)),
        };
    }

    match submission.field("certificates") {
        None => Ok(None),
        Some(FieldValue::Text(text)) if text.is_empty() => Ok(None),
        Some(_) => Err(FieldError::malformed_upload(
            "The submitted data was not a file. Check the encoding type on the form.",
        )),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VacancyApplicationResponse {
    pub id: i64,
    pub full_name: String,
    pub phone: String,
    pub gender: String,
    #[schema(value_type = Option<String>, format = Date)]
    pub birth_date: Option<NaiveDate>,
    pub about: String,
    /// Public URL of the uploaded file.
    pub certificates: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

impl VacancyApplicationResponse {
    pub fn from_record(value: VacancyApplication, media_url: &str) -> Self {
        Self {
            id: value.id,
            full_name: value.full_name,
            phone: value.phone,
            gender: value.gender,
            birth_date: value.birth_date,
            about: value.about,
            certificates: value
                .certificates
                .map(|name| format!("{}{}", media_url, name)),
            created_at: value.created_at,
        }
    }
}
