use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::dto::submission::Submission;
use crate::models::course_application::{
    CourseApplication, NewCourseApplication, DAY_CHOICES, INPUT_ALIASES, SUBJECT_CHOICES,
};
use crate::utils::validation::{input_name, FieldErrors};

/// Request body as documented for clients; parsing goes through [`Submission`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCourseApplicationRequest {
    #[schema(example = "Ali Valiyev", max_length = 150)]
    pub full_name: String,
    #[schema(example = "+998901234567", max_length = 30)]
    pub phone: String,
    #[schema(example = "ingliz")]
    pub subject: String,
    /// Preferred lesson days, stored as `lesson_day`.
    #[schema(example = "du_ju")]
    pub days: String,
}

#[derive(Debug, Clone, Validate)]
pub struct CourseApplicationPayload {
    #[validate(length(max = 150))]
    pub full_name: String,
    #[validate(length(max = 30))]
    pub phone: String,
    pub subject: String,
    pub lesson_day: String,
}

impl CourseApplicationPayload {
    /// Validates a raw submission, mapping `days` onto `lesson_day`.
    /// Every failing field is reported, not just the first.
    pub fn from_submission(submission: Submission) -> Result<Self, FieldErrors> {
        let submission = submission.apply_aliases(INPUT_ALIASES);
        let mut errors = FieldErrors::new();

        let full_name = submission.required_text("full_name", &mut errors);
        let phone = submission.required_text("phone", &mut errors);
        let subject = submission.required_choice(
            "subject",
            input_name(INPUT_ALIASES, "subject"),
            &SUBJECT_CHOICES,
            &mut errors,
        );
        let lesson_day = submission.required_choice(
            "lesson_day",
            input_name(INPUT_ALIASES, "lesson_day"),
            &DAY_CHOICES,
            &mut errors,
        );

        let payload = Self {
            full_name: full_name.unwrap_or_default(),
            phone: phone.unwrap_or_default(),
            subject: subject.unwrap_or_default(),
            lesson_day: lesson_day.unwrap_or_default(),
        };
        if let Err(length_errors) = payload.validate() {
            errors.extend_from_validator(length_errors, INPUT_ALIASES);
        }

        errors.into_result().map(|_| payload)
    }
}

impl From<CourseApplicationPayload> for NewCourseApplication {
    fn from(value: CourseApplicationPayload) -> Self {
        Self {
            full_name: value.full_name,
            phone: value.phone,
            subject: value.subject,
            lesson_day: value.lesson_day,
        }
    }
}

/// `days` is input-only; the stored `lesson_day` is echoed back.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseApplicationResponse {
    pub id: i64,
    pub full_name: String,
    pub phone: String,
    pub subject: String,
    pub lesson_day: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

impl From<CourseApplication> for CourseApplicationResponse {
    fn from(value: CourseApplication) -> Self {
        Self {
            id: value.id,
            full_name: value.full_name,
            phone: value.phone,
            subject: value.subject,
            lesson_day: value.lesson_day,
            created_at: value.created_at,
        }
    }
}
