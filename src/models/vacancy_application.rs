use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::validation::ChoiceSet;

pub const CERTIFICATE_NAME_MAX_LENGTH: usize = 100;
pub const CERTIFICATES_UPLOAD_TO: &str = "certificates";

pub static GENDER_CHOICES: ChoiceSet = ChoiceSet::new(&[("male", "Erkak"), ("female", "Ayol")]);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct VacancyApplication {
    pub id: i64,
    pub full_name: String,
    pub phone: String,
    pub gender: String,
    pub birth_date: Option<NaiveDate>,
    pub about: String,
    /// Media-relative path such as `certificates/cv.pdf`.
    pub certificates: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVacancyApplication {
    pub full_name: String,
    pub phone: String,
    pub gender: String,
    pub birth_date: Option<NaiveDate>,
    pub about: String,
    pub certificates: Option<String>,
}
