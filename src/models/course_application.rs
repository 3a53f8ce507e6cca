use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::validation::{ChoiceSet, FieldAlias};

pub static SUBJECT_CHOICES: ChoiceSet = ChoiceSet::new(&[
    ("ingliz", "Ingliz tili"),
    ("rus", "Rus tili"),
    ("koreys", "Koreys tili"),
    ("xitoy", "Xitoy tili"),
    ("ona", "Ona tili"),
    ("tarix", "Tarix"),
    ("pochemuchka", "Pochemuchka"),
    ("mental", "Mental arifmetika"),
    ("kompyuter", "Kompyuter savodxonligi"),
    ("backend", "Backend dasturlash"),
    ("kimyo", "Kimyo"),
    ("biologiya", "Biologiya"),
]);

pub static DAY_CHOICES: ChoiceSet = ChoiceSet::new(&[
    ("du_ju", "Dushanba / Juma"),
    ("se_pa", "Seshanba / Payshanba"),
    ("sh_yn", "Shanba / Yakshanba"),
    ("boshqa", "Boshqa (admin bilan aniqlanadi)"),
]);

/// Inbound `days` is stored as `lesson_day`; `lesson_day` itself is never writable.
pub const INPUT_ALIASES: &[FieldAlias] = &[FieldAlias {
    input: "days",
    stored: "lesson_day",
}];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CourseApplication {
    pub id: i64,
    pub full_name: String,
    pub phone: String,
    pub subject: String,
    pub lesson_day: String,
    pub created_at: DateTime<Utc>,
}

/// Validated course application that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourseApplication {
    pub full_name: String,
    pub phone: String,
    pub subject: String,
    pub lesson_day: String,
}
