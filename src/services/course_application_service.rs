use std::sync::Arc;

use crate::database::store::ApplicationStore;
use crate::dto::course_application_dto::CourseApplicationPayload;
use crate::dto::submission::Submission;
use crate::error::Result;
use crate::models::course_application::{CourseApplication, DAY_CHOICES, SUBJECT_CHOICES};

#[derive(Clone)]
pub struct CourseApplicationService {
    store: Arc<dyn ApplicationStore>,
}

impl CourseApplicationService {
    pub fn new(store: Arc<dyn ApplicationStore>) -> Self {
        Self { store }
    }

    /// Validates and stores one course application. Nothing is written
    /// when validation fails.
    pub async fn create(&self, submission: Submission) -> Result<CourseApplication> {
        let payload = CourseApplicationPayload::from_submission(submission)?;
        let record = self.store.insert_course_application(payload.into()).await?;

        tracing::info!(
            id = record.id,
            subject = SUBJECT_CHOICES.label(&record.subject).unwrap_or_default(),
            lesson_day = DAY_CHOICES.label(&record.lesson_day).unwrap_or_default(),
            "Course application received"
        );
        Ok(record)
    }
}
