use std::sync::Arc;

use crate::database::store::ApplicationStore;
use crate::dto::submission::Submission;
use crate::dto::vacancy_application_dto::VacancyApplicationPayload;
use crate::error::Result;
use crate::models::vacancy_application::{
    NewVacancyApplication, VacancyApplication, CERTIFICATES_UPLOAD_TO,
    CERTIFICATE_NAME_MAX_LENGTH, GENDER_CHOICES,
};
use crate::services::media_storage::MediaStorage;

#[derive(Clone)]
pub struct VacancyApplicationService {
    store: Arc<dyn ApplicationStore>,
    media: MediaStorage,
}

impl VacancyApplicationService {
    pub fn new(store: Arc<dyn ApplicationStore>, media: MediaStorage) -> Self {
        Self { store, media }
    }

    /// Validates the submission, writes the optional upload to the media
    /// area and inserts the record. The upload is removed again if the
    /// insert fails.
    pub async fn create(&self, submission: Submission) -> Result<VacancyApplication> {
        let payload = VacancyApplicationPayload::from_submission(submission)?;

        let certificates = match &payload.certificates {
            Some(file) => Some(
                self.media
                    .save(
                        "certificates",
                        CERTIFICATES_UPLOAD_TO,
                        file,
                        CERTIFICATE_NAME_MAX_LENGTH,
                    )
                    .await?,
            ),
            None => None,
        };

        let application = NewVacancyApplication {
            full_name: payload.full_name,
            phone: payload.phone,
            gender: payload.gender,
            birth_date: payload.birth_date,
            about: payload.about,
            certificates: certificates.clone(),
        };

        let record = match self.store.insert_vacancy_application(application).await {
            Ok(record) => record,
            Err(e) => {
                if let Some(name) = certificates {
                    if let Err(cleanup) = self.media.delete(&name).await {
                        tracing::warn!(name = %name, "Failed to remove orphaned upload: {}", cleanup);
                    }
                }
                return Err(e);
            }
        };

        tracing::info!(
            id = record.id,
            gender = GENDER_CHOICES.label(&record.gender).unwrap_or_default(),
            has_certificates = record.certificates.is_some(),
            "Vacancy application received"
        );
        Ok(record)
    }
}
