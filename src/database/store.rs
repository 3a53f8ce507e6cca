use async_trait::async_trait;

use crate::error::Result;
use crate::models::course_application::{CourseApplication, NewCourseApplication};
use crate::models::vacancy_application::{NewVacancyApplication, VacancyApplication};

/// Persistence for both intake collections. Each insert is a single atomic
/// write; ids and `created_at` are assigned by the store.
#[async_trait]
pub trait ApplicationStore: Send + Sync + 'static {
    async fn insert_course_application(
        &self,
        application: NewCourseApplication,
    ) -> Result<CourseApplication>;

    async fn insert_vacancy_application(
        &self,
        application: NewVacancyApplication,
    ) -> Result<VacancyApplication>;

    /// Newest first.
    async fn list_course_applications(&self) -> Result<Vec<CourseApplication>>;

    /// Newest first.
    async fn list_vacancy_applications(&self) -> Result<Vec<VacancyApplication>>;
}
