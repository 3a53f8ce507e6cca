use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::database::store::ApplicationStore;
use crate::error::Result;
use crate::models::course_application::{CourseApplication, NewCourseApplication};
use crate::models::vacancy_application::{NewVacancyApplication, VacancyApplication};
use crate::utils::time::now_after;

/// Process-local store for development and tests. Contents are lost on exit.
#[derive(Default)]
pub struct MemoryApplicationStore {
    courses: Mutex<Vec<CourseApplication>>,
    vacancies: Mutex<Vec<VacancyApplication>>,
}

impl MemoryApplicationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApplicationStore for MemoryApplicationStore {
    async fn insert_course_application(
        &self,
        application: NewCourseApplication,
    ) -> Result<CourseApplication> {
        let mut guard = self.courses.lock().await;
        let last = guard.last();
        let record = CourseApplication {
            id: last.map(|r| r.id + 1).unwrap_or(1),
            full_name: application.full_name,
            phone: application.phone,
            subject: application.subject,
            lesson_day: application.lesson_day,
            created_at: now_after(last.map(|r| r.created_at)),
        };
        guard.push(record.clone());
        Ok(record)
    }

    async fn insert_vacancy_application(
        &self,
        application: NewVacancyApplication,
    ) -> Result<VacancyApplication> {
        let mut guard = self.vacancies.lock().await;
        let last = guard.last();
        let record = VacancyApplication {
            id: last.map(|r| r.id + 1).unwrap_or(1),
            full_name: application.full_name,
            phone: application.phone,
            gender: application.gender,
            birth_date: application.birth_date,
            about: application.about,
            certificates: application.certificates,
            created_at: now_after(last.map(|r| r.created_at)),
        };
        guard.push(record.clone());
        Ok(record)
    }

    async fn list_course_applications(&self) -> Result<Vec<CourseApplication>> {
        let guard = self.courses.lock().await;
        Ok(guard.iter().rev().cloned().collect())
    }

    async fn list_vacancy_applications(&self) -> Result<Vec<VacancyApplication>> {
        let guard = self.vacancies.lock().await;
        Ok(guard.iter().rev().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(name: &str) -> NewCourseApplication {
        NewCourseApplication {
            full_name: name.into(),
            phone: "+998901234567".into(),
            subject: "rus".into(),
            lesson_day: "se_pa".into(),
        }
    }

    #[tokio::test]
    async fn ids_and_timestamps_follow_insertion_order() {
        let store = MemoryApplicationStore::new();
        let first = store.insert_course_application(course("A")).await.unwrap();
        let second = store.insert_course_application(course("B")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(second.created_at >= first.created_at);

        let listed = store.list_course_applications().await.unwrap();
        assert_eq!(
            listed.iter().map(|r| r.full_name.as_str()).collect::<Vec<_>>(),
            vec!["B", "A"]
        );
    }
}
