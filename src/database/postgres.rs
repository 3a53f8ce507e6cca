use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::store::ApplicationStore;
use crate::error::Result;
use crate::models::course_application::{CourseApplication, NewCourseApplication};
use crate::models::vacancy_application::{NewVacancyApplication, VacancyApplication};

#[derive(Clone)]
pub struct PgApplicationStore {
    pool: PgPool,
}

impl PgApplicationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationStore for PgApplicationStore {
    async fn insert_course_application(
        &self,
        application: NewCourseApplication,
    ) -> Result<CourseApplication> {
        let record = sqlx::query_as::<_, CourseApplication>(
            r#"
            INSERT INTO course_applications (full_name, phone, subject, lesson_day)
            VALUES ($1, $2, $3, $4)
            RETURNING id, full_name, phone, subject, lesson_day, created_at
            "#,
        )
        .bind(&application.full_name)
        .bind(&application.phone)
        .bind(&application.subject)
        .bind(&application.lesson_day)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn insert_vacancy_application(
        &self,
        application: NewVacancyApplication,
    ) -> Result<VacancyApplication> {
        let record = sqlx::query_as::<_, VacancyApplication>(
            r#"
            INSERT INTO vacancy_applications (full_name, phone, gender, birth_date, about, certificates)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, full_name, phone, gender, birth_date, about, certificates, created_at
            "#,
        )
        .bind(&application.full_name)
        .bind(&application.phone)
        .bind(&application.gender)
        .bind(application.birth_date)
        .bind(&application.about)
        .bind(&application.certificates)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list_course_applications(&self) -> Result<Vec<CourseApplication>> {
        let items = sqlx::query_as::<_, CourseApplication>(
            r#"
            SELECT id, full_name, phone, subject, lesson_day, created_at
            FROM course_applications
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn list_vacancy_applications(&self) -> Result<Vec<VacancyApplication>> {
        let items = sqlx::query_as::<_, VacancyApplication>(
            r#"
            SELECT id, full_name, phone, gender, birth_date, about, certificates, created_at
            FROM vacancy_applications
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}
