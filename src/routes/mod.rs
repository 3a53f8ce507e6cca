pub mod course_application;
pub mod health;
pub mod openapi;
pub mod vacancy_application;
