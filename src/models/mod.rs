pub mod course_application;
pub mod vacancy_application;
