pub mod course_application_service;
pub mod media_storage;
pub mod vacancy_application_service;
