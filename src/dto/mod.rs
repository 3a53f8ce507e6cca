pub mod course_application_dto;
pub mod submission;
pub mod vacancy_application_dto;
