use axum::response::{IntoResponse, Json};
use utoipa::OpenApi;

use crate::dto::{
    course_application_dto::{CourseApplicationResponse, CreateCourseApplicationRequest},
    vacancy_application_dto::{CreateVacancyApplicationRequest, VacancyApplicationResponse},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::course_application::create_course_application,
        crate::routes::vacancy_application::create_vacancy_application,
    ),
    components(schemas(
        CreateCourseApplicationRequest,
        CourseApplicationResponse,
        CreateVacancyApplicationRequest,
        VacancyApplicationResponse,
    ))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
