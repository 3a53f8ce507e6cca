use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::{
    dto::{
        course_application_dto::{CourseApplicationResponse, CreateCourseApplicationRequest},
        submission::Submission,
    },
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/course-application/",
    request_body(
        content = CreateCourseApplicationRequest,
        content_type = "application/json",
        description = "JSON or form-encoded; `days` is stored as `lesson_day`"
    ),
    responses(
        (status = 201, description = "Course application created", body = CourseApplicationResponse),
        (status = 400, description = "Field validation failed"),
        (status = 415, description = "Unsupported body encoding")
    )
)]
#[axum::debug_handler]
pub async fn create_course_application(
    State(state): State<AppState>,
    submission: Submission,
) -> Result<impl IntoResponse> {
    let record = state.course_service.create(submission).await?;
    Ok((
        StatusCode::CREATED,
        Json(CourseApplicationResponse::from(record)),
    ))
}
