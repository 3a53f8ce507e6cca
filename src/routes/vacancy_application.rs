use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::{
    dto::{
        submission::Submission,
        vacancy_application_dto::{
            CreateVacancyApplicationRequest, VacancyApplicationResponse,
        },
    },
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/vacancy-application/",
    request_body(
        content = CreateVacancyApplicationRequest,
        content_type = "multipart/form-data"
    ),
    responses(
        (status = 201, description = "Vacancy application created", body = VacancyApplicationResponse),
        (status = 400, description = "Field validation failed"),
        (status = 415, description = "Unsupported body encoding")
    )
)]
#[axum::debug_handler]
pub async fn create_vacancy_application(
    State(state): State<AppState>,
    submission: Submission,
) -> Result<impl IntoResponse> {
    let record = state.vacancy_service.create(submission).await?;
    Ok((
        StatusCode::CREATED,
        Json(VacancyApplicationResponse::from_record(
            record,
            &state.config.media_url,
        )),
    ))
}
