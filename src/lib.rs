pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::Config;
use crate::database::store::ApplicationStore;
use crate::services::{
    course_application_service::CourseApplicationService, media_storage::MediaStorage,
    vacancy_application_service::VacancyApplicationService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub course_service: CourseApplicationService,
    pub vacancy_service: VacancyApplicationService,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn ApplicationStore>) -> Self {
        let media = MediaStorage::new(config.media_root.clone());
        let course_service = CourseApplicationService::new(store.clone());
        let vacancy_service = VacancyApplicationService::new(store, media);

        Self {
            config: Arc::new(config),
            course_service,
            vacancy_service,
        }
    }
}

/// Full HTTP surface: liveness root, the two intake endpoints and, in
/// debug mode only, the media area and the OpenAPI document.
pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();

    let mut app = Router::new()
        .route("/", get(routes::health::root))
        .route(
            "/api/course-application/",
            post(routes::course_application::create_course_application),
        )
        .route(
            "/api/vacancy-application/",
            post(routes::vacancy_application::create_vacancy_application),
        );

    if config.debug {
        app = app.route("/api/openapi.json", get(routes::openapi::openapi_json));
        if let Some(mount) = config.media_mount_path() {
            tracing::info!(
                "Serving media from {} at {}",
                config.media_root.display(),
                mount
            );
            app = app.nest_service(mount, ServeDir::new(&config.media_root));
        }
    }

    app.with_state(state)
        .layer(middleware::cors::intake_cors(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
}
