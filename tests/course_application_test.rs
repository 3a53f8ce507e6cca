mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{json_request, send, setup_app, setup_with_store};
use intake_backend::{
    database::store::ApplicationStore,
    error::{Error, Result},
    models::course_application::{
        CourseApplication, NewCourseApplication, DAY_CHOICES, SUBJECT_CHOICES,
    },
    models::vacancy_application::{NewVacancyApplication, VacancyApplication},
};
use serde_json::json;

const URI: &str = "/api/course-application/";

mockall::mock! {
    pub Store {}

    #[async_trait]
    impl ApplicationStore for Store {
        async fn insert_course_application(
            &self,
            application: NewCourseApplication,
        ) -> Result<CourseApplication>;
        async fn insert_vacancy_application(
            &self,
            application: NewVacancyApplication,
        ) -> Result<VacancyApplication>;
        async fn list_course_applications(&self) -> Result<Vec<CourseApplication>>;
        async fn list_vacancy_applications(&self) -> Result<Vec<VacancyApplication>>;
    }
}

#[tokio::test]
async fn creates_record_with_days_stored_as_lesson_day() {
    let app = setup_app();
    let body = json!({
        "full_name": "Ali Valiyev",
        "phone": "+998901234567",
        "subject": "ingliz",
        "days": "du_ju",
    });

    let (status, resp) = send(&app.router, json_request(URI, &body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(resp["lesson_day"], "du_ju");
    assert_eq!(resp["subject"], "ingliz");
    assert_eq!(resp["full_name"], "Ali Valiyev");
    assert!(resp["id"].is_i64());
    assert!(resp["created_at"].is_string());
    assert!(resp.get("days").is_none());

    let stored = app.store.list_course_applications().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].lesson_day, "du_ju");
    assert_eq!(stored[0].id, resp["id"].as_i64().unwrap());
}

#[tokio::test]
async fn every_subject_and_day_combination_is_accepted() {
    let app = setup_app();
    for (subject, _) in SUBJECT_CHOICES.entries() {
        for (day, _) in DAY_CHOICES.entries() {
            let body = json!({
                "full_name": "Ali Valiyev",
                "phone": "+998901234567",
                "subject": subject,
                "days": day,
            });
            let (status, resp) = send(&app.router, json_request(URI, &body)).await;
            assert_eq!(status, StatusCode::CREATED, "{subject}/{day}: {resp}");
            assert_eq!(resp["lesson_day"], *day);
        }
    }
    let stored = app.store.list_course_applications().await.unwrap();
    assert_eq!(stored.len(), 12 * 4);
}

#[tokio::test]
async fn invalid_choice_is_rejected_without_writing() {
    let app = setup_app();
    let body = json!({
        "full_name": "Ali Valiyev",
        "phone": "+998901234567",
        "subject": "physics",
        "days": "du_ju",
    });

    let (status, resp) = send(&app.router, json_request(URI, &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["subject"][0], "\"physics\" is not a valid choice.");
    assert_eq!(resp["details"]["subject"][0]["code"], "invalid_choice");
    assert_eq!(resp["details"]["subject"][0]["value"], "physics");
    assert_eq!(
        resp["details"]["subject"][0]["allowed"].as_array().unwrap().len(),
        12
    );

    let body = json!({
        "full_name": "Ali Valiyev",
        "phone": "+998901234567",
        "subject": "ingliz",
        "days": "Dushanba / Juma",
    });
    let (status, resp) = send(&app.router, json_request(URI, &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["details"]["days"][0]["code"], "invalid_choice");

    assert!(app.store.list_course_applications().await.unwrap().is_empty());
}

#[tokio::test]
async fn lesson_day_is_not_a_writable_input() {
    let app = setup_app();
    let body = json!({
        "full_name": "Ali Valiyev",
        "phone": "+998901234567",
        "subject": "ingliz",
        "lesson_day": "du_ju",
    });

    let (status, resp) = send(&app.router, json_request(URI, &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["details"]["days"][0]["code"], "required");
    assert_eq!(resp["days"][0], "This field is required.");
    assert!(resp.get("lesson_day").is_none());
    assert!(resp["details"].get("lesson_day").is_none());

    let body = json!({
        "full_name": "Ali Valiyev",
        "phone": "+998901234567",
        "subject": "ingliz",
        "days": "sh_yn",
        "lesson_day": "du_ju",
    });
    let (status, resp) = send(&app.router, json_request(URI, &body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(resp["lesson_day"], "sh_yn");
}

#[tokio::test]
async fn missing_and_overlong_fields_are_reported_together() {
    let app = setup_app();
    let body = json!({
        "full_name": "x".repeat(151),
        "subject": "rus",
        "days": "se_pa",
    });

    let (status, resp) = send(&app.router, json_request(URI, &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["details"]["phone"][0]["code"], "required");
    assert_eq!(resp["details"]["full_name"][0]["code"], "max_length");
    assert_eq!(resp["details"]["full_name"][0]["max_length"], 150);
}

#[tokio::test]
async fn empty_choice_is_an_invalid_choice() {
    let app = setup_app();
    let body = json!({
        "full_name": "Ali Valiyev",
        "phone": "+998901234567",
        "subject": "",
        "days": "du_ju",
    });

    let (status, resp) = send(&app.router, json_request(URI, &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["subject"][0], "\"\" is not a valid choice.");
    assert_eq!(resp["details"]["subject"][0]["code"], "invalid_choice");

    let req = Request::builder()
        .method("POST")
        .uri(URI)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from("full_name=Ali&phone=1&subject=rus&days="))
        .unwrap();
    let (status, resp) = send(&app.router, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["details"]["days"][0]["code"], "invalid_choice");
    assert!(app.store.list_course_applications().await.unwrap().is_empty());
}

#[tokio::test]
async fn null_characters_are_rejected() {
    let app = setup_app();
    let body = json!({
        "full_name": "Ali\u{0}Vali",
        "phone": "+998901234567",
        "subject": "ingliz\u{0}",
        "days": "du_ju",
    });

    let (status, resp) = send(&app.router, json_request(URI, &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["full_name"][0], "Null characters are not allowed.");
    assert_eq!(
        resp["details"]["full_name"][0]["code"],
        "null_characters_not_allowed"
    );
    assert_eq!(
        resp["details"]["subject"][0]["code"],
        "null_characters_not_allowed"
    );
    assert!(app.store.list_course_applications().await.unwrap().is_empty());
}

#[tokio::test]
async fn accepts_form_encoded_bodies() {
    let app = setup_app();
    let req = Request::builder()
        .method("POST")
        .uri(URI)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(
            "full_name=Ali+Valiyev&phone=%2B998901234567&subject=kimyo&days=boshqa",
        ))
        .unwrap();

    let (status, resp) = send(&app.router, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(resp["phone"], "+998901234567");
    assert_eq!(resp["lesson_day"], "boshqa");
}

#[tokio::test]
async fn rejects_unsupported_encodings_and_methods() {
    let app = setup_app();
    let req = Request::builder()
        .method("POST")
        .uri(URI)
        .header("content-type", "text/plain")
        .body(Body::from("hello"))
        .unwrap();
    let (status, _) = send(&app.router, req).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let req = Request::builder()
        .method("GET")
        .uri(URI)
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app.router, req).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let req = json_request(URI, &json!(["not", "an", "object"]));
    let (status, _) = send(&app.router, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn records_are_listed_newest_first() {
    let app = setup_app();
    for name in ["First", "Second", "Third"] {
        let body = json!({
            "full_name": name,
            "phone": "+998901234567",
            "subject": "tarix",
            "days": "du_ju",
        });
        let (status, _) = send(&app.router, json_request(URI, &body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let listed = app.store.list_course_applications().await.unwrap();
    let names: Vec<_> = listed.iter().map(|r| r.full_name.as_str()).collect();
    assert_eq!(names, vec!["Third", "Second", "First"]);
    assert!(listed
        .windows(2)
        .all(|pair| pair[0].created_at >= pair[1].created_at));
}

#[tokio::test]
async fn storage_failure_is_a_server_error() {
    let mut store = MockStore::new();
    store
        .expect_insert_course_application()
        .times(1)
        .returning(|_| Err(Error::Database(sqlx::Error::PoolTimedOut)));
    let (router, _media) = setup_with_store(Arc::new(store));

    let body = json!({
        "full_name": "Ali Valiyev",
        "phone": "+998901234567",
        "subject": "ingliz",
        "days": "du_ju",
    });
    let (status, resp) = send(&router, json_request(URI, &body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp["error"], "An unexpected error occurred");
}

#[tokio::test]
async fn root_reports_liveness() {
    let app = setup_app();
    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let resp = tower::ServiceExt::oneshot(app.router.clone(), req)
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
    assert_eq!(&bytes[..], b"backend is running");
}
