use axum::http::StatusCode;
use axum::response::IntoResponse;
use time::OffsetDateTime;

use quill::middleware::auth::Session;
use quill::model::user::UserId;
use quill::routes::{AppError, shell};
use quill::validate::ValidationError;

#[test]
fn document_shows_login_links_when_anonymous() {
    let page = shell::document(maud::html! {}, "home", None).into_string();

    assert!(page.contains("home - quill"));
    assert!(page.contains("Log in"));
    assert!(page.contains("Register"));
    assert!(!page.contains("Log out"));
}

#[test]
fn document_shows_username_when_logged_in() {
    let session = Session {
        id: UserId(1),
        username: "alice".to_string(),
    };
    let page = shell::document(maud::html! {}, "home", session).into_string();

    assert!(page.contains("Logged in as alice"));
    assert!(page.contains("Log out"));
    assert!(page.contains("/dashboard"));
    assert!(page.contains("/friends"));
}

#[test]
fn document_escapes_markup_in_user_content() {
    let page = shell::document(
        maud::html! { p { ("<script>alert(1)</script>") } },
        "home",
        None,
    )
    .into_string();

    assert!(!page.contains("<script>alert(1)</script>"));
    assert!(page.contains("&lt;script&gt;"));
}

#[test]
fn format_date_is_human_readable() {
    // 2020-01-01T00:00:00Z
    let ts = OffsetDateTime::from_unix_timestamp(1_577_836_800).unwrap();
    assert_eq!(shell::format_date(ts), "Jan 1, 2020");
}

#[test]
fn internal_errors_map_to_500() {
    let response = AppError::Internal(anyhow::anyhow!("boom")).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn not_found_maps_to_404() {
    let response = AppError::NotFound.into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn validation_errors_map_to_400() {
    let response = AppError::Invalid(ValidationError("title must not be empty")).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
