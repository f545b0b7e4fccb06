use axum::Router;
use axum::extract::Form;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use serde::Deserialize;

use crate::middleware::auth::Session;
use crate::model;
use crate::routes::{AppError, shell};
use crate::state::AppState;
use crate::validate::{self, Validate, ValidationError};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(page_register))
        .route("/register", post(do_register))
}

async fn page_register(session: Option<Session>) -> maud::Markup {
    shell::document(register_form(None), "register", session)
}

fn register_form(error: Option<&str>) -> maud::Markup {
    maud::html! {
        @if let Some(error) = error {
            p .text-red-600 .mb-2 { (error) }
        }

        form method="post" {
            label for="username" { "Username" }
            input .border-solid .border-1 type="text" name="username" required;

            label for="password" { "Password" }
            input .border-solid .border-1 type="password" name="password" required;

            input .text-neutral-50 .bg-blue-500 .border-neutral-700 .border-solid .border-1 type="submit" value="Register";
        }
    }
}

#[derive(Deserialize)]
struct RegisterForm {
    username: String,
    password: String,
}

impl Validate for RegisterForm {
    fn validate(&self) -> Result<(), ValidationError> {
        validate::required(&self.username, "username must not be empty")?;
        validate::min_len(&self.username, 3, "username must be at least 3 characters")?;
        validate::min_len(&self.password, 8, "password must be at least 8 characters")
    }
}

async fn do_register(
    state: AppState,
    Form(register): Form<RegisterForm>,
) -> Result<Response, AppError> {
    register.validate()?;

    let created = model::user::create(&state.db, &register.username, &register.password).await?;
    if !created {
        let markup = register_form(Some("username is already taken"));
        return Ok(shell::document(markup, "register", None).into_response());
    }

    Ok(Redirect::to("/login").into_response())
}
