use axum::Router;
use axum::extract::{Form, Query};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;

use crate::middleware::auth::{self, Session};
use crate::routes::{AppError, shell};
use crate::state::AppState;
use crate::{metrics, model};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(page_login))
        .route("/login", post(do_login))
}

async fn page_login(session: Option<Session>) -> Response {
    // Already logged in, nothing to do here.
    if session.is_some() {
        return Redirect::to("/dashboard").into_response();
    }

    shell::document(login_form(None), "log in", None).into_response()
}

fn login_form(error: Option<&str>) -> maud::Markup {
    maud::html! {
        @if let Some(error) = error {
            p .text-red-600 .mb-2 { (error) }
        }

        form method="post" {
            label for="username" { "Username" }
            input .border-solid .border-1 type="text" name="username" required;

            label for="password" { "Password" }
            input .border-solid .border-1 type="password" name="password" required;

            input .text-neutral-50 .bg-blue-500 .border-neutral-700 .border-solid .border-1 type="submit" value="Log in";
        }
    }
}

#[derive(Deserialize)]
struct LoginQuery {
    redirect: Option<String>,
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn do_login(
    state: AppState,
    mut jar: CookieJar,
    Query(query): Query<LoginQuery>,
    Form(login): Form<LoginForm>,
) -> Result<Response, AppError> {
    let LoginForm { username, password } = login;

    let Some(user_id) = model::user::login(&state.db, &username, &password).await? else {
        let markup = login_form(Some("invalid username or password"));
        return Ok(shell::document(markup, "log in", None).into_response());
    };

    let session = model::session::create(&state.db, user_id).await?;
    metrics::get().sessions_issued_total.inc();

    let cookie = Cookie::build((auth::COOKIE_NAME, session.token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .expires(session.expires);

    jar = jar.add(cookie);
    let destination = query.redirect.unwrap_or_else(|| "/dashboard".to_string());
    Ok((jar, Redirect::to(&destination)).into_response())
}
