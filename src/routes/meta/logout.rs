use axum::response::Redirect;
use axum::routing::get;
use axum_extra::extract::CookieJar;

use crate::middleware::auth;
use crate::model;
use crate::routes::AppError;
use crate::state::AppState;

pub fn routes() -> axum::Router<AppState> {
    axum::Router::new().route("/logout", get(page_logout))
}

async fn page_logout(
    state: AppState,
    mut jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    if let Some(cookie) = jar.get(auth::COOKIE_NAME) {
        model::session::delete(&state.db, cookie.value()).await?;
    }

    jar = jar.remove(auth::COOKIE_NAME);
    Ok((jar, Redirect::to("/")))
}
