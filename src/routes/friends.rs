use axum::Router;
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use crate::middleware::auth::Session;
use crate::model;
use crate::routes::{AppError, shell};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/friends", get(page_friends))
}

async fn page_friends(state: AppState, session: Session) -> Result<Response, AppError> {
    let user = model::user::get_by_id(&state.db, session.id)
        .await?
        .ok_or(AppError::NotFound)?;
    let others = model::user::list_others(&state.db, session.id).await?;

    let markup = maud::html! {
        h2 .text-xl .mb-4 { "Hello, " (user.username) "!" }

        @if others.is_empty() {
            p .text-gray-600 { "Nobody else has joined yet." }
        } @else {
            p .mb-2 { "Other writers on quill:" }
            ul {
                @for other in &others {
                    li { (other.username) }
                }
            }
        }
    };

    Ok(shell::document(markup, "friends", session).into_response())
}
