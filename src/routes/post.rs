use axum::Router;
use axum::extract::{Form, Path};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use serde::Deserialize;

use crate::middleware::auth::Session;
use crate::routes::{AppError, shell};
use crate::state::AppState;
use crate::validate::{self, Validate, ValidationError};
use crate::{metrics, model};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/post/{id}", get(page_post))
        .route("/post/{id}/comments", post(do_create_comment))
}

async fn page_post(
    state: AppState,
    Path(id): Path<i32>,
    session: Option<Session>,
) -> Result<Response, AppError> {
    let post = model::post::get(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;

    let markup = maud::html! {
        article .mb-4 {
            h2 .text-xl { (post.title) }
            div .text-sm .text-gray-600 .mb-2 {
                "by " (post.author) " on " (shell::format_date(post.created_at))
            }
            p { (post.body) }
        }

        section {
            h3 .text-lg .mb-2 { "Comments" }

            @if post.comments.is_empty() {
                p .text-gray-600 { "No comments yet." }
            } @else {
                @for comment in &post.comments {
                    div .border-t .border-gray-200 .pt-2 .mt-2 {
                        span .text-sm .text-gray-600 {
                            (comment.author) " on " (shell::format_date(comment.created_at))
                        }
                        p { (comment.body) }
                    }
                }
            }

            @if session.is_some() {
                form .mt-4 method="post" action=(format!("/post/{}/comments", post.id)) {
                    label for="body" { "Add a comment" }
                    textarea .border-solid .border-1 .w-full name="body" rows="3" required {}
                    input .text-neutral-50 .bg-blue-500 .border-neutral-700 .border-solid .border-1 type="submit" value="Comment";
                }
            } @else {
                p .mt-4 {
                    a .underline href=(format!("/login?redirect=%2Fpost%2F{}", post.id)) { "Log in" }
                    " to comment."
                }
            }
        }
    };

    Ok(shell::document(markup, &post.title, session).into_response())
}

#[derive(Deserialize)]
struct CommentForm {
    body: String,
}

impl Validate for CommentForm {
    fn validate(&self) -> Result<(), ValidationError> {
        validate::required(&self.body, "comment body must not be empty")
    }
}

async fn do_create_comment(
    state: AppState,
    session: Session,
    Path(id): Path<i32>,
    Form(form): Form<CommentForm>,
) -> Result<Redirect, AppError> {
    form.validate()?;

    let created = model::comment::create(&state.db, id, session.id, form.body).await?;
    if !created {
        return Err(AppError::NotFound);
    }

    metrics::get().comments_created_total.inc();
    Ok(Redirect::to(&format!("/post/{id}")))
}
