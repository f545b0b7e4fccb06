use axum::Router;
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use crate::middleware::auth::Session;
use crate::model;
use crate::model::post::Post;
use crate::routes::{AppError, shell};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(page_home))
}

async fn page_home(state: AppState, session: Option<Session>) -> Result<Response, AppError> {
    let posts = model::post::list_all(&state.db).await?;

    let markup = maud::html! {
        @if posts.is_empty() {
            p .text-gray-600 { "Nothing has been posted yet." }
        } @else {
            @for post in &posts {
                (post_card(post))
            }
        }
    };

    Ok(shell::document(markup, "home", session).into_response())
}

fn post_card(post: &Post) -> maud::Markup {
    maud::html! {
        article .border-solid .border-1 .border-gray-300 .p-4 .mb-4 {
            h2 .text-xl {
                a .hover:underline href=(format!("/post/{}", post.id)) { (post.title) }
            }
            div .text-sm .text-gray-600 .mb-2 {
                "by " (post.author) " on " (shell::format_date(post.created_at))
            }
            p .mb-2 { (post.body) }

            @if !post.comments.is_empty() {
                details {
                    summary .text-sm .text-gray-600 {
                        (post.comments.len()) " comment" @if post.comments.len() != 1 { "s" }
                    }
                    @for comment in &post.comments {
                        div .border-t .border-gray-200 .pt-2 .mt-2 {
                            span .text-sm .text-gray-600 {
                                (comment.author) " on " (shell::format_date(comment.created_at))
                            }
                            p { (comment.body) }
                        }
                    }
                }
            }
        }
    }
}
