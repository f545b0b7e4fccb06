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
        .route("/dashboard", get(page_dashboard))
        .route("/dashboard/new", get(page_new_post))
        .route("/dashboard/new", post(do_create_post))
        .route("/dashboard/edit/{id}", get(page_edit_post))
        .route("/dashboard/edit/{id}", post(do_edit_post))
        .route("/dashboard/delete", post(do_delete_post))
}

async fn page_dashboard(state: AppState, session: Session) -> Result<Response, AppError> {
    let posts = model::post::list_by_user(&state.db, session.id).await?;

    let markup = maud::html! {
        h2 .text-xl .mb-4 { (session.username) "'s posts" }

        @if posts.is_empty() {
            p .text-gray-600 .mb-4 {
                "No posts yet. " a .underline href="/dashboard/new" { "Write one" } "."
            }
        } @else {
            div .mb-4 {
                @for post in &posts {
                    div .border-solid .border-1 .border-gray-300 .p-3 .mb-2 .flex .justify-between .items-center {
                        div .flex-1 {
                            a .text-blue-600 .hover:underline href=(format!("/post/{}", post.id)) {
                                (post.title)
                            }
                            span .text-gray-500 .text-sm .ml-3 {
                                (shell::format_date(post.created_at))
                            }
                            a .text-sm .underline .ml-3 href=(format!("/dashboard/edit/{}", post.id)) {
                                "edit"
                            }
                        }
                        form method="post" action="/dashboard/delete" .ml-2 {
                            input type="hidden" name="post_id" value=(post.id);
                            button .text-red-600 .hover:underline .text-sm type="submit" { "delete" }
                        }
                    }
                }
            }
        }

        div .mt-6 {
            a .text-neutral-50 .bg-blue-500 .hover:bg-blue-600 .border-neutral-700 .border-solid .border-1 .px-3 .py-1 .no-underline .inline-block href="/dashboard/new" {
                "New Post"
            }
        }
    };

    Ok(shell::document(markup, "dashboard", session).into_response())
}

#[derive(Deserialize)]
struct PostForm {
    title: String,
    body: String,
}

impl Validate for PostForm {
    fn validate(&self) -> Result<(), ValidationError> {
        validate::required(&self.title, "title must not be empty")?;
        validate::required(&self.body, "body must not be empty")
    }
}

fn post_form(action: &str, submit: &str, title: &str, body: &str) -> maud::Markup {
    maud::html! {
        form method="post" action=(action) {
            label for="title" { "Title" }
            input .border-solid .border-1 .w-full type="text" name="title" value=(title) required;

            label for="body" { "Body" }
            textarea .border-solid .border-1 .w-full name="body" rows="8" required { (body) }

            input .text-neutral-50 .bg-blue-500 .border-neutral-700 .border-solid .border-1 type="submit" value=(submit);
        }
    }
}

async fn page_new_post(session: Session) -> maud::Markup {
    let markup = maud::html! {
        h2 .text-xl .mb-4 { "New post" }
        (post_form("/dashboard/new", "Publish", "", ""))
    };

    shell::document(markup, "new post", session)
}

async fn do_create_post(
    state: AppState,
    session: Session,
    Form(form): Form<PostForm>,
) -> Result<Redirect, AppError> {
    form.validate()?;

    model::post::create(&state.db, session.id, &form.title, &form.body).await?;
    metrics::get().posts_created_total.inc();

    Ok(Redirect::to("/dashboard"))
}

async fn page_edit_post(
    state: AppState,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let post = model::post::get(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;

    // Don't reveal other people's edit pages.
    if post.user_id != session.id {
        return Err(AppError::NotFound);
    }

    let markup = maud::html! {
        h2 .text-xl .mb-4 { "Edit post" }
        (post_form(&format!("/dashboard/edit/{}", post.id), "Save", &post.title, &post.body))

        @if !post.comments.is_empty() {
            section .mt-6 {
                h3 .text-lg .mb-2 { "Comments" }
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
    };

    Ok(shell::document(markup, "edit post", session).into_response())
}

async fn do_edit_post(
    state: AppState,
    session: Session,
    Path(id): Path<i32>,
    Form(form): Form<PostForm>,
) -> Result<Redirect, AppError> {
    form.validate()?;

    let updated = model::post::update(&state.db, session.id, id, &form.title, &form.body).await?;
    if !updated {
        return Err(AppError::NotFound);
    }

    Ok(Redirect::to("/dashboard"))
}

#[derive(Deserialize)]
struct DeletePostForm {
    post_id: i32,
}

async fn do_delete_post(
    state: AppState,
    session: Session,
    Form(form): Form<DeletePostForm>,
) -> Result<Redirect, AppError> {
    let deleted = model::post::delete(&state.db, session.id, form.post_id).await?;
    if !deleted {
        return Err(AppError::NotFound);
    }

    Ok(Redirect::to("/dashboard"))
}
