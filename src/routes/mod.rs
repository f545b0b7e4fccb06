mod assets;
mod dashboard;
mod error;
mod friends;
mod home;
mod meta;
mod post;
pub mod shell;

pub use error::AppError;

use crate::state::AppState;

pub fn routes() -> axum::Router<AppState> {
    axum::Router::new()
        .merge(assets::routes())
        .merge(home::routes())
        .merge(post::routes())
        .merge(dashboard::routes())
        .merge(friends::routes())
        .merge(meta::routes())
}
