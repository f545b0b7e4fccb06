pub mod auth;
pub mod panic;
pub mod trace;
