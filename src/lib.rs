pub mod config;
pub mod db;
pub mod jobs;
pub mod metrics;
pub mod middleware;
pub mod model;
pub mod routes;
pub mod signal;
pub mod state;
pub mod validate;
