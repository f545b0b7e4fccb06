use std::sync::LazyLock;

use anyhow::Result;
use axum::response::Response;
use axum::{Router, routing};
use prometheus::{
    self, Encoder, IntCounter, IntGauge, TextEncoder, register_int_counter, register_int_gauge,
};

use crate::state::AppState;

macro_rules! metrics {
    ($($t:ident, $name:ident, $desc:expr),*) => {
        pub struct Metrics {
            $(pub $name: $t),*
        }

        impl Metrics {
            fn register() -> Result<Self> {
                Ok(Self {
                    $($name: metrics!(
                        hook: $t,
                        concat!("quill_", stringify!($name)),
                        $desc
                    )?),*
                })
            }
        }
    };

    (hook: IntCounter, $($tail:tt)*) => { register_int_counter!($($tail)*) };
    (hook: IntGauge, $($tail:tt)*) => { register_int_gauge!($($tail)*) };
}

metrics! {
    IntCounter, http_requests_total, "http requests received",
    IntCounter, sessions_issued_total, "login sessions issued",
    IntCounter, posts_created_total, "posts created",
    IntCounter, comments_created_total, "comments created",
    IntGauge, db_pool_connections, "open database pool connections",
    IntGauge, db_pool_idle_connections, "idle database pool connections"
}

pub fn get() -> &'static Metrics {
    static METRICS: LazyLock<Metrics> = LazyLock::new(|| Metrics::register().unwrap());
    &METRICS
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/metrics", routing::get(handler))
}

async fn handler(state: AppState) -> Response {
    refresh(&state);
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    let format = encoder.format_type().to_string();

    Response::builder()
        .header("Content-Type", format)
        .status(200)
        .body(buffer.into())
        .unwrap()
}

fn refresh(state: &AppState) {
    let metrics = get();
    metrics.db_pool_connections.set(state.db.size() as i64);
    metrics
        .db_pool_idle_connections
        .set(state.db.num_idle() as i64);
}
