use anyhow::Result;
use axum::Router;
use tower::ServiceBuilder;
use tracing::{error, info};

use quill::config::Config;
use quill::state::{AppState, AppStateInner};
use quill::{db, jobs, metrics, middleware, routes, signal};

fn main() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .max_blocking_threads(8)
        .build()
        .unwrap()
        .block_on(run())
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .try_init()
        .unwrap();

    let config = Config::load(None).await?;
    let (ct, tt) = signal::bind();
    let db = db::connect(&config.database).await?;
    sqlx::migrate!().run(&db).await?;
    metrics::get();

    let state = AppState::new(AppStateInner {
        db,
        config,
        cancel_token: ct.clone(),
        task_tracker: tt.clone(),
    });

    let middleware = ServiceBuilder::new()
        .layer(axum::middleware::from_fn(middleware::trace::middleware))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::middleware,
        ))
        .layer(middleware::panic::middleware());

    let app = Router::new()
        .merge(routes::routes())
        .merge(metrics::routes())
        .layer(middleware)
        .with_state(state.clone());

    {
        let signal = ct.clone().cancelled_owned();
        let addr = format!("{}:{}", state.config.http.host, state.config.http.port);

        tt.spawn(async move {
            let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
            info!("http server worker starting on {}", addr);
            if let Err(err) = axum::serve(listener, app)
                .with_graceful_shutdown(signal)
                .await
            {
                error!("http server worker error: {}", err);
            }
        });
    }

    {
        let ct = ct.clone();
        let state = state.clone();

        tt.spawn(async move {
            let mut scheduler = jobs::Scheduler::new();
            info!("job scheduler starting");

            loop {
                tokio::select! {
                    _ = ct.cancelled() => break,
                    res = scheduler.run(&state) => {
                        if let Err(err) = res {
                            error!("job scheduler tick failed: {:?}", err);
                        }
                    }
                }
            }
        });
    }

    tt.wait().await;
    Ok(())
}
