use axum::{
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use recall_core::{store::memory::MemoryStore, ReviewService, StreakTracker};

use crate::api::routes::{self, AppState};
use crate::cli::opts::Cli;

pub async fn run(args: Cli) -> anyhow::Result<()> {
    let store = Arc::new(MemoryStore::new());
    let streaks = Arc::new(StreakTracker::new());
    let service = Arc::new(
        ReviewService::new(store.clone(), streaks.clone())
            .with_lock_wait(Duration::from_millis(args.lock_wait_ms)),
    );

    let state = Arc::new(AppState {
        service,
        store,
        streaks,
        default_limit: args.queue_limit,
    });

    let app = Router::new()
        .route("/review", post(routes::post_review))
        .route("/queue", get(routes::get_queue))
        .route("/enroll", post(routes::post_enroll))
        .route("/streak", get(routes::get_streak))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = args.addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "review scheduler listening");
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
