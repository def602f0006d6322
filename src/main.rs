use std::net::SocketAddr;
use std::time::Duration;
use tokio::task;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mimalloc::MiMalloc;

use venue_console::{app, config::Config, AppState};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Billetter Venue Console ({})",
        config.app.environment
    );

    // Create the shared application state
    let state = AppState::new(config.clone()).expect("Failed to initialize application state");

    // --- Start background tasks ---

    // Task to purge abandoned venue drafts
    if config.features.enable_draft_cleanup {
        let interval = Duration::from_secs(config.drafts.cleanup_interval_seconds);
        let state_for_bg = state.clone();
        task::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                state_for_bg.drafts.purge_expired().await;
            }
        });
    }

    // --- Start the web server ---

    let router = app(state);

    let addr: SocketAddr = format!("{}:{}", config.app.host, config.app.port)
        .parse()
        .expect("HOST and PORT must form a valid socket address");
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, router.into_make_service())
        .await
        .unwrap();
}
