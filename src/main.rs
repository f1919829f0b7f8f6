use dotenvy::dotenv;
use rsvp::logging::init_tracing;
use rsvp::router::init_router;
use rsvp::state::init_app_state;
use tracing::info;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    let state = init_app_state().await;
    let bind_address = state.server_config.bind_address.clone();
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind {bind_address}: {e}"));
    info!(address = %bind_address, "Server listening");
    info!("OpenAPI document at /api-docs/openapi.json");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
