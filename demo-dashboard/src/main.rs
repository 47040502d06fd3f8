use axum::{
    Router,
    routing::{get, post},
};
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod errors;
mod handlers;
mod server;

use crate::{
    handlers::{callback, change_organisation, dashboard, index, logout},
    server::spawn_http_server,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Connect to the data store and declare the users table
    xero_light::init().await?;

    let app = Router::new()
        .route("/", get(index))
        .route("/dashboard", get(dashboard))
        .route("/callback", get(callback))
        .route("/change_organisation", post(change_organisation))
        .route("/logout", get(logout));

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    spawn_http_server(port, app).await?;
    Ok(())
}
