use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use control_plane::{AppState, ServerSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Trading Bot Control Plane...");

    sheet_store::settings::load_dotenv();
    let settings = ServerSettings::from_env()?;

    // Refuse to start without spreadsheet credentials
    let sheets = sheet_store::connect_from_env()?;

    let state = Arc::new(AppState::new(sheets));
    let app = control_plane::app(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", settings.port)).await?;
    info!("🚀 Control Plane listening on port {}", settings.port);

    axum::serve(listener, app).await?;

    Ok(())
}
