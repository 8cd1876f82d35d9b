//! Customer API server: reads settings from the environment (and `.env`),
//! ensures the `Customers` table exists, and serves the router.
//!
//! Run from repo root: `cargo run -p customer-server`

use customer_api::{build_router, connect, ensure_customers_table, AppState, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("customer_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let pool = connect(&settings).await?;
    ensure_customers_table(&pool).await?;

    let listener = TcpListener::bind(settings.bind_addr.as_str()).await?;
    let state = AppState::new(pool, settings);
    let app = build_router(state);
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
