use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use gearhub_api::{AppState, AppStateInner, auth};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gearhub=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let jwt_secret =
        std::env::var("GEARHUB_JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
    let db_path = std::env::var("GEARHUB_DB_PATH").unwrap_or_else(|_| "gearhub.db".into());
    let host = std::env::var("GEARHUB_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("GEARHUB_PORT")
        .unwrap_or_else(|_| "8001".into())
        .parse()?;
    let root_password =
        std::env::var("GEARHUB_ROOT_PASSWORD").unwrap_or_else(|_| "Mouse123890!".into());

    // Init database
    let db = gearhub_db::Database::open(&PathBuf::from(&db_path))?;

    // Idempotent bootstrap: a failure here is logged, not fatal.
    match auth::ensure_root_user(&db, &root_password) {
        Ok(true) => info!("Seeded root owner account"),
        Ok(false) => info!("Root owner account already present"),
        Err(e) => warn!("Root bootstrap failed: {e:#}"),
    }

    let state: AppState = Arc::new(AppStateInner { db, jwt_secret });

    let app = gearhub_api::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("GearHub server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
