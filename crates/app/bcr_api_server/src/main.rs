//! BCR API server binary.

use std::sync::Arc;

use bcr_api::config::ApiConfig;
use bcr_core::auth::MemoryCredentialStore;
use clap::Parser;
use tracing::info;

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "bcr_api_server", about = "BCR API server")]
struct Args {
    /// Address to listen on. Overrides `BIND_ADDR`.
    #[arg(long)]
    bind_addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,bcr_api=debug,bcr_core=debug".into()),
        )
        .init();

    let args = Args::parse();

    // A missing signing key aborts startup here.
    let mut config = ApiConfig::from_env()?;
    if let Some(bind_addr) = args.bind_addr {
        config.bind_addr = bind_addr;
    }

    info!(
        version = bcr_core::version(),
        bcrypt_cost = config.auth.bcrypt_cost,
        token_ttl_secs = config.auth.token_ttl.map(|ttl| ttl.num_seconds()),
        "starting bcr_api_server"
    );

    let store = Arc::new(MemoryCredentialStore::new());
    let state = bcr_api::AppState::new(store, &config.auth)?;
    let app = bcr_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app).await?;

    Ok(())
}
