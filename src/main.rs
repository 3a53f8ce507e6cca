use std::net::SocketAddr;
use std::sync::Arc;

use intake_backend::{
    build_router,
    config::{Config, LogFormat},
    database::{
        memory::MemoryApplicationStore,
        pool::{create_pool, run_migrations},
        postgres::PgApplicationStore,
        store::ApplicationStore,
    },
    AppState,
};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let store: Arc<dyn ApplicationStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url, config.database_max_connections).await?;
            run_migrations(&pool).await?;
            info!("Connected to database, migrations applied");
            Arc::new(PgApplicationStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL is not set, applications are kept in memory only");
            Arc::new(MemoryApplicationStore::new())
        }
    };

    let addr: SocketAddr = config.server_address.parse()?;
    let app = build_router(AppState::new(config, store));

    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
