use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

mod config;
mod data;
mod features;
mod handlers;
mod schema;
mod utils;

#[cfg(test)]
mod test_support;

use config::DictionaryConfig;
use features::lookup::DictionaryService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration (.env, DICT_CONFIG, DICT_PORT)
    let config = DictionaryConfig::load().context("Failed to load dictionary configuration")?;
    init_logging(&config.log_level);

    log::info!(
        "Serving {:?} from {:?} with the {:?} profile",
        config.name,
        config.mdx_path,
        config.profile
    );
    match &config.mdd_path {
        Some(path) => log::info!("Attachments from {:?}", path),
        None => log::info!("No attachment database configured"),
    }

    let address = config.bind_address();
    let service = Arc::new(DictionaryService::open(config)?);
    let app = handlers::build_router(service);

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;

    log::info!("Server running on http://{}", address);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

// RUST_LOG wins over the configured level
fn init_logging(default_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}
