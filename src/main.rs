use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bibliosearch::{config, server};

#[tokio::main]
async fn main() {
    // Load configuration
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bibliosearch=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = config::Config::from_env();
    tracing::info!(
        "Search endpoint {} (timeout {} ms)",
        config.search_url,
        config.search_timeout.as_millis()
    );

    if let Err(e) = server::serve(config).await {
        tracing::error!("Server stopped: {}", e);
        std::process::exit(1);
    }
}
