use std::sync::Arc;

use tokio::signal;
use tracing::info;

use wordly_core::WordPool;
use wordly_server::{
    admin::AdminAuth, config::Config, create_routes, dictionary::DictionaryApi, engine::GameEngine,
};
use wordly_store::connection::connect_and_migrate;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Wordly server...");

    let config = Config::new();

    // The admin credential is the one resource the server refuses to run
    // without.
    let admin = match AdminAuth::load(&config.admin_code_file) {
        Ok(admin) => Arc::new(admin),
        Err(e) => {
            tracing::error!("Failed to load admin code: {:#}", e);
            tracing::error!(
                "Create '{}' containing the shared admin secret, or point ADMIN_CODE_FILE at it.",
                config.admin_code_file
            );
            std::process::exit(1);
        }
    };

    let pool = match std::fs::read_to_string(&config.candidate_words_file) {
        Ok(text) => WordPool::parse(&text),
        Err(e) => {
            tracing::warn!(
                "Failed to read candidate words from '{}': {}. New games will use the fallback word.",
                config.candidate_words_file,
                e
            );
            WordPool::default()
        }
    };
    info!("Loaded {} candidate words", pool.len());

    // Connect and run migrations
    let db = match connect_and_migrate(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to database and run migrations: {}", e);
            std::process::exit(1);
        }
    };

    let oracle = Arc::new(DictionaryApi::new(config.dictionary_api_url.clone()));
    let engine = Arc::new(GameEngine::new(db, pool, oracle, config.max_guesses));

    let routes = create_routes(engine, admin);

    info!("Server starting on {}:{}", config.host, config.port);

    let addr = (
        config.host.parse::<std::net::IpAddr>().expect("Invalid HOST"),
        config.port,
    );

    let (addr, server) = warp::serve(routes).bind_with_graceful_shutdown(addr, async {
        // Wait for SIGINT (Ctrl+C) or SIGTERM
        #[cfg(unix)]
        {
            let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt()).unwrap();
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate()).unwrap();

            tokio::select! {
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully...");
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            signal::ctrl_c().await.expect("Failed to listen for ctrl+c");
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    });

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
}
