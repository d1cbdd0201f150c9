mod config;
mod database;
mod entities;
mod errors;
mod handlers;
mod handlers_utils;
mod interactors;
mod services;
mod utils;
mod value_objects;

use reqwest::Client;
use sea_orm::DatabaseConnection;
use std::{process, sync::Arc};
use telers::Bot;
use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

use config::Config;
use database::TxManager;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub database_conn: Arc<DatabaseConnection>,
    /// Absent when no token is configured
    pub bot: Option<Bot>,
    pub client: Client,
}

impl AppState {
    pub fn tx_manager(&self) -> TxManager {
        TxManager::new(self.database_conn.clone())
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let config_path = config::get_path();
    let config = match config::parse_from_fs(&*config_path).and_then(config::apply_env_overrides) {
        Ok(val) => val,
        Err(err) => {
            eprintln!("Parse config error: {err}");
            process::exit(1);
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("LOGGING_LEVEL"))
        .init();

    info!(path = %config_path, "Config loaded");

    let database_conn = match database::connect(&config.database).await {
        Ok(val) => Arc::new(val),
        Err(err) => {
            error!(%err, "Connect to database error");
            process::exit(1);
        }
    };

    let bot = config.bot.token.as_deref().map(Bot::new);
    if bot.is_none() {
        warn!("Bot token is not configured, media requests and chat replies are disabled");
    }

    let address = config.server.get_address();
    let state = AppState {
        config: Arc::new(config),
        database_conn: database_conn.clone(),
        bot,
        client: Client::new(),
    };

    let listener = match TcpListener::bind(&address).await {
        Ok(val) => val,
        Err(err) => {
            error!(%err, address, "Bind error");
            process::exit(1);
        }
    };
    info!(address, "Server started");

    if let Err(err) = axum::serve(listener, handlers::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(%err, "Server error");
    }

    match Arc::try_unwrap(database_conn) {
        Ok(database_conn) => {
            if let Err(err) = database_conn.close().await {
                error!(%err, "Close database conn error");
            }
        }
        Err(_) => warn!("Database conn is still in use, skip closing"),
    }
    info!("Server stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(%err, "Listen for Ctrl-C error");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => error!(%err, "Listen for SIGTERM error"),
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}
