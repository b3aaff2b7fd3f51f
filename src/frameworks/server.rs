use crate::domain::ports::SessionStorage;
use crate::frameworks::config;
use crate::interface_adapters::clients::HotelApiClient;
use crate::interface_adapters::routes;
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::storage::{FileSessionStorage, InMemorySessionStorage};
use std::net::SocketAddr;
use std::sync::Arc;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn session_storage() -> Box<dyn SessionStorage> {
    match config::session_store_path() {
        Some(path) => {
            tracing::debug!(path = %path.display(), "session file configured.");
            Box::new(FileSessionStorage::new(path))
        }
        None => {
            tracing::warn!("SESSION_STORE_PATH is empty; session will not survive restarts");
            Box::new(InMemorySessionStorage::default())
        }
    }
}

pub async fn run() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    let api_url = match config::hotel_api_url() {
        Ok(url) => url,
        Err(e) => {
            tracing::error!(error = %e, "HOTEL_API_URL must be a valid url");
            return;
        }
    };
    tracing::debug!(api_url = %api_url, "hotel api client configured.");

    let backend = match HotelApiClient::new(api_url, config::hotel_api_timeout()) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!(error = %e, "failed to build hotel api client");
            return;
        }
    };

    let state = Arc::new(AppState::restore(session_storage(), backend));

    // Start the web server with the HTTP routes wired up.
    let app = routes::app(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config::http_port()));
    tracing::info!(%addr, "listening");

    // Bind TCP listener with error handling.
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind");
            return;
        }
    };

    // Serve app and report errors rather than panicking.
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
    }
}
