use std::{env, path::PathBuf, time::Duration};
use url::Url;

// Runtime settings, read from the environment with local-development defaults.

pub fn http_port() -> u16 {
    env::var("HOTEL_FRONTEND_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000)
}

pub fn hotel_api_url() -> Result<Url, url::ParseError> {
    let raw = env::var("HOTEL_API_URL").unwrap_or_else(|_| "http://localhost:9192".to_string());
    Url::parse(&raw)
}

pub fn hotel_api_timeout() -> Duration {
    let millis = env::var("HOTEL_API_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(5000);
    Duration::from_millis(millis)
}

// File that keeps the session across restarts. An empty value keeps it in
// memory only.
pub fn session_store_path() -> Option<PathBuf> {
    match env::var("SESSION_STORE_PATH") {
        Ok(value) if value.trim().is_empty() => None,
        Ok(value) => Some(PathBuf::from(value)),
        Err(_) => Some(PathBuf::from(".hotel_session.toml")),
    }
}
