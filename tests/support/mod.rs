// Shared helpers for integration tests.
#![allow(dead_code)]

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::json;
use std::path::PathBuf;

// Expiry far enough ahead that the system clock never reaches it.
pub const FAR_FUTURE: u64 = 4_102_444_800;

// Unsigned JWT shaped like the ones the hotel backend issues.
pub fn token_for(subject: &str, roles: &[&str], expires_at: u64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        json!({
            "sub": subject,
            "roles": roles,
            "iat": 1_700_000_000u64,
            "exp": expires_at,
        })
        .to_string(),
    );
    format!("{header}.{payload}.signature")
}

// Unique path inside a fresh temp directory, so tests never share a file.
pub fn temp_session_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("hotel-session-it-{}", uuid::Uuid::new_v4()))
        .join("session.toml")
}
