use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Value, json};

use crate::domain::backend::{HotelBackend, LoginCredentials, LoginGrant};
use crate::domain::entities::Booking;
use crate::domain::errors::BackendError;
use crate::domain::ports::{Clock, SessionStorage};

pub(crate) type StorageTable = Arc<Mutex<HashMap<String, String>>>;

// Expiry far enough ahead that the system clock never reaches it in tests.
pub(crate) const FAR_FUTURE: u64 = 4_102_444_800;

// Shared fixed time source for deterministic use-case tests.
pub(crate) struct FixedClock(pub(crate) u64);

impl Clock for FixedClock {
    fn now_epoch_seconds(&self) -> u64 {
        self.0
    }
}

// Clock whose time can be moved forward after the manager owns it.
#[derive(Clone)]
pub(crate) struct ManualClock(pub(crate) Arc<Mutex<u64>>);

impl ManualClock {
    pub(crate) fn starting_at(now: u64) -> Self {
        Self(Arc::new(Mutex::new(now)))
    }

    pub(crate) fn set(&self, now: u64) {
        *self.0.lock().expect("clock mutex poisoned") = now;
    }
}

impl Clock for ManualClock {
    fn now_epoch_seconds(&self) -> u64 {
        *self.0.lock().expect("clock mutex poisoned")
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub get: bool,
    pub set: bool,
    pub remove: bool,
}

#[derive(Clone)]
pub(crate) struct RecordingStorage {
    values: StorageTable,
    failures: FailureFlags,
}

impl RecordingStorage {
    pub(crate) fn new() -> Self {
        Self {
            values: Arc::new(Mutex::new(HashMap::new())),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn seed(&self, key: &str, value: &str) {
        let mut guard = self.values.lock().expect("storage mutex poisoned");
        guard.insert(key.to_string(), value.to_string());
    }

    pub(crate) fn value(&self, key: &str) -> Option<String> {
        let guard = self.values.lock().expect("storage mutex poisoned");
        guard.get(key).cloned()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.values.lock().expect("storage mutex poisoned").is_empty()
    }
}

impl SessionStorage for RecordingStorage {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        if self.failures.get {
            return Err("get failed".to_string());
        }
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        if self.failures.set {
            return Err("set failed".to_string());
        }
        self.seed(key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        if self.failures.remove {
            return Err("remove failed".to_string());
        }
        let mut guard = self.values.lock().expect("storage mutex poisoned");
        guard.remove(key);
        Ok(())
    }
}

// Build an unsigned JWT carrying the given payload.
pub(crate) fn encode_token(payload: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{payload}.test-signature")
}

// Token shaped like the ones issued by the hotel backend.
pub(crate) fn token_for(subject: &str, roles: &[&str], expires_at: u64) -> String {
    encode_token(&json!({
        "sub": subject,
        "roles": roles,
        "iat": 1_700_000_000u64,
        "exp": expires_at,
    }))
}

pub(crate) fn booking(id: u64, check_in: &str, check_out: &str) -> Booking {
    Booking {
        id,
        check_in_date: check_in.to_string(),
        check_out_date: check_out.to_string(),
        guest_name: format!("Guest {id}"),
        guest_email: "guest@hotel.test".to_string(),
        total_num_of_guests: 2,
        booking_confirmation_code: format!("CONF-{id}"),
        room: None,
    }
}

// Backend fake that records the bearer token it was called with.
#[derive(Clone, Default)]
pub(crate) struct StubBackend {
    // None makes login answer like the backend does for bad credentials.
    pub(crate) grant_token: Option<String>,
    pub(crate) bookings: Vec<Booking>,
    pub(crate) fail_listing: bool,
    pub(crate) seen_tokens: Arc<Mutex<Vec<String>>>,
}

impl StubBackend {
    pub(crate) fn seen_tokens(&self) -> Vec<String> {
        self.seen_tokens
            .lock()
            .expect("tokens mutex poisoned")
            .clone()
    }

    fn record(&self, token: &str) -> Result<(), BackendError> {
        self.seen_tokens
            .lock()
            .expect("tokens mutex poisoned")
            .push(token.to_string());
        if self.fail_listing {
            return Err(BackendError::Transport("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl HotelBackend for StubBackend {
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginGrant, BackendError> {
        match &self.grant_token {
            Some(token) => Ok(LoginGrant {
                id: Some(1),
                email: credentials.email.clone(),
                token: token.clone(),
                roles: Vec::new(),
            }),
            None => Err(BackendError::Upstream {
                status: 401,
                message: Some("Bad credentials".to_string()),
            }),
        }
    }

    async fn all_bookings(&self, token: &str) -> Result<Vec<Booking>, BackendError> {
        self.record(token)?;
        Ok(self.bookings.clone())
    }

    async fn bookings_for_user(
        &self,
        email: &str,
        token: &str,
    ) -> Result<Vec<Booking>, BackendError> {
        self.record(token)?;
        Ok(self
            .bookings
            .iter()
            .filter(|booking| booking.guest_email == email)
            .cloned()
            .collect())
    }
}
