use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;

use crate::domain::backend::HotelBackend;
use crate::domain::ports::{Clock, SessionStorage};
use crate::interface_adapters::token::JwtPayloadDecoder;
use crate::use_cases::session::SessionManager;

// The one session owned by this front-end process.
pub type ViewSession = SessionManager<Box<dyn SessionStorage>, SystemClock, JwtPayloadDecoder>;

#[derive(Clone)]
pub struct AppState {
    // Handlers take the write lock only for login and logout.
    pub session: Arc<RwLock<ViewSession>>,
    // We use Arc<dyn Trait> to hold any implementation (dependency injection).
    pub backend: Arc<dyn HotelBackend>,
}

impl AppState {
    // Wrap storage and backend, restoring any session left by a previous run.
    pub fn restore(storage: Box<dyn SessionStorage>, backend: Arc<dyn HotelBackend>) -> Self {
        let mut session = SessionManager::new(storage, SystemClock, JwtPayloadDecoder);
        match session.initialize() {
            Some(identity) => {
                tracing::info!(subject = %identity.subject, "restored stored session")
            }
            None => tracing::debug!("no stored session to restore"),
        }

        Self {
            session: Arc::new(RwLock::new(session)),
            backend,
        }
    }
}

// System clock adapter used by the session manager.
#[derive(Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_seconds(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}
