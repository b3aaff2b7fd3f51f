use tracing::{info, warn};

use crate::domain::entities::Identity;
use crate::domain::errors::{SessionError, TokenDecodeError};
use crate::domain::ports::{Clock, SessionStorage, TokenDecoder};

// Durable storage keys. All three are written together and cleared together.
pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "userRole";
pub const SUBJECT_KEY: &str = "userId";

const SESSION_KEYS: [&str; 3] = [TOKEN_KEY, ROLE_KEY, SUBJECT_KEY];

/// Single owner of "who is logged in and with what role".
///
/// The manager is the only writer of the session; consumers read through
/// [`SessionManager::current_identity`]. Only the stored token is
/// authoritative: the role and subject fields are derived on every login and
/// never read back.
pub struct SessionManager<S, C, D> {
    storage: S,
    clock: C,
    decoder: D,
    token: Option<String>,
    identity: Option<Identity>,
}

impl<S, C, D> SessionManager<S, C, D>
where
    S: SessionStorage,
    C: Clock,
    D: TokenDecoder,
{
    // Create a manager with no session; call `initialize` to restore one.
    pub fn new(storage: S, clock: C, decoder: D) -> Self {
        Self {
            storage,
            clock,
            decoder,
            token: None,
            identity: None,
        }
    }

    /// Restore the session from durable storage.
    ///
    /// Behaves like `login(stored_token)` when the stored token decodes and
    /// like `logout()` otherwise. Never fails.
    pub fn initialize(&mut self) -> Option<&Identity> {
        self.token = None;
        self.identity = None;

        let stored = match self.storage.get(TOKEN_KEY) {
            Ok(Some(token)) => token,
            Ok(None) => {
                // Leftover role/subject fields without a token are stale.
                self.clear_storage();
                return None;
            }
            Err(err) => {
                warn!(error = %err, "failed to read stored session token");
                return None;
            }
        };

        if let Err(err) = self.login(&stored) {
            warn!(error = %err, "stored session token rejected; clearing session");
            self.logout();
            return None;
        }

        self.current_identity()
    }

    /// Start a session from a bearer token.
    ///
    /// A token that fails to decode leaves both stored and in-memory state
    /// untouched. A storage failure while persisting leaves the manager
    /// logged out.
    pub fn login(&mut self, token: &str) -> Result<Identity, SessionError> {
        let identity = self.decode(token).map_err(|err| {
            info!(error = %err, "bearer token rejected");
            SessionError::Decode(err)
        })?;

        if let Err(err) = self.persist(token, &identity) {
            warn!(error = %err, "failed to persist session; clearing partial state");
            self.logout();
            return Err(SessionError::StorageFailure);
        }

        info!(
            subject = %identity.subject,
            roles = %identity.role_label(),
            expires_at = identity.expires_at,
            "session started"
        );
        self.token = Some(token.to_string());
        self.identity = Some(identity.clone());
        Ok(identity)
    }

    // Clear persisted and in-memory session state. Returns whether a session was active.
    pub fn logout(&mut self) -> bool {
        self.token = None;
        let was_active = self.identity.take().is_some();
        self.clear_storage();

        if was_active {
            info!("session ended");
        }
        was_active
    }

    // In-memory identity; an expired one reads as absent. Never touches storage.
    pub fn current_identity(&self) -> Option<&Identity> {
        let now = self.clock.now_epoch_seconds();
        self.identity
            .as_ref()
            .filter(|identity| !identity.is_expired_at(now))
    }

    // Bearer token of the live session, for attaching to backend requests.
    pub fn token(&self) -> Option<&str> {
        self.current_identity()?;
        self.token.as_deref()
    }

    fn decode(&self, token: &str) -> Result<Identity, TokenDecodeError> {
        let identity = self.decoder.decode(token)?;
        if identity.is_expired_at(self.clock.now_epoch_seconds()) {
            return Err(TokenDecodeError::Expired {
                expired_at: identity.expires_at,
            });
        }
        Ok(identity)
    }

    fn persist(&self, token: &str, identity: &Identity) -> Result<(), String> {
        self.storage.set(SUBJECT_KEY, &identity.subject)?;
        self.storage.set(ROLE_KEY, &identity.role_label())?;
        self.storage.set(TOKEN_KEY, token)
    }

    fn clear_storage(&self) {
        for key in SESSION_KEYS {
            if let Err(err) = self.storage.remove(key) {
                warn!(key, error = %err, "failed to clear stored session field");
            }
        }
    }
}
