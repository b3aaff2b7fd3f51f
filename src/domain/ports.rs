use crate::domain::entities::Identity;
use crate::domain::errors::TokenDecodeError;

// Port for the durable string key/value store backing the session.
// Reads and writes are local and fast, so the port is synchronous.
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove(&self, key: &str) -> Result<(), String>;
}

impl<T> SessionStorage for Box<T>
where
    T: SessionStorage + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        (**self).remove(key)
    }
}

// Port for turning a bearer token into claims.
pub trait TokenDecoder: Send + Sync {
    fn decode(&self, token: &str) -> Result<Identity, TokenDecodeError>;
}

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now_epoch_seconds(&self) -> u64;
}
