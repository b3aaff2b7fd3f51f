use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::domain::entities::Booking;
use crate::domain::errors::BackendError;

// The serialization within this layer is a dependency leak, but it keeps the
// backend payloads in one place.
// Credentials posted to the backend login endpoint.
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

// Successful login payload returned by the backend.
#[derive(Clone, Debug, Deserialize)]
pub struct LoginGrant {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub email: String,
    pub token: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

// Views depend on this trait, not on the concrete REST client.
#[async_trait]
pub trait HotelBackend: Send + Sync {
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginGrant, BackendError>;
    async fn all_bookings(&self, token: &str) -> Result<Vec<Booking>, BackendError>;
    async fn bookings_for_user(
        &self,
        email: &str,
        token: &str,
    ) -> Result<Vec<Booking>, BackendError>;
}

#[async_trait]
impl<T> HotelBackend for Arc<T>
where
    T: HotelBackend + ?Sized,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginGrant, BackendError> {
        (**self).login(credentials).await
    }

    async fn all_bookings(&self, token: &str) -> Result<Vec<Booking>, BackendError> {
        (**self).all_bookings(token).await
    }

    async fn bookings_for_user(
        &self,
        email: &str,
        token: &str,
    ) -> Result<Vec<Booking>, BackendError> {
        (**self).bookings_for_user(email, token).await
    }
}
