use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::domain::backend::{HotelBackend, LoginCredentials, LoginGrant};
use crate::domain::entities::Booking;
use crate::domain::errors::BackendError;

// Thin wrapper around reqwest for the hotel REST backend.
#[derive(Clone)]
pub struct HotelApiClient {
    http: Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorResponse {
    message: String,
}

impl HotelApiClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    // Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                BackendError::Transport(format!("{} cannot be a base url", self.base_url))
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    async fn get_bookings(&self, url: Url, token: &str) -> Result<Vec<Booking>, BackendError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|err| BackendError::Transport(err.to_string()))?;

        read_json(response).await
    }
}

// Keep upstream status/message so views can tell rejections from outages.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<UpstreamErrorResponse>()
            .await
            .ok()
            .map(|payload| payload.message);
        return Err(BackendError::Upstream {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|err| BackendError::Decode(err.to_string()))
}

#[async_trait]
impl HotelBackend for HotelApiClient {
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginGrant, BackendError> {
        let url = self.endpoint(&["auth", "login"])?;
        let response = self
            .http
            .post(url)
            .json(credentials)
            .send()
            .await
            .map_err(|err| BackendError::Transport(err.to_string()))?;

        read_json(response).await
    }

    async fn all_bookings(&self, token: &str) -> Result<Vec<Booking>, BackendError> {
        let url = self.endpoint(&["bookings", "all-bookings"])?;
        self.get_bookings(url, token).await
    }

    async fn bookings_for_user(
        &self,
        email: &str,
        token: &str,
    ) -> Result<Vec<Booking>, BackendError> {
        let url = self.endpoint(&["bookings", "user", email, "bookings"])?;
        self.get_bookings(url, token).await
    }
}
