use serde::{Deserialize, Serialize};

use crate::domain::entities::{Booking, DateRange, Identity};

// Request payload for view login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    // Path the user was heading to before being sent to the login view.
    #[serde(default)]
    pub redirect: Option<String>,
}

// Identity fields exposed to navigation and guarded views.
#[derive(Debug, Serialize)]
pub struct IdentityResponse {
    pub subject: String,
    pub roles: Vec<String>,
    pub is_admin: bool,
    pub expires_at: u64,
}

impl From<&Identity> for IdentityResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            subject: identity.subject.clone(),
            roles: identity.roles.clone(),
            is_admin: identity.is_admin(),
            expires_at: identity.expires_at,
        }
    }
}

// Response payload for view login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub identity: IdentityResponse,
    pub redirect: String,
}

// Response payload for logout.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub logged_out: bool,
}

// Optional date window for booking listings. Either bound missing means no filter.
#[derive(Debug, Default, Deserialize)]
pub struct BookingsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AppliedRange {
    pub start_date: String,
    pub end_date: String,
}

impl From<DateRange> for AppliedRange {
    fn from(range: DateRange) -> Self {
        Self {
            start_date: range.start().to_string(),
            end_date: range.end().to_string(),
        }
    }
}

// Response payload for booking listings.
#[derive(Debug, Serialize)]
pub struct BookingsResponse {
    pub total: usize,
    pub range: Option<AppliedRange>,
    pub bookings: Vec<Booking>,
}

// Simple error envelope for JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}
