use chrono::NaiveDate;
use std::fmt;

// Reasons a bearer token could not be turned into an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenDecodeError {
    // Not a `header.payload.signature` string.
    Malformed,
    // Payload segment is not base64url.
    InvalidEncoding,
    // Payload decoded but is not a claims object of the expected shape.
    InvalidPayload(String),
    MissingClaim(&'static str),
    Expired { expired_at: u64 },
}

impl fmt::Display for TokenDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenDecodeError::Malformed => write!(f, "token is not a three-part jwt"),
            TokenDecodeError::InvalidEncoding => write!(f, "token payload is not base64url"),
            TokenDecodeError::InvalidPayload(reason) => {
                write!(f, "token payload is not a claims object: {reason}")
            }
            TokenDecodeError::MissingClaim(claim) => write!(f, "token is missing the {claim} claim"),
            TokenDecodeError::Expired { expired_at } => {
                write!(f, "token expired at {expired_at}")
            }
        }
    }
}

impl std::error::Error for TokenDecodeError {}

// A booking or query date that matches none of the accepted encodings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateNormalizationError {
    Empty,
    UnsupportedShape(String),
    InvalidCalendarDate(String),
}

impl fmt::Display for DateNormalizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateNormalizationError::Empty => write!(f, "date value is empty"),
            DateNormalizationError::UnsupportedShape(value) => {
                write!(f, "unsupported date encoding: {value:?}")
            }
            DateNormalizationError::InvalidCalendarDate(value) => {
                write!(f, "not a calendar date: {value:?}")
            }
        }
    }
}

impl std::error::Error for DateNormalizationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    Inverted { start: NaiveDate, end: NaiveDate },
    InvalidBound(DateNormalizationError),
}

impl fmt::Display for DateRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateRangeError::Inverted { start, end } => {
                write!(f, "range start {start} is after range end {end}")
            }
            DateRangeError::InvalidBound(err) => write!(f, "invalid range bound: {err}"),
        }
    }
}

impl std::error::Error for DateRangeError {}

// Errors reported by session login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    Decode(TokenDecodeError),
    StorageFailure,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Decode(err) => write!(f, "invalid session token: {err}"),
            SessionError::StorageFailure => write!(f, "session storage failure"),
        }
    }
}

impl std::error::Error for SessionError {}

// Errors surfaced by the hotel REST backend port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    Transport(String),
    Upstream { status: u16, message: Option<String> },
    Decode(String),
}

impl BackendError {
    // True when the backend refused the caller rather than failing itself.
    pub fn is_client_rejection(&self) -> bool {
        matches!(self, BackendError::Upstream { status, .. } if (400..500).contains(status))
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Transport(err) => write!(f, "backend transport error: {err}"),
            BackendError::Upstream { status, message } => {
                if let Some(message) = message {
                    write!(f, "backend upstream error {status}: {message}")
                } else {
                    write!(f, "backend upstream error {status}")
                }
            }
            BackendError::Decode(err) => write!(f, "backend response decode error: {err}"),
        }
    }
}

impl std::error::Error for BackendError {}
