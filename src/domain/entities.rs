use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::dates::normalize_date;
use crate::domain::errors::{DateNormalizationError, DateRangeError};

// Role labels issued by the hotel backend. Matching is case-sensitive.
pub const ADMIN_ROLE: &str = "ROLE_ADMIN";
pub const USER_ROLE: &str = "ROLE_USER";

// Identity decoded from a bearer token's claims.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    // Subject claim; the backend issues the user's email here.
    pub subject: String,
    pub roles: Vec<String>,
    pub expires_at: u64,
    pub issued_at: Option<u64>,
}

impl Identity {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|candidate| candidate == role)
    }

    // Membership, not an exact match on the joined `userRole` string.
    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }

    pub fn is_expired_at(&self, now_epoch_seconds: u64) -> bool {
        self.expires_at <= now_epoch_seconds
    }

    // Stored form of the role set, comma-joined under the `userRole` key.
    pub fn role_label(&self) -> String {
        self.roles.join(",")
    }
}

// Room summary embedded in a booking listing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedRoom {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub room_type: String,
}

// Booking record as listed by the backend. Only the stay dates are interpreted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(alias = "bookingId")]
    pub id: u64,
    #[serde(default, deserialize_with = "date_text")]
    pub check_in_date: String,
    #[serde(default, deserialize_with = "date_text")]
    pub check_out_date: String,
    #[serde(default, alias = "guestFullName")]
    pub guest_name: String,
    #[serde(default)]
    pub guest_email: String,
    #[serde(default)]
    pub total_num_of_guests: u32,
    #[serde(default)]
    pub booking_confirmation_code: String,
    #[serde(default)]
    pub room: Option<BookedRoom>,
}

impl Booking {
    // Normalized check-in and check-out dates.
    pub fn stay(&self) -> Result<(NaiveDate, NaiveDate), DateNormalizationError> {
        Ok((
            normalize_date(&self.check_in_date)?,
            normalize_date(&self.check_out_date)?,
        ))
    }
}

// Dates arrive either as JSON strings or as bare compact integers (20240601).
// Anything else is kept as text so the filter drops only that booking.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Text(String),
    Number(u64),
    Other(serde_json::Value),
}

fn date_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawDate::deserialize(deserializer)? {
        RawDate::Text(text) => text,
        RawDate::Number(number) => number.to_string(),
        RawDate::Other(serde_json::Value::Null) => String::new(),
        RawDate::Other(value) => value.to_string(),
    })
}

/// Inclusive calendar-date query window, `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// Build a query window from optional textual bounds.
    ///
    /// A missing bound means no window at all; present bounds go through the
    /// same normalization as booking dates.
    pub fn from_bounds(
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Option<Self>, DateRangeError> {
        let (Some(start), Some(end)) = (start, end) else {
            return Ok(None);
        };
        let start = normalize_date(start).map_err(DateRangeError::InvalidBound)?;
        let end = normalize_date(end).map_err(DateRangeError::InvalidBound)?;
        Self::new(start, end).map(Some)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    // Closed-interval overlap, not containment.
    pub fn overlaps(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        check_in <= self.end && check_out >= self.start
    }
}
