use tracing::debug;

use crate::domain::backend::HotelBackend;
use crate::domain::entities::{Booking, DateRange};
use crate::domain::errors::BackendError;
use crate::use_cases::booking_filter::filter_bookings;

// Which bookings a listing view starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingScope {
    // Every booking in the hotel; admin views only.
    All,
    // Bookings made under one guest email.
    Guest(String),
}

// Booking listing use case with injected dependencies.
pub struct ListBookingsUseCase<B> {
    pub backend: B,
}

impl<B> ListBookingsUseCase<B>
where
    B: HotelBackend,
{
    pub async fn execute(
        &self,
        token: &str,
        scope: BookingScope,
        range: Option<DateRange>,
    ) -> Result<Vec<Booking>, BackendError> {
        let bookings = match &scope {
            BookingScope::All => self.backend.all_bookings(token).await?,
            BookingScope::Guest(email) => self.backend.bookings_for_user(email, token).await?,
        };

        let visible = filter_bookings(&bookings, range.as_ref());
        debug!(
            scope = ?scope,
            total = bookings.len(),
            visible = visible.len(),
            "bookings listed"
        );
        Ok(visible)
    }
}
