use tracing::debug;

use crate::domain::entities::{Booking, DateRange};

/// Bookings whose stay overlaps `range`, in their original order.
///
/// Without a range the whole list is returned. A booking whose dates cannot
/// be normalized is left out rather than failing the whole listing.
pub fn filter_bookings(bookings: &[Booking], range: Option<&DateRange>) -> Vec<Booking> {
    let Some(range) = range else {
        return bookings.to_vec();
    };

    bookings
        .iter()
        .filter(|booking| stay_overlaps(booking, range))
        .cloned()
        .collect()
}

fn stay_overlaps(booking: &Booking, range: &DateRange) -> bool {
    match booking.stay() {
        Ok((check_in, check_out)) => range.overlaps(check_in, check_out),
        Err(err) => {
            debug!(booking_id = booking.id, error = %err, "excluding booking with unreadable dates");
            false
        }
    }
}
