pub mod booking_filter;
pub mod credentials;
pub mod list_bookings;
pub mod route_guard;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;
