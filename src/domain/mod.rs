pub mod backend;
pub mod dates;
pub mod entities;
pub mod errors;
pub mod ports;
