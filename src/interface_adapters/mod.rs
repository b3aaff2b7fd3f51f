// Interface adapters: token decoding, session storage, backend client and HTTP views.

pub mod clients;
pub mod handlers;
pub mod protocol;
pub mod routes;
pub mod state;
pub mod storage;
pub mod token;
