//! Core domain types

mod request;

pub use request::{PendingRequest, SessionId, DEFAULT_QUESTION};
