//! Session types for the Gatehouse gate service.
//!
//! Provides the session-cookie builder and JWT session-token validation.

pub mod cookie;
pub mod token;
