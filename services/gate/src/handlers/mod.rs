pub mod codes;
pub mod gate;
pub mod pages;

use axum_extra::extract::CookieJar;

use gatehouse_session::cookie::GATE_SESSION;
use gatehouse_session::token::{SessionInfo, validate_session_token};

use crate::domain::types::SessionState;
use crate::error::GateServiceError;

/// Require a valid session cookie; gated pages call this first.
pub(crate) fn require_session(
    jar: &CookieJar,
    secret: &str,
) -> Result<SessionInfo, GateServiceError> {
    let value = jar
        .get(GATE_SESSION)
        .map(|c| c.value().to_owned())
        .ok_or(GateServiceError::InvalidSession)?;
    validate_session_token(&value, secret).map_err(|_| GateServiceError::InvalidSession)
}

/// Non-failing session read for pages that only display the state.
pub(crate) fn session_from_jar(jar: &CookieJar, secret: &str) -> SessionState {
    match require_session(jar, secret) {
        Ok(info) => SessionState {
            authenticated: true,
            last_code: Some(info.last_code),
        },
        Err(_) => SessionState::default(),
    }
}
