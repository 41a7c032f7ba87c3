//! JWT session-token validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "USE_ONLY_IN_GATE_SERVICE", test))]
use serde::Serialize;

/// Session state extracted from a validated session token.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    /// Visitor identifier the session was issued for (`anonymous` when the
    /// browser never supplied one).
    pub visitor_id: String,
    /// The access code that unlocked this session.
    pub last_code: String,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub session_exp: u64,
}

/// Errors returned by [`validate_session_token`].
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("session expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload shared by session creation (gate service) and validation.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | visitor id, or `anonymous` |
/// | `code` | custom | access code that opened the session |
/// | `exp` | `exp` | session expiration, seconds since epoch |
///
/// [`Deserialize`] is always available — every consumer validates tokens.
/// [`Serialize`] requires the **`USE_ONLY_IN_GATE_SERVICE`** cargo feature;
/// only the gate service enables it because it is the sole token issuer.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "USE_ONLY_IN_GATE_SERVICE", test), derive(Serialize))]
pub struct SessionClaims {
    /// Visitor id (or `anonymous`).
    pub sub: String,
    /// Access code that opened the session.
    pub code: String,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub exp: u64,
}

/// Decode and validate a session JWT, returning raw claims.
///
/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
/// Default leeway = 60s — tolerates clock skew behind a proxy.
fn decode_jwt(token: &str, secret: &str) -> Result<SessionClaims, SessionError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => SessionError::InvalidSignature,
        _ => SessionError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate a session-cookie value, returning the parsed session state.
///
/// Gated handlers call this on every request to decide whether the caller
/// has passed the gate.
pub fn validate_session_token(cookie_value: &str, secret: &str) -> Result<SessionInfo, SessionError> {
    let claims = decode_jwt(cookie_value, secret)?;
    Ok(SessionInfo {
        visitor_id: claims.sub,
        last_code: claims.code,
        session_exp: claims.exp,
    })
}
