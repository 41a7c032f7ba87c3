use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use tracing::warn;
use uuid::Uuid;

use gatehouse_session::cookie::SESSION_EXP;
use gatehouse_session::token::SessionClaims;

use crate::domain::repository::{CodeSource, UsageLedger};
use crate::domain::types::{ANONYMOUS_VISITOR, AccessEvent, CodeRole, Visitor};
use crate::error::GateServiceError;
use crate::usecase::resolve::ResolveCodeUseCase;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Sign a session token for a visitor who passed the gate.
pub fn issue_session_token(
    visitor_id: &str,
    code: &str,
    secret: &str,
) -> Result<(String, u64), GateServiceError> {
    let exp = now_secs() + SESSION_EXP;
    let claims = SessionClaims {
        sub: visitor_id.to_owned(),
        code: code.to_owned(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| GateServiceError::Internal(e.into()))?;
    Ok((token, exp))
}

pub struct SubmitCodeInput {
    pub code: String,
    pub visitor_id: Option<String>,
    pub user_agent: Option<String>,
}

/// Outcome of a gate submission. A mismatch is a normal negative outcome,
/// not an error. Both arms carry the resolved current code because the
/// gate discloses it (landing display on success, hint on denial).
pub enum SubmitCodeOutput {
    Authenticated {
        current_code: String,
        next_code: String,
        session_token: String,
        visitor: Option<Visitor>,
    },
    Denied {
        current_code: String,
        visitor: Option<Visitor>,
    },
}

pub struct SubmitCodeUseCase<P, S, L>
where
    P: CodeSource,
    S: CodeSource,
    L: UsageLedger,
{
    pub resolver: ResolveCodeUseCase<P, S>,
    pub ledger: Option<L>,
    pub session_secret: String,
}

impl<P, S, L> SubmitCodeUseCase<P, S, L>
where
    P: CodeSource,
    S: CodeSource,
    L: UsageLedger,
{
    /// Compare the submitted string against the resolved current code
    /// (exact, case-sensitive). The only failure path is token signing;
    /// ledger problems degrade to logged warnings.
    pub async fn execute(
        &self,
        input: SubmitCodeInput,
    ) -> Result<SubmitCodeOutput, GateServiceError> {
        let current = self.resolver.resolve(CodeRole::Current).await;
        let authenticated = input.code == current;

        let visitor = self.track(&input, authenticated).await;

        if !authenticated {
            return Ok(SubmitCodeOutput::Denied {
                current_code: current,
                visitor,
            });
        }

        let next_code = self.resolver.resolve(CodeRole::Next).await;
        let subject = input.visitor_id.as_deref().unwrap_or(ANONYMOUS_VISITOR);
        let (session_token, _exp) = issue_session_token(subject, &current, &self.session_secret)?;

        Ok(SubmitCodeOutput::Authenticated {
            current_code: current,
            next_code,
            session_token,
            visitor,
        })
    }

    /// Best-effort visitor tracking and usage recording. Never blocks the
    /// gate: an absent ledger or a failing one degrades to a warning.
    async fn track(&self, input: &SubmitCodeInput, success: bool) -> Option<Visitor> {
        let ledger = self.ledger.as_ref()?;
        let visitor_id = input.visitor_id.as_deref()?;

        let visitor = match ledger.get_or_create_visitor(visitor_id).await {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(visitor_id, error = %e, "visitor lookup failed");
                None
            }
        };

        let event = AccessEvent {
            id: Uuid::new_v4(),
            visitor_id: visitor_id.to_owned(),
            code: input.code.clone(),
            success,
            user_agent: input.user_agent.clone(),
            created_at: Utc::now(),
        };
        if let Err(e) = ledger.record_use(&event).await {
            warn!(visitor_id, error = %e, "usage recording skipped");
        }

        visitor
    }
}
