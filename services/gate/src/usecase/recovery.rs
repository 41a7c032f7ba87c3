use tracing::warn;

use crate::domain::repository::{CodeSource, UsageLedger};
use crate::domain::types::{CodeRole, HISTORY_SCAN_LIMIT};
use crate::usecase::resolve::ResolveCodeUseCase;

/// Where a recovery suggestion came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySource {
    LastSuccess,
    LastAttempt,
    LiveCurrent,
}

impl RecoverySource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LastSuccess => "last_success",
            Self::LastAttempt => "last_attempt",
            Self::LiveCurrent => "live_current",
        }
    }
}

pub struct RecoverCodeOutput {
    pub code: String,
    pub source: RecoverySource,
}

/// Best-effort code recovery for a visitor who lost their code: the most
/// recent successful code, else the most recent attempt, else the live
/// current code. History is scanned newest first, so an old success beats
/// any number of newer failed attempts.
pub struct RecoverCodeUseCase<P, S, L>
where
    P: CodeSource,
    S: CodeSource,
    L: UsageLedger,
{
    pub resolver: ResolveCodeUseCase<P, S>,
    pub ledger: Option<L>,
}

impl<P, S, L> RecoverCodeUseCase<P, S, L>
where
    P: CodeSource,
    S: CodeSource,
    L: UsageLedger,
{
    pub async fn execute(&self, visitor_id: &str) -> RecoverCodeOutput {
        if let Some(ledger) = &self.ledger {
            match ledger.history_for(visitor_id, HISTORY_SCAN_LIMIT).await {
                Ok(events) => {
                    if let Some(hit) = events.iter().find(|e| e.success) {
                        return RecoverCodeOutput {
                            code: hit.code.clone(),
                            source: RecoverySource::LastSuccess,
                        };
                    }
                    if let Some(attempt) = events.first() {
                        return RecoverCodeOutput {
                            code: attempt.code.clone(),
                            source: RecoverySource::LastAttempt,
                        };
                    }
                }
                Err(e) => {
                    warn!(visitor_id, error = %e, "history lookup failed, falling back to live code");
                }
            }
        }

        RecoverCodeOutput {
            code: self.resolver.resolve(CodeRole::Current).await,
            source: RecoverySource::LiveCurrent,
        }
    }
}
