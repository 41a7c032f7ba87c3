#![allow(async_fn_in_trait)]

use crate::domain::types::{AccessEvent, CodeRole, Visitor};
use crate::error::GateServiceError;

/// One step of the resolver's fallback chain: an external keyed store that
/// either yields the code for a role or abstains with `None`.
pub trait CodeSource: Send + Sync {
    /// Short name used in provenance logs.
    fn name(&self) -> &'static str;

    async fn fetch(&self, role: CodeRole) -> Result<Option<String>, GateServiceError>;
}

/// Writable code store. Only the primary store accepts rotations.
pub trait CodeStore: CodeSource {
    /// Replace the stored current and next codes in one transaction.
    async fn rotate(&self, current: &str, next: &str) -> Result<(), GateServiceError>;
}

/// Usage ledger: visitor aggregates plus the append-only access history.
pub trait UsageLedger: Send + Sync {
    /// Fetch a visitor, creating the record on first sighting. An existing
    /// visitor's counter and last-visit timestamp are advanced.
    async fn get_or_create_visitor(&self, visitor_id: &str) -> Result<Visitor, GateServiceError>;

    /// Append one access event. A successful event also updates the
    /// visitor's `last_access_code` and `has_used_code`.
    async fn record_use(&self, event: &AccessEvent) -> Result<(), GateServiceError>;

    /// Access history for one visitor, newest first.
    async fn history_for(
        &self,
        visitor_id: &str,
        limit: u64,
    ) -> Result<Vec<AccessEvent>, GateServiceError>;

    /// Most recent access events across all visitors, newest first.
    async fn recent_events(&self, limit: u64) -> Result<Vec<AccessEvent>, GateServiceError>;
}
