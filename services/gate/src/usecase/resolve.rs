use std::sync::Arc;

use tracing::{debug, info, warn};

use gatehouse_core::log_once::OnceLog;

use crate::domain::generator::CodeCache;
use crate::domain::repository::CodeSource;
use crate::domain::types::CodeRole;

/// Ordered fallback chain for obtaining a code:
///
/// 1. primary store (database), when configured
/// 2. secondary store (Redis), when configured
/// 3. environment override, current role only
/// 4. seeded generator through the process-wide cache
///
/// Store failures and misses are absorbed and logged; the chain always
/// bottoms out at the generator, so resolution is infallible.
pub struct ResolveCodeUseCase<P, S>
where
    P: CodeSource,
    S: CodeSource,
{
    pub primary: Option<P>,
    pub secondary: Option<S>,
    pub override_code: Option<String>,
    pub deploy_id: String,
    pub cache: Arc<CodeCache>,
    pub once: Arc<OnceLog>,
}

impl<P, S> ResolveCodeUseCase<P, S>
where
    P: CodeSource,
    S: CodeSource,
{
    pub async fn resolve(&self, role: CodeRole) -> String {
        if let Some(source) = &self.primary {
            if let Some(code) = self.try_source(source, role).await {
                return code;
            }
        }
        if let Some(source) = &self.secondary {
            if let Some(code) = self.try_source(source, role).await {
                return code;
            }
        }
        if role == CodeRole::Current {
            if let Some(code) = &self.override_code {
                self.log_provenance(role, "override");
                return code.clone();
            }
        }
        let code = self.cache.get_or_generate(&role.seed_for(&self.deploy_id));
        self.log_provenance(role, "generated");
        code
    }

    async fn try_source(&self, source: &impl CodeSource, role: CodeRole) -> Option<String> {
        match source.fetch(role).await {
            Ok(Some(code)) => {
                self.log_provenance(role, source.name());
                Some(code)
            }
            Ok(None) => {
                debug!(role = role.as_str(), source = source.name(), "no stored code");
                None
            }
            Err(e) => {
                warn!(
                    role = role.as_str(),
                    source = source.name(),
                    error = %e,
                    "code source failed, falling back"
                );
                None
            }
        }
    }

    /// Provenance is logged once per (role, source) for the process
    /// lifetime; the resolver runs on every request and would flood the log
    /// otherwise.
    fn log_provenance(&self, role: CodeRole, source: &str) {
        if self.once.first(&format!("{}:{}", role.as_str(), source)) {
            info!(role = role.as_str(), source, "resolved code source");
        }
    }
}
