use std::sync::Arc;

use chrono::{DateTime, Utc};
use deadpool_redis::Pool as RedisPool;
use sea_orm::DatabaseConnection;

use gatehouse_core::log_once::OnceLog;

use crate::domain::generator::CodeCache;
use crate::infra::cache::RedisCodeSource;
use crate::infra::db::{DbCodeRepository, DbUsageLedger};
use crate::usecase::resolve::ResolveCodeUseCase;

/// Shared application state passed to every handler via axum `State`.
///
/// Both stores are optional: the gate stays fully functional with neither,
/// falling back to generated codes and skipping visitor tracking.
#[derive(Clone)]
pub struct AppState {
    pub db: Option<DatabaseConnection>,
    pub redis: Option<RedisPool>,
    pub cache: Arc<CodeCache>,
    pub once: Arc<OnceLog>,
    pub session_secret: String,
    pub cookie_domain: String,
    pub deploy_id: String,
    pub code_override: Option<String>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn code_repo(&self) -> Option<DbCodeRepository> {
        self.db.clone().map(|db| DbCodeRepository { db })
    }

    pub fn usage_ledger(&self) -> Option<DbUsageLedger> {
        self.db.clone().map(|db| DbUsageLedger { db })
    }

    pub fn redis_source(&self) -> Option<RedisCodeSource> {
        self.redis.clone().map(|pool| RedisCodeSource { pool })
    }

    pub fn resolver(&self) -> ResolveCodeUseCase<DbCodeRepository, RedisCodeSource> {
        ResolveCodeUseCase {
            primary: self.code_repo(),
            secondary: self.redis_source(),
            override_code: self.code_override.clone(),
            deploy_id: self.deploy_id.clone(),
            cache: Arc::clone(&self.cache),
            once: Arc::clone(&self.once),
        }
    }
}
