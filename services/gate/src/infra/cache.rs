use deadpool_redis::Pool;
use deadpool_redis::redis::AsyncCommands;

use crate::domain::repository::CodeSource;
use crate::domain::types::CodeRole;
use crate::error::GateServiceError;

/// Secondary code store: a Redis key per role, written by deploy tooling.
#[derive(Clone)]
pub struct RedisCodeSource {
    pub pool: Pool,
}

fn code_key(role: CodeRole) -> String {
    format!("gate:marketing_code:{}", role.as_str())
}

impl CodeSource for RedisCodeSource {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn fetch(&self, role: CodeRole) -> Result<Option<String>, GateServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| GateServiceError::Internal(e.into()))?;
        let value: Option<String> = conn
            .get(code_key(role))
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| GateServiceError::Internal(e.into()))?;
        Ok(value)
    }
}
