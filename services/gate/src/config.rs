/// Gate service configuration loaded from environment variables.
#[derive(Debug)]
pub struct GateConfig {
    /// PostgreSQL connection URL. Optional; without it the resolver skips
    /// the primary store and visitor tracking is disabled.
    pub database_url: Option<String>,
    /// Redis connection URL. Optional; without it the resolver skips the
    /// secondary store.
    pub redis_url: Option<String>,
    /// HMAC secret for signing session tokens.
    pub session_secret: String,
    /// Cookie domain attribute (root domain, e.g. "example.com").
    pub cookie_domain: String,
    /// TCP port to listen on (default 3110). Env var: `GATE_PORT`.
    pub gate_port: u16,
    /// Deployment identifier seeding generated codes (default "dev").
    /// Redeploying with a new value rotates both generated codes.
    pub deploy_id: String,
    /// Operator override for the current code, pinning it across redeploys.
    /// Env var: `CODE_OVERRIDE`.
    pub code_override: Option<String>,
}

impl GateConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").ok(),
            redis_url: std::env::var("REDIS_URL").ok(),
            session_secret: std::env::var("SESSION_SECRET").expect("SESSION_SECRET"),
            cookie_domain: std::env::var("COOKIE_DOMAIN").expect("COOKIE_DOMAIN"),
            gate_port: std::env::var("GATE_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3110),
            deploy_id: std::env::var("DEPLOY_ID").unwrap_or_else(|_| "dev".to_owned()),
            code_override: std::env::var("CODE_OVERRIDE").ok(),
        }
    }
}
