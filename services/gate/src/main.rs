use std::sync::Arc;

use chrono::Utc;
use sea_orm::Database;
use tracing::info;

use gatehouse_core::log_once::OnceLog;
use gatehouse_core::tracing::init_tracing;
use gatehouse_gate::config::GateConfig;
use gatehouse_gate::domain::generator::CodeCache;
use gatehouse_gate::router::build_router;
use gatehouse_gate::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = GateConfig::from_env();

    let db = match &config.database_url {
        Some(url) => Some(
            Database::connect(url)
                .await
                .expect("failed to connect to database"),
        ),
        None => None,
    };

    let redis = config.redis_url.as_ref().map(|url| {
        deadpool_redis::Config::from_url(url)
            .create_pool(Some(deadpool_redis::Runtime::Tokio1))
            .expect("failed to create Redis pool")
    });

    if db.is_none() {
        info!("no DATABASE_URL, running with generated codes only");
    }

    let state = AppState {
        db,
        redis,
        cache: Arc::new(CodeCache::default()),
        once: Arc::new(OnceLog::default()),
        session_secret: config.session_secret,
        cookie_domain: config.cookie_domain,
        deploy_id: config.deploy_id,
        code_override: config.code_override,
        started_at: Utc::now(),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.gate_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("gate service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
