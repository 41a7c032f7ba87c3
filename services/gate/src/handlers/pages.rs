use axum::{Json, extract::State};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::repository::UsageLedger as _;
use crate::domain::types::HISTORY_SCAN_LIMIT;
use crate::error::GateServiceError;
use crate::handlers::require_session;
use crate::state::AppState;

// ── GET /status ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub deploy_id: String,
    pub database: bool,
    pub redis: bool,
    pub codes_generated: u64,
    pub uptime_secs: i64,
}

/// Public service status: store availability and deployment info, no codes.
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "operational",
        deploy_id: state.deploy_id.clone(),
        database: state.db.is_some(),
        redis: state.redis.is_some(),
        codes_generated: state.cache.generated(),
        uptime_secs: (Utc::now() - state.started_at).num_seconds(),
    })
}

// ── GET /stream ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct AccessEventView {
    pub visitor_id: String,
    pub code: String,
    pub success: bool,
    pub at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct DataStreamResponse {
    pub events: Vec<AccessEventView>,
}

/// Gated: recent gate activity, newest first. Empty without a database.
pub async fn data_stream(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<DataStreamResponse>, GateServiceError> {
    require_session(&jar, &state.session_secret)?;

    let events = match state.usage_ledger() {
        Some(ledger) => ledger.recent_events(HISTORY_SCAN_LIMIT).await?,
        None => Vec::new(),
    };

    Ok(Json(DataStreamResponse {
        events: events
            .into_iter()
            .map(|e| AccessEventView {
                visitor_id: e.visitor_id,
                code: e.code,
                success: e.success,
                at: e.created_at,
            })
            .collect(),
    }))
}

// ── GET /hub ──────────────────────────────────────────────────────────────────

const HUB_LINKS: &[(&str, &str, &str)] = &[
    ("status", "/status", "Service status and deployment info"),
    ("data stream", "/stream", "Recent gate activity"),
    ("code recovery", "/gate/recovery", "Recover a previously used code"),
];

#[derive(Serialize)]
pub struct HubLink {
    pub name: &'static str,
    pub url: &'static str,
    pub description: &'static str,
}

#[derive(Serialize)]
pub struct HubResponse {
    /// Code that opened this session, echoed back for reference.
    pub unlocked_with: String,
    pub links: Vec<HubLink>,
}

/// Gated: curated link hub shown to visitors who passed the gate.
pub async fn knowledge_hub(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<HubResponse>, GateServiceError> {
    let session = require_session(&jar, &state.session_secret)?;

    Ok(Json(HubResponse {
        unlocked_with: session.last_code,
        links: HUB_LINKS
            .iter()
            .map(|&(name, url, description)| HubLink {
                name,
                url,
                description,
            })
            .collect(),
    }))
}
