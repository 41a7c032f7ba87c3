use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use gatehouse_session::cookie::set_session_cookie;

use crate::domain::types::{CodeRole, Visitor};
use crate::error::GateServiceError;
use crate::handlers::session_from_jar;
use crate::state::AppState;
use crate::usecase::gate::{SubmitCodeInput, SubmitCodeOutput, SubmitCodeUseCase};
use crate::usecase::recovery::RecoverCodeUseCase;

#[derive(Serialize)]
pub struct VisitorView {
    pub visitor_id: String,
    pub total_visits: i32,
    pub is_new_visitor: bool,
    pub has_used_code: bool,
}

impl From<Visitor> for VisitorView {
    fn from(v: Visitor) -> Self {
        let is_new_visitor = v.is_new();
        Self {
            visitor_id: v.visitor_id,
            total_visits: v.total_visits,
            is_new_visitor,
            has_used_code: v.has_used_code,
        }
    }
}

// ── GET / ─────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct LandingResponse {
    pub service: &'static str,
    /// Displayed openly; the gate is a marketing device, not a security
    /// boundary.
    pub current_code: String,
    pub authenticated: bool,
}

pub async fn landing(State(state): State<AppState>, jar: CookieJar) -> Json<LandingResponse> {
    let current_code = state.resolver().resolve(CodeRole::Current).await;
    let session = session_from_jar(&jar, &state.session_secret);
    Json(LandingResponse {
        service: "gatehouse",
        current_code,
        authenticated: session.authenticated,
    })
}

// ── POST /gate ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SubmitCodeRequest {
    pub code: String,
    pub visitor_id: Option<String>,
}

#[derive(Serialize)]
pub struct SubmitCodeResponse {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visitor: Option<VisitorView>,
}

pub async fn submit_code(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(body): Json<SubmitCodeRequest>,
) -> Result<impl IntoResponse, GateServiceError> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let usecase = SubmitCodeUseCase {
        resolver: state.resolver(),
        ledger: state.usage_ledger(),
        session_secret: state.session_secret.clone(),
    };
    let out = usecase
        .execute(SubmitCodeInput {
            code: body.code,
            visitor_id: body.visitor_id,
            user_agent,
        })
        .await?;

    match out {
        SubmitCodeOutput::Authenticated {
            next_code,
            session_token,
            visitor,
            ..
        } => {
            let visitor = visitor.map(VisitorView::from);
            let message = match &visitor {
                Some(v) if v.is_new_visitor => "welcome, this is your first visit".to_owned(),
                Some(v) => format!("welcome back, visit #{}", v.total_visits),
                None => "welcome".to_owned(),
            };
            let jar = set_session_cookie(jar, session_token, state.cookie_domain.clone());
            Ok((
                StatusCode::OK,
                jar,
                Json(SubmitCodeResponse {
                    status: "authenticated",
                    message,
                    next_code: Some(next_code),
                    hint: None,
                    visitor,
                }),
            ))
        }
        SubmitCodeOutput::Denied {
            current_code,
            visitor,
        } => Ok((
            StatusCode::OK,
            jar,
            Json(SubmitCodeResponse {
                status: "denied",
                message: "invalid code".to_owned(),
                // The correct code is echoed on failure; the gate is not a
                // security boundary.
                next_code: None,
                hint: Some(current_code),
                visitor: visitor.map(VisitorView::from),
            }),
        )),
    }
}

// ── GET /gate/recovery ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RecoveryQuery {
    pub visitor_id: String,
}

#[derive(Serialize)]
pub struct RecoveryResponse {
    pub code: String,
    pub source: &'static str,
}

pub async fn recover_code(
    State(state): State<AppState>,
    Query(query): Query<RecoveryQuery>,
) -> Json<RecoveryResponse> {
    let usecase = RecoverCodeUseCase {
        resolver: state.resolver(),
        ledger: state.usage_ledger(),
    };
    let out = usecase.execute(&query.visitor_id).await;
    Json(RecoveryResponse {
        code: out.code,
        source: out.source.as_str(),
    })
}
