use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::error::GateServiceError;
use crate::state::AppState;
use crate::usecase::rotate::{RotateCodesInput, RotateCodesUseCase};

#[derive(Deserialize)]
pub struct RotateCodesRequest {
    pub current: String,
    pub next: String,
}

pub async fn rotate_codes(
    State(state): State<AppState>,
    Json(body): Json<RotateCodesRequest>,
) -> Result<StatusCode, GateServiceError> {
    let usecase = RotateCodesUseCase {
        store: state.code_repo(),
    };
    usecase
        .execute(RotateCodesInput {
            current: body.current,
            next: body.next,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
