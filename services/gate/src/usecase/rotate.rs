use crate::domain::repository::CodeStore;
use crate::error::GateServiceError;

pub struct RotateCodesInput {
    pub current: String,
    pub next: String,
}

/// Replace the stored current and next codes. Rotation is an operator
/// action (deploy tooling pinning codes); it requires the primary store and
/// fails with `StoreUnavailable` when none is configured.
pub struct RotateCodesUseCase<R: CodeStore> {
    pub store: Option<R>,
}

impl<R: CodeStore> RotateCodesUseCase<R> {
    pub async fn execute(&self, input: RotateCodesInput) -> Result<(), GateServiceError> {
        let store = self
            .store
            .as_ref()
            .ok_or(GateServiceError::StoreUnavailable)?;
        store.rotate(&input.current, &input.next).await
    }
}
