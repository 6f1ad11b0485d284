use axum::extract::State;

use crate::core::error::{AppError, Result};

/// Answer for every admin or menu request when no business could be
/// resolved for this session. There is no automatic retry; restart the
/// service once the membership is fixed.
pub async fn session_unavailable(State(reason): State<String>) -> Result<()> {
    Err(AppError::Precondition(reason))
}
