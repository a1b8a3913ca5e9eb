use axum::extract::State;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use common::Outcome;

use crate::error::AppError;
use crate::extractors::auth::BearerToken;
use crate::models::envelope::{ErrorBody, SuccessBody};
use crate::reply::Reply;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/account/block",
    tag = "Account",
    operation_id = "blockAccount",
    summary = "Block the calling user's account",
    description = "Verifies the caller's session token, then disables the account it belongs to using the server credential. Blocking an already blocked account succeeds.",
    responses(
        (status = 200, description = "Account blocked", body = SuccessBody),
        (status = 401, description = "Missing header or invalid session", body = ErrorBody),
        (status = 500, description = "Status update failed or handler not configured", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip_all, fields(invocation_id = %Uuid::new_v4()))]
pub async fn block_account(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Reply, AppError> {
    let services = state.block.as_ref().map_err(|missing| AppError::Configuration(missing.clone()))?;

    let identity = services.identity.verify_session(&token).await.map_err(|e| {
        warn!(error = %e, "Session verification failed");
        AppError::SessionInvalid
    })?;

    info!(user_id = %identity.id, "Blocking account");
    services.accounts.block(&identity.id).await?;
    info!(user_id = %identity.id, "Account blocked");

    Ok(Outcome::success("User account blocked successfully", identity.id)
        .with_action("blocked")
        .into())
}
