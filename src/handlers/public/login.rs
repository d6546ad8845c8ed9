// handlers/public/login.rs - POST /login handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
}

/// POST /login - issue a bearer token for the single implicit principal.
///
/// No credentials are read from the request; any caller receives a token.
/// Every call mints a fresh token, and all unexpired tokens stay valid.
///
/// ```json
/// { "access_token": "eyJhbGciOiJIUzI1NiI..." }
/// ```
pub async fn login_post(State(state): State<AppState>) -> ApiResult<Json<LoginResponse>> {
    let access_token = state.tokens.issue()?;
    tracing::info!(
        "Issued access token valid for {} minutes",
        state.tokens.lifetime().num_minutes()
    );

    Ok(Json(LoginResponse { access_token }))
}
