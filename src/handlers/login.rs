use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::services::login::LoginRequest;
use crate::state::AppState;

/// POST /login - verify admin credentials and issue a session token.
///
/// Unknown username and wrong password produce the identical 404 message so
/// the endpoint cannot be used to enumerate accounts.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    body.validate()?;

    let token = state.logins.login(&body.username, &body.password).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "login successful",
            "accessToken": token,
        })),
    ))
}
