use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{validate_jwt, Claims};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated admin context extracted from a verified token
#[derive(Clone, Debug)]
pub struct AuthAdmin {
    pub id: i64,
    pub username: String,
}

impl From<Claims> for AuthAdmin {
    fn from(claims: Claims) -> Self {
        Self { id: claims.id, username: claims.username }
    }
}

/// Plain bearer-token guard: verifies signature and expiry, then injects the
/// claims into request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = authenticate(&state, &headers)?;

    request.extensions_mut().insert(AuthAdmin::from(claims));
    Ok(next.run(request).await)
}

/// Role-gated guard: plain check, then the admin row must still exist and
/// carry the admin role. Store faults while loading the row map to 500, not
/// 401, so infra failures are not masked as auth failures.
pub async fn require_admin(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = authenticate(&state, &headers)?;

    let admin = state
        .logins
        .get_admin(claims.id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("access denied, user not found"))?;

    if !admin.is_admin() {
        return Err(ApiError::unauthorized("access denied, insufficient permissions"));
    }

    request.extensions_mut().insert(AuthAdmin::from(claims));
    Ok(next.run(request).await)
}

fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Claims, ApiError> {
    let token = extract_bearer_token(headers)?;

    validate_jwt(&token, &state.config.security.jwt_secret).map_err(|e| {
        tracing::debug!("Token validation failed: {}", e);
        ApiError::unauthorized("access denied, invalid token")
    })
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| ApiError::unauthorized("access denied, no token provided"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("access denied, invalid token"))?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.to_string()),
        _ => Err(ApiError::unauthorized("access denied, invalid token")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let err = extract_bearer_token(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let err = extract_bearer_token(&headers_with("Basic dXNlcjpwYXNz")).unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn empty_bearer_token_is_rejected() {
        assert!(extract_bearer_token(&headers_with("Bearer ")).is_err());
    }

    #[test]
    fn bearer_token_is_extracted() {
        let token = extract_bearer_token(&headers_with("Bearer abc.def.ghi")).unwrap();
        assert_eq!(token, "abc.def.ghi");
    }
}
