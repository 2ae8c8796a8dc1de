use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

/// Wrapper that renders the `{success, message, data?}` envelope every
/// endpoint responds with.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub message: String,
    pub data: Option<T>,
    pub status_code: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 OK with a payload
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self { message: message.into(), data: Some(data), status_code: StatusCode::OK }
    }

    /// 201 Created with the new record
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self { message: message.into(), data: Some(data), status_code: StatusCode::CREATED }
    }
}

impl ApiResponse<()> {
    /// 200 OK confirmation without a payload
    pub fn message_only(message: impl Into<String>) -> Self {
        Self { message: message.into(), data: None, status_code: StatusCode::OK }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let mut envelope = json!({
            "success": true,
            "message": self.message,
        });

        if let Some(data) = self.data {
            match serde_json::to_value(&data) {
                Ok(value) => {
                    envelope["data"] = value;
                }
                Err(e) => {
                    tracing::error!("Failed to serialize response data: {}", e);
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({
                            "success": false,
                            "message": "Failed to serialize response data"
                        })),
                    )
                        .into_response();
                }
            }
        }

        (self.status_code, Json(envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_and_created_use_expected_statuses() {
        assert_eq!(ApiResponse::ok("fine", 1).status_code, StatusCode::OK);
        assert_eq!(ApiResponse::created("made", 1).status_code, StatusCode::CREATED);
        assert_eq!(ApiResponse::message_only("done").status_code, StatusCode::OK);
    }
}
