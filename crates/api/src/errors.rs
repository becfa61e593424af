use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pihole_collector_domain::DomainError;
use serde_json::json;
use tracing::error;

pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DomainError::ConnectFailed { .. }
            | DomainError::CommandWrite(_)
            | DomainError::StreamRead(_) => StatusCode::BAD_GATEWAY,

            DomainError::InvalidQueryLine(_) | DomainError::Metrics(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        error!(status = %status, error = %self.0, "Request failed");

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
