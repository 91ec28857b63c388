use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use apimock_store::StoreError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("failed to read request body: {0}")]
    BodyRead(String),

    #[error("method not implemented: {0}")]
    NotImplemented(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// HTTP status reported to the client for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Store(StoreError::MethodNotAllowed { .. }) => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            Self::Store(StoreError::BodyRead(_) | StoreError::Serialization(_))
            | Self::BodyRead(_)
            | Self::Config(_)
            | Self::Io(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            Self::Store(StoreError::NotFound(_)) => status.into_response(),
            Self::Store(StoreError::MethodNotAllowed { .. }) => {
                tracing::debug!(error = %self, "rejected request");
                (status, "Not allowed").into_response()
            }
            Self::NotImplemented(_) => (status, "Not implemented").into_response(),
            _ => {
                tracing::warn!(error = %self, "request failed");
                (status, self.to_string()).into_response()
            }
        }
    }
}

pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        let not_found = ServerError::from(StoreError::NotFound("/x".into()));
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let not_allowed = ServerError::from(StoreError::MethodNotAllowed {
            path: "/x".into(),
            reason: "collection".into(),
        });
        assert_eq!(not_allowed.status_code(), StatusCode::METHOD_NOT_ALLOWED);

        let body = ServerError::from(StoreError::BodyRead(std::io::Error::other("boom")));
        assert_eq!(body.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(
            ServerError::NotImplemented("HEAD".into()).status_code(),
            StatusCode::NOT_IMPLEMENTED
        );
        assert_eq!(
            ServerError::BodyRead("reset".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn responses_carry_status() {
        let resp = ServerError::NotImplemented("PATCH".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);

        let resp = ServerError::from(StoreError::NotFound("/x".into())).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = ServerError::Internal("accept loop failed".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
