use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failures raised while serving a turn.
///
/// Exhaustion of a thread is not an error; it is reported by the windower
/// returning no chunk.
#[derive(Error, Debug)]
pub enum SkillError {
    /// Upstream feed answered with a non-success status.
    #[error("Can't pull {resource}, response status code is {status}")]
    Fetch { resource: &'static str, status: u16 },

    #[error("Fetching {resource} timed out")]
    Timeout { resource: &'static str },

    #[error("Transport error while fetching {resource}: {message}")]
    Transport {
        resource: &'static str,
        message: String,
    },

    #[error("Malformed {resource} payload: {message}")]
    Decode {
        resource: &'static str,
        message: String,
    },

    /// A thread-indexed operation ran before the thread list was loaded.
    #[error("Threads are not initialized")]
    UninitializedSession,

    #[error("Request carries no user id")]
    MissingUserId,
}

impl SkillError {
    pub fn from_reqwest(resource: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SkillError::Timeout { resource }
        } else if let Some(status) = err.status() {
            SkillError::Fetch {
                resource,
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            SkillError::Decode {
                resource,
                message: err.to_string(),
            }
        } else {
            SkillError::Transport {
                resource,
                message: err.to_string(),
            }
        }
    }

    /// Whether the failure came from an upstream fetch (as opposed to a
    /// broken invariant inside the dispatcher).
    pub fn is_upstream(&self) -> bool {
        !matches!(
            self,
            SkillError::UninitializedSession | SkillError::MissingUserId
        )
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "BadRequest", msg)
            }
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "NotFound", msg)
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "InternalError", msg)
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<SkillError> for ApiError {
    fn from(err: SkillError) -> Self {
        match err {
            SkillError::MissingUserId => ApiError::BadRequest(err.to_string()),
            _ => ApiError::InternalError(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_message_carries_status() {
        let err = SkillError::Fetch {
            resource: "threads",
            status: 503,
        };
        assert_eq!(
            err.to_string(),
            "Can't pull threads, response status code is 503"
        );
        assert!(err.is_upstream());
    }

    #[test]
    fn test_uninitialized_is_not_upstream() {
        assert!(!SkillError::UninitializedSession.is_upstream());
        assert!(!SkillError::MissingUserId.is_upstream());
    }

    #[test]
    fn test_missing_user_id_is_bad_request() {
        let response = ApiError::from(SkillError::MissingUserId).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_bad_request_status() {
        let response = ApiError::BadRequest("missing user id".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
