use api_types::{FieldError, ValidationError, error::ErrorResponse};
use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

pub use server::{ServerState, router, run_with_listener};

mod expenses;
mod server;

pub enum ServerError {
    Engine(EngineError),
    Validation(ValidationError),
    /// Framework rejection passed through with its own status.
    Rejected { status: StatusCode, message: String },
    Generic(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::IdsExhausted(_) | EngineError::TotalOutOfRange => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::IdsExhausted(_) => {
            tracing::error!("expense store failure: {err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error, details): (_, _, Vec<FieldError>) = match self {
            ServerError::Engine(err) => (
                status_for_engine_error(&err),
                message_for_engine_error(err),
                Vec::new(),
            ),
            ServerError::Validation(err) => {
                tracing::warn!("rejected payload: {err}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "validation failed".to_string(),
                    err.into_errors(),
                )
            }
            ServerError::Rejected { status, message } => (status, message, Vec::new()),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err, Vec::new()),
        };

        (status, Json(ErrorResponse { error, details })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<ValidationError> for ServerError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound(1)).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_exhausted_maps_to_500() {
        let res = ServerError::from(EngineError::IdsExhausted(i64::MAX)).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_maps_to_422() {
        let res = ServerError::from(ValidationError::body("bad")).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn engine_total_out_of_range_maps_to_500() {
        let res = ServerError::from(EngineError::TotalOutOfRange).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn rejected_keeps_its_status() {
        let res = ServerError::Rejected {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: "too big".to_string(),
        }
        .into_response();
        assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
