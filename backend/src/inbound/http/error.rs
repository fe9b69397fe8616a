//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into the catalogue's JSON error envelope:
//!
//! ```json
//! {"error_code": 404, "error_source": "Requested book does not exist.", "error_reason": "NONEXISTENT_RESOURCE"}
//! ```

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::TraceId;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::InvalidIdentifier => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
pub(crate) struct ErrorEnvelope<'a> {
    pub error_code: u16,
    pub error_source: &'a str,
    pub error_reason: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<&'a Value>,
}

impl<'a> From<&'a Error> for ErrorEnvelope<'a> {
    fn from(error: &'a Error) -> Self {
        Self {
            error_code: status_for(error.code()).as_u16(),
            error_source: error.message(),
            error_reason: error.code().reason(),
            details: error.details(),
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let trace_id = TraceId::current().map(|id| id.to_string());
        match self.code() {
            ErrorCode::InternalError => error!(
                trace_id = trace_id.as_deref(),
                error_source = self.message(),
                "request failed"
            ),
            _ => info!(
                trace_id = trace_id.as_deref(),
                error_reason = self.code().reason(),
                error_source = self.message(),
                "request rejected"
            ),
        }
        HttpResponse::build(self.status_code()).json(ErrorEnvelope::from(self))
    }
}
