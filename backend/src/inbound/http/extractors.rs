//! Extractor configuration turning malformed input into error envelopes.
//!
//! Actix rejects undecodable JSON bodies, query strings and path segments
//! with plain-text responses by default. These handlers route the rejection
//! through [`Error`] instead so every 400 has the same shape.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};

use crate::domain::Error;

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("Request body is invalid: {err}")).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("Query string is invalid: {err}")).into()
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_identifier(format!("Path is invalid: {err}")).into()
}

/// Register the envelope-producing extractor configs on a scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error));
}
