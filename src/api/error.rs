use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;
use tracing::{error, warn};

use crate::api::validation::ErrorResponse;
use crate::db::StoreError;

/// Service-level errors
#[derive(Debug)]
pub enum ServiceError {
    /// Storage failed while performing the named operation ("add career", ...)
    Storage {
        operation: &'static str,
        source: StoreError,
    },

    /// Payload could not be re-read after sanitization
    Serialization(serde_json::Error),

    /// Required-field validation failed
    Validation(Vec<String>),

    /// A request field is missing or malformed
    BadRequest(String),

    /// Minimum salary is above maximum salary
    SalaryRange,

    /// The organization already has as many active careers as its plan allows
    QuotaExceeded { active: i64, allowed: i64 },

    /// Organization not found
    OrganizationNotFound(String),

    /// Career not found
    CareerNotFound(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Storage { operation, source } => {
                write!(f, "Storage error during {}: {}", operation, source)
            }
            ServiceError::Serialization(e) => write!(f, "Serialization error: {}", e),
            ServiceError::Validation(errors) => write!(f, "Validation error: {}", errors.join(", ")),
            ServiceError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ServiceError::SalaryRange => write!(f, "Minimum salary cannot be greater than maximum salary"),
            ServiceError::QuotaExceeded { active, allowed } => {
                write!(f, "Active career quota reached: {}/{}", active, allowed)
            }
            ServiceError::OrganizationNotFound(id) => write!(f, "Organization not found: {}", id),
            ServiceError::CareerNotFound(id) => write!(f, "Career not found: {}", id),
        }
    }
}

impl std::error::Error for ServiceError {}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Storage { .. } | ServiceError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServiceError::Validation(_)
            | ServiceError::BadRequest(_)
            | ServiceError::SalaryRange
            | ServiceError::QuotaExceeded { .. } => StatusCode::BAD_REQUEST,
            ServiceError::OrganizationNotFound(_) | ServiceError::CareerNotFound(_) => {
                StatusCode::NOT_FOUND
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::Storage { operation, source } => {
                error!("Storage error during {}: {}", operation, source);
                // internal detail stays in the log
                let message = if source.is_duplicate_key() {
                    "A career with this information already exists".to_string()
                } else {
                    format!("Failed to {}. Please try again.", operation)
                };
                HttpResponse::InternalServerError().json(ErrorResponse::message(message))
            }
            ServiceError::Serialization(e) => {
                error!("Serialization error: {}", e);
                HttpResponse::InternalServerError()
                    .json(ErrorResponse::message("Failed to process request"))
            }
            ServiceError::Validation(errors) => {
                warn!("Validation error: {}", errors.join(", "));
                HttpResponse::BadRequest().json(ErrorResponse {
                    error: "Validation failed".to_string(),
                    details: errors.clone(),
                    fields: serde_json::Value::Null,
                })
            }
            ServiceError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                HttpResponse::BadRequest().json(ErrorResponse::message(msg.clone()))
            }
            ServiceError::SalaryRange => {
                warn!("Rejected inverted salary range");
                HttpResponse::BadRequest().json(ErrorResponse::message(
                    "Minimum salary cannot be greater than maximum salary",
                ))
            }
            ServiceError::QuotaExceeded { active, allowed } => {
                warn!("Active career quota reached: {}/{}", active, allowed);
                HttpResponse::BadRequest().json(ErrorResponse::message(
                    "You have reached the maximum number of jobs for your plan",
                ))
            }
            ServiceError::OrganizationNotFound(id) => {
                warn!("Organization not found: {}", id);
                HttpResponse::NotFound().json(ErrorResponse::message("Organization not found"))
            }
            ServiceError::CareerNotFound(id) => {
                warn!("Career not found: {}", id);
                HttpResponse::NotFound().json(ErrorResponse::message("Career not found"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_maps_to_server_error() {
        let err = ServiceError::Storage {
            operation: "add career",
            source: StoreError::DuplicateKey("careers_pkey".to_string()),
        };
        assert_eq!(err.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn quota_and_salary_are_bad_requests() {
        let quota = ServiceError::QuotaExceeded { active: 3, allowed: 3 };
        assert_eq!(quota.error_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(ServiceError::SalaryRange.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_records_are_not_found() {
        let org = ServiceError::OrganizationNotFound("org-x".to_string());
        let career = ServiceError::CareerNotFound("c-x".to_string());
        assert_eq!(org.error_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(career.error_response().status(), StatusCode::NOT_FOUND);
    }
}
