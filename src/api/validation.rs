use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use actix_web_validator::error::DeserializeErrors;
use serde::Serialize;
use validator::ValidationErrors;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub fields: serde_json::Value,
}

impl ErrorResponse {
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Vec::new(),
            fields: serde_json::Value::Null,
        }
    }
}

/// Order in which field messages are reported; unlisted fields follow by name
const FIELD_ORDER: &[&str] = &[
    "job_title",
    "description",
    "location",
    "work_setup",
    "questions",
    "minimum_salary",
    "maximum_salary",
    "created_by",
    "last_edited_by",
    "org_id",
    "extra_job_slots",
];

fn field_rank(field: &str) -> usize {
    FIELD_ORDER
        .iter()
        .position(|f| *f == field)
        .unwrap_or(FIELD_ORDER.len())
}

fn field_message(field: &str, error: &validator::ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| format!("Validation error in field: {}", field))
}

/// Flatten validator field errors into user-facing messages, in form order
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| (field_rank(a.0), a.0).cmp(&(field_rank(b.0), b.0)));

    fields
        .into_iter()
        .flat_map(|(field, errors)| errors.iter().map(move |e| field_message(field, e)))
        .collect()
}

fn error_response(status: StatusCode, body: ErrorResponse) -> actix_web::Error {
    actix_web::error::InternalError::from_response("", HttpResponse::build(status).json(body)).into()
}

fn bad_request(body: ErrorResponse) -> actix_web::Error {
    error_response(StatusCode::BAD_REQUEST, body)
}

/// A body that is not valid JSON for the target type
fn deserialize_failure(err: &serde_json::Error) -> actix_web::Error {
    let err_string = err.to_string();
    let message = if err_string.contains("EOF while parsing") {
        "Request body is empty. Expected JSON payload"
    } else if err_string.contains("unknown variant") {
        "Invalid enum value. Check allowed values for this field"
    } else {
        "Invalid JSON format"
    };

    bad_request(ErrorResponse {
        error: "Request validation failed".to_string(),
        details: Vec::new(),
        fields: serde_json::json!({ "message": message }),
    })
}

/// Creates a configured JsonConfig with standardized error handling for the entire project
pub fn json_config() -> actix_web_validator::JsonConfig {
    actix_web_validator::JsonConfig::default()
        .error_handler(|err, _req| {
            match err {
                actix_web_validator::Error::Validate(validation_errors) => {
                    let mut fields = serde_json::Map::new();
                    for (field, errors) in validation_errors.field_errors() {
                        let messages: Vec<String> =
                            errors.iter().map(|e| field_message(field, e)).collect();
                        fields.insert(
                            field.to_string(),
                            serde_json::json!({"errors": messages})
                        );
                    }

                    bad_request(ErrorResponse {
                        error: "Validation failed".to_string(),
                        details: validation_messages(&validation_errors),
                        fields: serde_json::Value::Object(fields),
                    })
                }
                actix_web_validator::Error::JsonPayloadError(JsonPayloadError::Deserialize(de_err))
                | actix_web_validator::Error::Deserialize(DeserializeErrors::DeserializeJson(de_err)) => {
                    deserialize_failure(&de_err)
                }
                actix_web_validator::Error::JsonPayloadError(JsonPayloadError::ContentType) => {
                    bad_request(ErrorResponse::message("Content-Type must be application/json"))
                }
                actix_web_validator::Error::JsonPayloadError(
                    JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. },
                ) => error_response(
                    StatusCode::PAYLOAD_TOO_LARGE,
                    ErrorResponse::message("Request body is too large"),
                ),
                other => bad_request(ErrorResponse {
                    error: "Request validation failed".to_string(),
                    details: Vec::new(),
                    fields: serde_json::json!({ "message": other.to_string() }),
                }),
            }
        })
}
