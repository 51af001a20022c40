use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidateEmail, ValidationError};

use crate::career::{
    InterviewCategory, PreScreeningQuestion, ScreeningSetting, TeamMember, UserSlice,
};

/// A salary as it arrives over the wire: either a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SalaryValue {
    Number(f64),
    Text(String),
}

impl SalaryValue {
    /// The numeric value, if the input parses as one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            SalaryValue::Number(n) if n.is_finite() => Some(*n),
            SalaryValue::Number(_) => None,
            SalaryValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }
}

/// Request body shared by the create and update career endpoints
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CareerPayload {
    /// Identity of the career being updated; ignored on create
    #[serde(rename = "_id", alias = "id", skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,

    #[serde(deserialize_with = "lenient_string")]
    #[validate(custom(function = "not_blank", message = "Job title is required"))]
    pub job_title: String,

    #[serde(deserialize_with = "lenient_string")]
    #[validate(custom(function = "not_blank", message = "Job description is required"))]
    pub description: String,

    #[serde(deserialize_with = "lenient_string")]
    #[validate(custom(function = "not_blank", message = "Location is required"))]
    pub location: String,

    #[serde(deserialize_with = "lenient_string")]
    #[validate(custom(function = "not_blank", message = "Work setup is required"))]
    pub work_setup: String,

    pub work_setup_remarks: String,
    pub employment_type: String,
    pub country: String,
    pub province: String,
    pub currency: String,

    #[serde(deserialize_with = "array_or_none")]
    #[validate(required(message = "Questions must be an array"))]
    pub questions: Option<Vec<InterviewCategory>>,

    pub pre_screening_questions: Vec<PreScreeningQuestion>,
    pub team_members: Vec<TeamMember>,

    #[serde(deserialize_with = "lenient_salary")]
    #[validate(custom(
        function = "non_negative_salary",
        message = "Minimum salary must be a positive number"
    ))]
    pub minimum_salary: Option<SalaryValue>,

    #[serde(deserialize_with = "lenient_salary")]
    #[validate(custom(
        function = "non_negative_salary",
        message = "Maximum salary must be a positive number"
    ))]
    pub maximum_salary: Option<SalaryValue>,

    pub salary_negotiable: bool,
    pub screening_setting: ScreeningSetting,
    pub require_video: bool,
    pub status: String,

    #[serde(rename = "orgID")]
    pub org_id: String,

    #[validate(custom(function = "valid_slice_email", message = "Invalid creator email"))]
    pub created_by: Option<UserSlice>,

    #[validate(custom(function = "valid_slice_email", message = "Invalid editor email"))]
    pub last_edited_by: Option<UserSlice>,

    pub cv_secret_prompt: String,
    pub ai_secret_prompt: String,
}

impl CareerPayload {
    pub fn minimum_salary_value(&self) -> Option<f64> {
        self.minimum_salary.as_ref().and_then(SalaryValue::as_number)
    }

    pub fn maximum_salary_value(&self) -> Option<f64> {
        self.maximum_salary.as_ref().and_then(SalaryValue::as_number)
    }

    /// True when both salary bounds are present and the minimum exceeds the maximum
    pub fn has_inverted_salary_range(&self) -> bool {
        matches!(
            (self.minimum_salary_value(), self.maximum_salary_value()),
            (Some(min), Some(max)) if min > max
        )
    }
}

/// Non-string values read as empty so the required-field check reports them
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// Anything that is not a JSON array reads as absent
fn array_or_none<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        items @ Value::Array(_) => serde_json::from_value(items).map(Some).map_err(D::Error::custom),
        _ => Ok(None),
    }
}

/// Salaries of any JSON type; non-numeric ones fail validation instead of parsing
fn lenient_salary<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<SalaryValue>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Number(n) => n.as_f64().map(SalaryValue::Number),
        Value::String(s) => Some(SalaryValue::Text(s)),
        other => Some(SalaryValue::Text(other.to_string())),
    })
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn non_negative_salary(value: &SalaryValue) -> Result<(), ValidationError> {
    match value.as_number() {
        Some(n) if n >= 0.0 => Ok(()),
        _ => Err(ValidationError::new("salary")),
    }
}

fn valid_slice_email(user: &UserSlice) -> Result<(), ValidationError> {
    if user.email.is_empty() || user.email.validate_email() {
        return Ok(());
    }
    Err(ValidationError::new("email"))
}
