use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::dto::CareerResponse;
use super::models::CareerPayload;
use crate::api::error::ServiceError;
use crate::api::validation::validation_messages;
use crate::career::{Career, CareerStatus, InterviewCategory};
use crate::db::CareerStore;
use crate::sanitize::sanitize_value;

/// Fields allowed to carry rich-text HTML
const HTML_FIELDS: &[&str] = &["description"];

/// Career service containing the write-path business rules
pub struct CareerService {
    store: Arc<dyn CareerStore>,
    default_job_limit: i64,
}

impl CareerService {
    /// Create a new CareerService instance
    pub fn new(store: Arc<dyn CareerStore>, default_job_limit: i64) -> Self {
        Self {
            store,
            default_job_limit,
        }
    }

    /// Create a career from a wizard payload
    ///
    /// # Business Logic
    /// - Validates required fields
    /// - Sanitizes every string field
    /// - Checks the organization's active-career quota
    /// - Coerces unknown statuses to inactive
    /// - Rejects inverted salary ranges
    /// - Stores the career under a freshly generated id
    ///
    /// # Returns
    /// - `Ok(CareerResponse)` - Career created, secret prompts stripped
    /// - `Err(ServiceError)` - Creation failed
    pub async fn create_career(&self, payload: CareerPayload) -> Result<CareerResponse, ServiceError> {
        validate(&payload)?;
        let payload = sanitize(payload)?;
        info!("Service: Creating career title={} org_id={}", payload.job_title, payload.org_id);

        self.ensure_quota(&payload.org_id, "add career").await?;

        let status = CareerStatus::from_requested(&payload.status);
        if payload.has_inverted_salary_range() {
            return Err(ServiceError::SalaryRange);
        }

        let now = Utc::now();
        let career = Career {
            id: Uuid::new_v4().to_string(),
            org_id: payload.org_id.clone(),
            status,
            created_by: payload.created_by.clone(),
            created_at: now,
            ..career_fields(&payload, now)
        };

        self.store
            .insert_career(&career)
            .await
            .map_err(|source| ServiceError::Storage {
                operation: "add career",
                source,
            })?;

        info!("Service: Career created successfully with id={}", career.id);

        Ok(CareerResponse {
            message: "Career added successfully".to_string(),
            career: career.public_json().map_err(ServiceError::Serialization)?,
        })
    }

    /// Overwrite an existing career with a wizard payload
    ///
    /// Identity, organization, creator and creation time are kept from the
    /// stored record. Reactivating an inactive career is subject to the quota.
    pub async fn update_career(&self, payload: CareerPayload) -> Result<CareerResponse, ServiceError> {
        validate(&payload)?;
        let payload = sanitize(payload)?;

        let record_id = match payload.record_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return Err(ServiceError::BadRequest("Job Object ID is required".to_string())),
        };
        info!("Service: Updating career id={}", record_id);

        let existing = self
            .store
            .find_career(&record_id)
            .await
            .map_err(|source| ServiceError::Storage {
                operation: "update career",
                source,
            })?
            .ok_or_else(|| ServiceError::CareerNotFound(record_id.clone()))?;

        let status = CareerStatus::from_requested(&payload.status);
        if payload.has_inverted_salary_range() {
            return Err(ServiceError::SalaryRange);
        }
        if status == CareerStatus::Active && existing.status != CareerStatus::Active {
            self.ensure_quota(&existing.org_id, "update career").await?;
        }

        let now = Utc::now();
        let fields = career_fields(&payload, now);
        let career = Career {
            id: existing.id.clone(),
            org_id: existing.org_id.clone(),
            status,
            created_by: existing.created_by.clone(),
            created_at: existing.created_at,
            last_edited_by: fields.last_edited_by.clone().or(existing.last_edited_by.clone()),
            ..fields
        };

        let replaced = self
            .store
            .replace_career(&career)
            .await
            .map_err(|source| ServiceError::Storage {
                operation: "update career",
                source,
            })?;
        if !replaced {
            return Err(ServiceError::CareerNotFound(record_id));
        }

        info!("Service: Career {} updated with status={}", career.id, career.status.as_str());

        Ok(CareerResponse {
            message: "Career updated successfully".to_string(),
            career: career.public_json().map_err(ServiceError::Serialization)?,
        })
    }

    /// Candidate-facing view of a single career
    pub async fn public_career(&self, id: &str) -> Result<serde_json::Value, ServiceError> {
        let career = self
            .store
            .find_career(id)
            .await
            .map_err(|source| ServiceError::Storage {
                operation: "load career",
                source,
            })?
            .ok_or_else(|| ServiceError::CareerNotFound(id.to_string()))?;

        career.public_json().map_err(ServiceError::Serialization)
    }

    async fn ensure_quota(&self, org_id: &str, operation: &'static str) -> Result<(), ServiceError> {
        let storage = |source| ServiceError::Storage { operation, source };

        let organization = self
            .store
            .find_organization(org_id)
            .await
            .map_err(storage)?
            .ok_or_else(|| ServiceError::OrganizationNotFound(org_id.to_string()))?;

        let active = self.store.count_active_careers(org_id).await.map_err(storage)?;
        let allowed = organization.allowed_active_careers(self.default_job_limit);
        info!("Service: Job limits for org {} - active: {}, allowed: {}", org_id, active, allowed);

        if active >= allowed {
            warn!("Service: Organization {} is at its career quota", org_id);
            return Err(ServiceError::QuotaExceeded { active, allowed });
        }
        Ok(())
    }
}

fn validate(payload: &CareerPayload) -> Result<(), ServiceError> {
    payload
        .validate()
        .map_err(|errors| ServiceError::Validation(validation_messages(&errors)))
}

/// Run every string in the payload through the sanitizer
fn sanitize(payload: CareerPayload) -> Result<CareerPayload, ServiceError> {
    let raw = serde_json::to_value(&payload).map_err(ServiceError::Serialization)?;
    serde_json::from_value(sanitize_value(raw, HTML_FIELDS)).map_err(ServiceError::Serialization)
}

/// Editable career fields taken from a payload; identity fields are placeholders
fn career_fields(payload: &CareerPayload, now: chrono::DateTime<Utc>) -> Career {
    Career {
        id: String::new(),
        org_id: String::new(),
        job_title: payload.job_title.clone(),
        description: payload.description.clone(),
        location: payload.location.clone(),
        country: payload.country.clone(),
        province: payload.province.clone(),
        work_setup: payload.work_setup.clone(),
        work_setup_remarks: payload.work_setup_remarks.clone(),
        employment_type: payload.employment_type.clone(),
        status: CareerStatus::Inactive,
        screening_setting: payload.screening_setting,
        require_video: payload.require_video,
        salary_negotiable: payload.salary_negotiable,
        minimum_salary: payload.minimum_salary_value(),
        maximum_salary: payload.maximum_salary_value(),
        currency: if payload.currency.is_empty() {
            "PHP".to_string()
        } else {
            payload.currency.clone()
        },
        questions: payload
            .questions
            .clone()
            .unwrap_or_else(InterviewCategory::default_set),
        pre_screening_questions: payload.pre_screening_questions.clone(),
        team_members: payload.team_members.clone(),
        created_by: None,
        last_edited_by: payload.last_edited_by.clone(),
        cv_secret_prompt: payload.cv_secret_prompt.clone(),
        ai_secret_prompt: payload.ai_secret_prompt.clone(),
        created_at: now,
        updated_at: now,
        last_activity_at: now,
    }
}
