use std::sync::Arc;
use tracing::info;

use super::dto::JobSlotsResponse;
use crate::api::error::ServiceError;
use crate::db::CareerStore;
use crate::db::models::MemberRow;

/// Organization lookups backing the team access picker and plan administration
pub struct OrganizationService {
    store: Arc<dyn CareerStore>,
}

impl OrganizationService {
    pub fn new(store: Arc<dyn CareerStore>) -> Self {
        Self { store }
    }

    /// Members of an organization, for the team access dropdown
    pub async fn members(&self, org_id: &str) -> Result<Vec<MemberRow>, ServiceError> {
        let members = self
            .store
            .list_members(org_id)
            .await
            .map_err(|source| ServiceError::Storage {
                operation: "fetch members",
                source,
            })?;

        info!("Service: Fetched {} members for org {}", members.len(), org_id);
        Ok(members)
    }

    /// Grant an organization active-career slots beyond its plan limit
    pub async fn set_extra_job_slots(
        &self,
        org_id: &str,
        extra_job_slots: i32,
    ) -> Result<JobSlotsResponse, ServiceError> {
        let updated = self
            .store
            .set_extra_job_slots(org_id, extra_job_slots)
            .await
            .map_err(|source| ServiceError::Storage {
                operation: "update extra job slots",
                source,
            })?;

        if !updated {
            return Err(ServiceError::OrganizationNotFound(org_id.to_string()));
        }

        info!("Service: Org {} now has {} extra job slots", org_id, extra_job_slots);
        Ok(JobSlotsResponse {
            message: "Extra job slots updated successfully".to_string(),
            extra_job_slots,
        })
    }
}
