use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of the member listing request
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct MembersRequest {
    #[serde(rename = "orgID", default)]
    #[validate(length(min = 1, message = "orgID is required"))]
    pub org_id: String,
}

/// Body of the admin request granting extra job slots
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct JobSlotsRequest {
    #[serde(rename = "orgID", default)]
    #[validate(length(min = 1, message = "orgID and extraJobSlots are required"))]
    pub org_id: String,

    #[serde(rename = "extraJobSlots", default)]
    #[validate(
        required(message = "orgID and extraJobSlots are required"),
        range(min = 0, message = "extraJobSlots cannot be negative")
    )]
    pub extra_job_slots: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JobSlotsResponse {
    pub message: String,
    #[serde(rename = "extraJobSlots")]
    pub extra_job_slots: i32,
}
