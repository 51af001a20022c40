use actix_web::{
    HttpResponse, post,
    web::{Data, ServiceConfig, scope},
};
use actix_web_validator::Json;

use super::dto::{JobSlotsRequest, MembersRequest};
use super::service::OrganizationService;
use crate::api::error::ServiceError;

#[post("/fetch-members")]
async fn fetch_members(
    service: Data<OrganizationService>,
    request: Json<MembersRequest>,
) -> Result<HttpResponse, ServiceError> {
    let members = service.members(&request.org_id).await?;
    Ok(HttpResponse::Ok().json(members))
}

#[post("/update-org-job-slots")]
async fn update_org_job_slots(
    service: Data<OrganizationService>,
    request: Json<JobSlotsRequest>,
) -> Result<HttpResponse, ServiceError> {
    // presence is enforced by validation
    let slots = request.extra_job_slots.unwrap_or_default();
    let response = service.set_extra_job_slots(&request.org_id, slots).await?;
    Ok(HttpResponse::Ok().json(response))
}

pub fn organization_config(config: &mut ServiceConfig) {
    config
        .service(fetch_members)
        .service(scope("admin").service(update_org_job_slots));
}
