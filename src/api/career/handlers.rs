use actix_web::{
    HttpResponse, get, post,
    web::{Data, Path, ServiceConfig},
};
use actix_web_validator::Json;

use super::models::CareerPayload;
use super::service::CareerService;
use crate::api::error::ServiceError;

#[post("/add-career")]
async fn add_career(
    service: Data<CareerService>,
    payload: Json<CareerPayload>,
) -> Result<HttpResponse, ServiceError> {
    let response = service.create_career(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/update-career")]
async fn update_career(
    service: Data<CareerService>,
    payload: Json<CareerPayload>,
) -> Result<HttpResponse, ServiceError> {
    let response = service.update_career(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Public job-opening view of a career
#[get("/careers/{id}")]
async fn get_career(
    service: Data<CareerService>,
    path: Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let career = service.public_career(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(career))
}

pub fn career_config(config: &mut ServiceConfig) {
    config
        .service(add_career)
        .service(update_career)
        .service(get_career);
}
