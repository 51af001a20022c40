use actix_web::{HttpResponse, Responder, get, web};
use serde::Serialize;
use tracing::error;

use crate::db::CareerStore;

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    database: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint
///
/// General health check including database connectivity.
#[get("/health")]
async fn health_check(store: web::Data<dyn CareerStore>) -> impl Responder {
    match store.ping().await {
        Ok(()) => HttpResponse::Ok().json(HealthResponse {
            status: "healthy".to_string(),
            database: "connected".to_string(),
            error: None,
        }),
        Err(e) => {
            error!("Health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(HealthResponse {
                status: "unhealthy".to_string(),
                database: "disconnected".to_string(),
                error: Some(e.to_string()),
            })
        }
    }
}

/// Readiness check endpoint
///
/// Returns 503 while the database is unreachable; the process recovers on its own
/// once it comes back.
#[get("/ready")]
async fn readiness_check(store: web::Data<dyn CareerStore>) -> impl Responder {
    match store.ping().await {
        Ok(()) => HttpResponse::Ok().json(HealthResponse {
            status: "ready".to_string(),
            database: "connected".to_string(),
            error: None,
        }),
        Err(e) => {
            error!("Readiness check failed: database unavailable: {}", e);
            HttpResponse::ServiceUnavailable().json(HealthResponse {
                status: "not_ready".to_string(),
                database: "disconnected".to_string(),
                error: Some(format!("Database unavailable: {}", e)),
            })
        }
    }
}

/// Liveness check endpoint
///
/// Does not check dependencies.
#[get("/live")]
async fn liveness_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "alive".to_string(),
        database: "not_checked".to_string(),
        error: None,
    })
}

pub fn health_config(config: &mut web::ServiceConfig) {
    config
        .service(health_check)
        .service(readiness_check)
        .service(liveness_check);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryCareerStore;
    use actix_web::{App, http::StatusCode, test};
    use std::sync::Arc;

    async fn status_of(store: Arc<dyn CareerStore>, uri: &str) -> StatusCode {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(store))
                .configure(health_config),
        )
        .await;
        let req = test::TestRequest::get().uri(uri).to_request();
        test::call_service(&app, req).await.status()
    }

    #[actix_web::test]
    async fn healthy_store_reports_ok() {
        let store: Arc<dyn CareerStore> = Arc::new(MemoryCareerStore::new());
        assert_eq!(status_of(store.clone(), "/health").await, StatusCode::OK);
        assert_eq!(status_of(store, "/ready").await, StatusCode::OK);
    }

    #[actix_web::test]
    async fn unavailable_store_is_not_ready_but_alive() {
        let store: Arc<dyn CareerStore> = Arc::new(MemoryCareerStore::unavailable());
        assert_eq!(status_of(store.clone(), "/ready").await, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(status_of(store, "/live").await, StatusCode::OK);
    }
}
