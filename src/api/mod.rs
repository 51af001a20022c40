pub mod career;
pub mod error;
pub mod health;
pub mod organization;
pub mod validation;

use actix_web::middleware::DefaultHeaders;
use actix_web::web;

/// Headers attached to every response
pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "DENY"))
        .add(("X-XSS-Protection", "1; mode=block"))
}

/// Mount every JSON endpoint under `/api`
pub fn api_config(config: &mut web::ServiceConfig) {
    config.service(
        web::scope("/api")
            .configure(career::handlers::career_config)
            .configure(organization::handlers::organization_config),
    );
}
