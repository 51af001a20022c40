use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::form::CareerFormData;
use crate::api::career::dto::CareerResponse;
use crate::api::career::models::SalaryValue;
use crate::api::career::CareerPayload;
use crate::career::{CareerStatus, UserSlice};

/// Error reported by the career endpoints, or by the transport on the way there
#[derive(Debug, Clone, PartialEq)]
pub struct ApiFailure {
    pub status: Option<u16>,
    pub message: String,
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} ({})", self.message, status),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ApiFailure {}

/// Client side of `/api/add-career` and `/api/update-career`
#[async_trait]
pub trait CareerApi: Send + Sync {
    async fn create_career(&self, payload: &CareerPayload) -> Result<CareerResponse, ApiFailure>;
    async fn update_career(&self, payload: &CareerPayload) -> Result<CareerResponse, ApiFailure>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct HttpCareerApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCareerApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn post(&self, path: &str, payload: &CareerPayload) -> Result<CareerResponse, ApiFailure> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(transport_failure)?;

        let status = response.status();
        if status.is_success() {
            return response.json::<CareerResponse>().await.map_err(transport_failure);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.canonical_reason().unwrap_or("Request failed").to_string(),
        };
        warn!("POST {} failed with {}: {}", url, status, message);
        Err(ApiFailure {
            status: Some(status.as_u16()),
            message,
        })
    }
}

fn transport_failure(e: reqwest::Error) -> ApiFailure {
    ApiFailure {
        status: e.status().map(|s| s.as_u16()),
        message: e.to_string(),
    }
}

#[async_trait]
impl CareerApi for HttpCareerApi {
    async fn create_career(&self, payload: &CareerPayload) -> Result<CareerResponse, ApiFailure> {
        self.post("/api/add-career", payload).await
    }

    async fn update_career(&self, payload: &CareerPayload) -> Result<CareerResponse, ApiFailure> {
        self.post("/api/update-career", payload).await
    }
}

/// Who is submitting, and for which organization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub user: UserSlice,
    pub org_id: String,
}

/// True when both salaries are set, non-zero and the minimum is larger
pub fn has_inverted_salary_range(form: &CareerFormData) -> bool {
    matches!(
        (form.minimum_salary, form.maximum_salary),
        (Some(min), Some(max)) if min != 0.0 && max != 0.0 && min > max
    )
}

/// Build the wire payload for a create (`record_id == None`) or an update
pub fn build_payload(
    form: &CareerFormData,
    status: CareerStatus,
    session: &Session,
    record_id: Option<&str>,
) -> CareerPayload {
    CareerPayload {
        record_id: record_id.map(str::to_string),
        job_title: form.job_title.clone(),
        description: form.description.clone(),
        location: form.city.clone(),
        work_setup: form.work_setup.clone(),
        work_setup_remarks: form.work_setup_remarks.clone(),
        employment_type: form.employment_type.clone(),
        country: form.country.clone(),
        province: form.province.clone(),
        currency: form.currency.clone(),
        questions: Some(form.questions.clone()),
        pre_screening_questions: form.pre_screening_questions.clone(),
        team_members: form.team_members.clone(),
        minimum_salary: form.minimum_salary.map(SalaryValue::Number),
        maximum_salary: form.maximum_salary.map(SalaryValue::Number),
        salary_negotiable: form.salary_negotiable,
        screening_setting: form.screening_setting,
        require_video: form.require_video,
        status: status.as_str().to_string(),
        org_id: session.org_id.clone(),
        created_by: Some(session.user.clone()),
        last_edited_by: Some(session.user.clone()),
        cv_secret_prompt: form.cv_secret_prompt.clone(),
        ai_secret_prompt: form.ai_secret_prompt.clone(),
    }
}

/// Message shown to the recruiter when a create fails
pub fn create_failure_message(failure: &ApiFailure) -> &'static str {
    let message = failure.message.to_lowercase();
    if message.contains("already exists") || message.contains("duplicate key") {
        "A career with this information already exists"
    } else {
        "Failed to add career"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, HttpServer, dev::ServerHandle, web};
    use serde_json::{Value, json};

    async fn fake_add_career(body: web::Json<Value>) -> HttpResponse {
        match body["jobTitle"].as_str() {
            Some("Duplicate") => HttpResponse::InternalServerError()
                .json(json!({ "error": "A career with this information already exists" })),
            Some("Plain") => HttpResponse::BadGateway().body("upstream down"),
            _ => HttpResponse::Ok().json(json!({
                "message": "Career added successfully",
                "career": { "id": "c-1", "jobTitle": body["jobTitle"] }
            })),
        }
    }

    async fn fake_update_career(body: web::Json<Value>) -> HttpResponse {
        HttpResponse::Ok().json(json!({
            "message": "Career updated successfully",
            "career": { "id": body["_id"] }
        }))
    }

    /// Serve the two career endpoints on an ephemeral port
    fn start_server() -> (String, ServerHandle) {
        let server = HttpServer::new(|| {
            App::new()
                .route("/api/add-career", web::post().to(fake_add_career))
                .route("/api/update-career", web::post().to(fake_update_career))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        (format!("http://{}/", addr), handle)
    }

    fn titled(title: &str) -> CareerPayload {
        let form = CareerFormData {
            job_title: title.to_string(),
            ..Default::default()
        };
        build_payload(&form, CareerStatus::Active, &session(), None)
    }

    #[actix_web::test]
    async fn http_api_decodes_success_and_error_bodies() {
        let (base_url, handle) = start_server();
        let api = HttpCareerApi::new(base_url);

        let created = api.create_career(&titled("Backend Engineer")).await.unwrap();
        assert_eq!(created.message, "Career added successfully");
        assert_eq!(created.career["jobTitle"], "Backend Engineer");

        let failure = api.create_career(&titled("Duplicate")).await.unwrap_err();
        assert_eq!(failure.status, Some(500));
        assert_eq!(failure.message, "A career with this information already exists");
        assert_eq!(
            create_failure_message(&failure),
            "A career with this information already exists"
        );

        let failure = api.create_career(&titled("Plain")).await.unwrap_err();
        assert_eq!(failure.status, Some(502));
        assert_eq!(failure.message, "Bad Gateway");
        assert_eq!(create_failure_message(&failure), "Failed to add career");

        let mut payload = titled("Backend Engineer");
        payload.record_id = Some("c-9".to_string());
        let updated = api.update_career(&payload).await.unwrap();
        assert_eq!(updated.message, "Career updated successfully");
        assert_eq!(updated.career["id"], "c-9");

        handle.stop(true).await;
    }

    #[actix_web::test]
    async fn http_api_reports_unreachable_server() {
        let api = HttpCareerApi::new("http://127.0.0.1:1");
        let failure = api.create_career(&titled("Backend Engineer")).await.unwrap_err();
        assert_eq!(failure.status, None);
        assert!(!failure.message.is_empty());
    }

    fn session() -> Session {
        Session {
            user: UserSlice {
                name: "Rita".to_string(),
                email: "rita@example.com".to_string(),
                image: None,
            },
            org_id: "org-1".to_string(),
        }
    }

    #[test]
    fn payload_carries_city_as_location() {
        let form = CareerFormData {
            job_title: "QA".to_string(),
            province: "Cebu".to_string(),
            city: "Mandaue".to_string(),
            minimum_salary: Some(20_000.0),
            ..Default::default()
        };

        let payload = build_payload(&form, CareerStatus::Active, &session(), None);
        assert_eq!(payload.location, "Mandaue");
        assert_eq!(payload.province, "Cebu");
        assert_eq!(payload.status, "active");
        assert_eq!(payload.org_id, "org-1");
        assert_eq!(payload.record_id, None);
        assert_eq!(payload.minimum_salary_value(), Some(20_000.0));
        assert_eq!(payload.maximum_salary, None);
        assert_eq!(payload.created_by, payload.last_edited_by);
        assert_eq!(payload.questions.map(|q| q.len()), Some(5));
    }

    #[test]
    fn update_payload_serializes_the_record_id() {
        let payload = build_payload(
            &CareerFormData::default(),
            CareerStatus::Inactive,
            &session(),
            Some("c-9"),
        );
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["_id"], "c-9");
        assert_eq!(value["status"], "inactive");
        assert_eq!(value["orgID"], "org-1");
    }

    #[test]
    fn inverted_salary_ignores_zero_and_missing_values() {
        let mut form = CareerFormData {
            minimum_salary: Some(100_000.0),
            maximum_salary: Some(50_000.0),
            ..Default::default()
        };
        assert!(has_inverted_salary_range(&form));

        form.maximum_salary = Some(0.0);
        assert!(!has_inverted_salary_range(&form));

        form.maximum_salary = None;
        assert!(!has_inverted_salary_range(&form));

        form.minimum_salary = Some(50_000.0);
        form.maximum_salary = Some(100_000.0);
        assert!(!has_inverted_salary_range(&form));
    }

    #[test]
    fn duplicate_failures_get_their_own_message() {
        let duplicate = ApiFailure {
            status: Some(500),
            message: "A career with this information already exists".to_string(),
        };
        let other = ApiFailure {
            status: None,
            message: "connection refused".to_string(),
        };
        assert_eq!(
            create_failure_message(&duplicate),
            "A career with this information already exists"
        );
        assert_eq!(create_failure_message(&other), "Failed to add career");
    }
}
