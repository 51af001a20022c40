use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

use crate::career::{
    Career, CareerStatus, InterviewCategory, PreScreeningQuestion, ScreeningSetting, TeamMember,
    UserSlice,
};

/// Database representation of a career with all fields
#[derive(Debug, FromRow)]
pub struct CareerRow {
    pub id: String,
    pub org_id: String,
    pub job_title: String,
    pub description: String,
    pub location: String,
    pub country: String,
    pub province: String,
    pub work_setup: String,
    pub work_setup_remarks: String,
    pub employment_type: String,
    pub status: String,
    pub screening_setting: String,
    pub require_video: bool,
    pub salary_negotiable: bool,
    pub minimum_salary: Option<f64>,
    pub maximum_salary: Option<f64>,
    pub currency: String,
    pub questions: Json<Vec<InterviewCategory>>,
    pub pre_screening_questions: Json<Vec<PreScreeningQuestion>>,
    pub team_members: Json<Vec<TeamMember>>,
    pub created_by: Option<Json<UserSlice>>,
    pub last_edited_by: Option<Json<UserSlice>>,
    pub cv_secret_prompt: String,
    pub ai_secret_prompt: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

impl From<CareerRow> for Career {
    fn from(row: CareerRow) -> Self {
        Career {
            id: row.id,
            org_id: row.org_id,
            job_title: row.job_title,
            description: row.description,
            location: row.location,
            country: row.country,
            province: row.province,
            work_setup: row.work_setup,
            work_setup_remarks: row.work_setup_remarks,
            employment_type: row.employment_type,
            status: CareerStatus::from_requested(&row.status),
            screening_setting: ScreeningSetting::parse(&row.screening_setting).unwrap_or_default(),
            require_video: row.require_video,
            salary_negotiable: row.salary_negotiable,
            minimum_salary: row.minimum_salary,
            maximum_salary: row.maximum_salary,
            currency: row.currency,
            questions: row.questions.0,
            pre_screening_questions: row.pre_screening_questions.0,
            team_members: row.team_members.0,
            created_by: row.created_by.map(|j| j.0),
            last_edited_by: row.last_edited_by.map(|j| j.0),
            cv_secret_prompt: row.cv_secret_prompt,
            ai_secret_prompt: row.ai_secret_prompt,
            created_at: row.created_at,
            updated_at: row.updated_at,
            last_activity_at: row.last_activity_at,
        }
    }
}

/// An organization joined with its subscription plan
#[derive(Debug, Clone, FromRow)]
pub struct OrganizationRow {
    pub id: String,
    pub name: String,
    pub plan_id: Option<String>,
    pub extra_job_slots: i32,
    /// `None` when the organization has no plan or the plan sets no limit
    pub job_limit: Option<i32>,
}

impl OrganizationRow {
    /// Number of postings that may be active at once
    pub fn allowed_active_careers(&self, default_job_limit: i64) -> i64 {
        let limit = match self.job_limit {
            Some(limit) if limit > 0 => i64::from(limit),
            _ => default_job_limit,
        };
        limit + i64::from(self.extra_job_slots)
    }
}

/// Organization member as shown in the team access picker
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct MemberRow {
    pub name: Option<String>,
    pub email: String,
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn org(job_limit: Option<i32>, extra: i32) -> OrganizationRow {
        OrganizationRow {
            id: "org-1".to_string(),
            name: "Acme".to_string(),
            plan_id: Some("basic".to_string()),
            extra_job_slots: extra,
            job_limit,
        }
    }

    #[test]
    fn plan_limit_plus_extra_slots() {
        assert_eq!(org(Some(3), 2).allowed_active_careers(999), 5);
    }

    #[test]
    fn missing_or_zero_limit_uses_default() {
        assert_eq!(org(None, 0).allowed_active_careers(999), 999);
        assert_eq!(org(Some(0), 1).allowed_active_careers(999), 1000);
    }
}
