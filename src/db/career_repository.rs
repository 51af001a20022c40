use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{Pool, Postgres};
use std::fmt;
use tracing::debug;

use crate::career::Career;
use crate::db::models::{CareerRow, MemberRow, OrganizationRow};

/// Storage-level errors
#[derive(Debug)]
pub enum StoreError {
    /// Database operation failed
    Database(sqlx::Error),

    /// A unique constraint rejected the write
    DuplicateKey(String),
}

impl StoreError {
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, StoreError::DuplicateKey(_))
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Database(e) => write!(f, "Database error: {}", e),
            StoreError::DuplicateKey(detail) => write!(f, "duplicate key: {}", detail),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return StoreError::DuplicateKey(db_err.message().to_string());
            }
        }
        StoreError::Database(err)
    }
}

/// Persistence port for careers, organizations and their members
#[async_trait]
pub trait CareerStore: Send + Sync {
    /// Cheap round trip used by health probes
    async fn ping(&self) -> Result<(), StoreError>;

    async fn find_organization(&self, org_id: &str) -> Result<Option<OrganizationRow>, StoreError>;

    async fn count_active_careers(&self, org_id: &str) -> Result<i64, StoreError>;

    async fn insert_career(&self, career: &Career) -> Result<(), StoreError>;

    async fn find_career(&self, id: &str) -> Result<Option<Career>, StoreError>;

    /// Overwrite every editable field of an existing career.
    ///
    /// Returns `false` when no career has the given id.
    async fn replace_career(&self, career: &Career) -> Result<bool, StoreError>;

    async fn list_members(&self, org_id: &str) -> Result<Vec<MemberRow>, StoreError>;

    /// Returns `false` when the organization does not exist
    async fn set_extra_job_slots(&self, org_id: &str, slots: i32) -> Result<bool, StoreError>;
}

const CAREER_COLUMNS: &str = r#"
    id, org_id, job_title, description, location, country, province, work_setup,
    work_setup_remarks, employment_type, status, screening_setting, require_video,
    salary_negotiable, minimum_salary, maximum_salary, currency, questions,
    pre_screening_questions, team_members, created_by, last_edited_by,
    cv_secret_prompt, ai_secret_prompt, created_at, updated_at, last_activity_at
"#;

/// Postgres-backed career store
pub struct PgCareerStore {
    pool: Pool<Postgres>,
}

impl PgCareerStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CareerStore for PgCareerStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }

    async fn find_organization(&self, org_id: &str) -> Result<Option<OrganizationRow>, StoreError> {
        debug!("Looking up organization id={}", org_id);

        let row = sqlx::query_as::<_, OrganizationRow>(
            r#"
            SELECT o.id, o.name, o.plan_id, o.extra_job_slots, p.job_limit
            FROM organizations o
            LEFT JOIN organization_plans p ON p.id = o.plan_id
            WHERE o.id = $1
            "#,
        )
        .bind(org_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn count_active_careers(&self, org_id: &str) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM careers WHERE org_id = $1 AND status = 'active'",
        )
        .bind(org_id)
        .fetch_one(&self.pool)
        .await?;

        debug!("Organization {} has {} active careers", org_id, count);
        Ok(count)
    }

    async fn insert_career(&self, career: &Career) -> Result<(), StoreError> {
        debug!("Inserting career: id={}, org_id={}", career.id, career.org_id);

        let query = format!(
            "INSERT INTO careers ({}) VALUES \
             ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, \
             $19, $20, $21, $22, $23, $24, $25, $26, $27)",
            CAREER_COLUMNS
        );

        sqlx::query(&query)
            .bind(&career.id)
            .bind(&career.org_id)
            .bind(&career.job_title)
            .bind(&career.description)
            .bind(&career.location)
            .bind(&career.country)
            .bind(&career.province)
            .bind(&career.work_setup)
            .bind(&career.work_setup_remarks)
            .bind(&career.employment_type)
            .bind(career.status.as_str())
            .bind(career.screening_setting.as_str())
            .bind(career.require_video)
            .bind(career.salary_negotiable)
            .bind(career.minimum_salary)
            .bind(career.maximum_salary)
            .bind(&career.currency)
            .bind(Json(&career.questions))
            .bind(Json(&career.pre_screening_questions))
            .bind(Json(&career.team_members))
            .bind(career.created_by.as_ref().map(Json))
            .bind(career.last_edited_by.as_ref().map(Json))
            .bind(&career.cv_secret_prompt)
            .bind(&career.ai_secret_prompt)
            .bind(career.created_at)
            .bind(career.updated_at)
            .bind(career.last_activity_at)
            .execute(&self.pool)
            .await?;

        debug!("Career inserted with id={}", career.id);
        Ok(())
    }

    async fn find_career(&self, id: &str) -> Result<Option<Career>, StoreError> {
        let query = format!("SELECT {} FROM careers WHERE id = $1", CAREER_COLUMNS);

        let row = sqlx::query_as::<_, CareerRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Career::from))
    }

    async fn replace_career(&self, career: &Career) -> Result<bool, StoreError> {
        debug!("Replacing career: id={}", career.id);

        let result = sqlx::query(
            r#"
            UPDATE careers SET
                job_title = $2, description = $3, location = $4, country = $5,
                province = $6, work_setup = $7, work_setup_remarks = $8,
                employment_type = $9, status = $10, screening_setting = $11,
                require_video = $12, salary_negotiable = $13, minimum_salary = $14,
                maximum_salary = $15, currency = $16, questions = $17,
                pre_screening_questions = $18, team_members = $19, last_edited_by = $20,
                cv_secret_prompt = $21, ai_secret_prompt = $22, updated_at = $23,
                last_activity_at = $24
            WHERE id = $1
            "#,
        )
        .bind(&career.id)
        .bind(&career.job_title)
        .bind(&career.description)
        .bind(&career.location)
        .bind(&career.country)
        .bind(&career.province)
        .bind(&career.work_setup)
        .bind(&career.work_setup_remarks)
        .bind(&career.employment_type)
        .bind(career.status.as_str())
        .bind(career.screening_setting.as_str())
        .bind(career.require_video)
        .bind(career.salary_negotiable)
        .bind(career.minimum_salary)
        .bind(career.maximum_salary)
        .bind(&career.currency)
        .bind(Json(&career.questions))
        .bind(Json(&career.pre_screening_questions))
        .bind(Json(&career.team_members))
        .bind(career.last_edited_by.as_ref().map(Json))
        .bind(&career.cv_secret_prompt)
        .bind(&career.ai_secret_prompt)
        .bind(career.updated_at)
        .bind(career.last_activity_at)
        .execute(&self.pool)
        .await?;

        let replaced = result.rows_affected() > 0;
        debug!("Career {} replaced: {}", career.id, replaced);
        Ok(replaced)
    }

    async fn list_members(&self, org_id: &str) -> Result<Vec<MemberRow>, StoreError> {
        let members = sqlx::query_as::<_, MemberRow>(
            "SELECT name, email, image FROM members WHERE org_id = $1 ORDER BY name NULLS LAST, email",
        )
        .bind(org_id)
        .fetch_all(&self.pool)
        .await?;

        debug!("Found {} members for organization {}", members.len(), org_id);
        Ok(members)
    }

    async fn set_extra_job_slots(&self, org_id: &str, slots: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE organizations SET extra_job_slots = $2 WHERE id = $1")
            .bind(org_id)
            .bind(slots)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
