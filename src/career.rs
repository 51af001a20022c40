use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the external evaluator promotes screened candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum ScreeningSetting {
    #[default]
    #[serde(rename = "Good Fit and above")]
    GoodFitAndAbove,
    #[serde(rename = "Only Strong Fit")]
    OnlyStrongFit,
    #[serde(rename = "No Automatic Promotion")]
    NoAutomaticPromotion,
}

impl ScreeningSetting {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreeningSetting::GoodFitAndAbove => "Good Fit and above",
            ScreeningSetting::OnlyStrongFit => "Only Strong Fit",
            ScreeningSetting::NoAutomaticPromotion => "No Automatic Promotion",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Good Fit and above" => Some(ScreeningSetting::GoodFitAndAbove),
            "Only Strong Fit" => Some(ScreeningSetting::OnlyStrongFit),
            "No Automatic Promotion" => Some(ScreeningSetting::NoAutomaticPromotion),
            _ => None,
        }
    }
}

/// Publication state of a persisted career
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CareerStatus {
    Active,
    #[default]
    Inactive,
    Draft,
}

impl CareerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CareerStatus::Active => "active",
            CareerStatus::Inactive => "inactive",
            CareerStatus::Draft => "draft",
        }
    }

    /// Maps a requested status string onto a known status.
    ///
    /// Anything unrecognised becomes `Inactive`.
    pub fn from_requested(value: &str) -> Self {
        match value {
            "active" => CareerStatus::Active,
            "draft" => CareerStatus::Draft,
            _ => CareerStatus::Inactive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InterviewQuestion {
    pub id: String,
    pub question: String,
}

/// A named group of AI interview questions
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewCategory {
    pub id: u32,
    pub category: String,
    #[serde(default)]
    pub question_count_to_ask: Option<u32>,
    #[serde(default)]
    pub questions: Vec<InterviewQuestion>,
}

impl InterviewCategory {
    fn empty(id: u32, category: &str) -> Self {
        Self {
            id,
            category: category.to_string(),
            question_count_to_ask: None,
            questions: Vec::new(),
        }
    }

    /// The five categories every new career starts with
    pub fn default_set() -> Vec<Self> {
        vec![
            Self::empty(1, "CV Validation / Experience"),
            Self::empty(2, "Technical"),
            Self::empty(3, "Behavioral"),
            Self::empty(4, "Analytical"),
            Self::empty(5, "Others"),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PreScreeningKind {
    #[default]
    Dropdown,
    Text,
    Range,
}

/// A question candidates answer before their CV is screened
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreScreeningQuestion {
    pub id: String,
    pub question: String,
    #[serde(rename = "type", default)]
    pub kind: PreScreeningKind,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_max: Option<f64>,
}

impl PreScreeningQuestion {
    /// True when the question can be shown to a candidate as-is
    pub fn is_complete(&self) -> bool {
        if self.question.trim().is_empty() {
            return false;
        }
        match self.kind {
            PreScreeningKind::Dropdown => self.options.iter().any(|o| !o.trim().is_empty()),
            PreScreeningKind::Text | PreScreeningKind::Range => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum TeamRole {
    #[default]
    #[serde(rename = "Job Owner")]
    JobOwner,
    #[serde(rename = "Contributor")]
    Contributor,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TeamMember {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub role: TeamRole,
}

/// The name/email/image triple stamped on careers as creator and editor
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct UserSlice {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// A persisted job posting
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Career {
    pub id: String,
    #[serde(rename = "orgID")]
    pub org_id: String,
    pub job_title: String,
    pub description: String,
    pub location: String,
    pub country: String,
    pub province: String,
    pub work_setup: String,
    pub work_setup_remarks: String,
    pub employment_type: String,
    pub status: CareerStatus,
    pub screening_setting: ScreeningSetting,
    pub require_video: bool,
    pub salary_negotiable: bool,
    pub minimum_salary: Option<f64>,
    pub maximum_salary: Option<f64>,
    pub currency: String,
    pub questions: Vec<InterviewCategory>,
    pub pre_screening_questions: Vec<PreScreeningQuestion>,
    pub team_members: Vec<TeamMember>,
    pub created_by: Option<UserSlice>,
    pub last_edited_by: Option<UserSlice>,
    pub cv_secret_prompt: String,
    pub ai_secret_prompt: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

impl Career {
    /// JSON view of the career with the evaluator prompts removed.
    ///
    /// Secret prompts steer the CV and interview evaluators and must never
    /// reach a candidate-facing response.
    pub fn public_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        let mut value = serde_json::to_value(self)?;
        if let Some(map) = value.as_object_mut() {
            map.remove("cvSecretPrompt");
            map.remove("aiSecretPrompt");
        }
        Ok(value)
    }
}
