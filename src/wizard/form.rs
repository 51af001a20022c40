use serde::{Deserialize, Serialize};

use crate::career::{
    Career, InterviewCategory, PreScreeningQuestion, ScreeningSetting, TeamMember,
};

/// The job posting draft being edited in the wizard
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CareerFormData {
    pub job_title: String,
    pub description: String,
    pub work_setup: String,
    pub work_setup_remarks: String,
    pub employment_type: String,
    pub country: String,
    pub province: String,
    pub city: String,
    pub salary_negotiable: bool,
    pub minimum_salary: Option<f64>,
    pub maximum_salary: Option<f64>,
    pub currency: String,
    pub screening_setting: ScreeningSetting,
    pub require_video: bool,
    pub questions: Vec<InterviewCategory>,
    pub team_members: Vec<TeamMember>,
    pub cv_secret_prompt: String,
    pub pre_screening_questions: Vec<PreScreeningQuestion>,
    pub ai_secret_prompt: String,
}

impl Default for CareerFormData {
    fn default() -> Self {
        Self {
            job_title: String::new(),
            description: String::new(),
            work_setup: String::new(),
            work_setup_remarks: String::new(),
            employment_type: "Full-Time".to_string(),
            country: "Philippines".to_string(),
            province: String::new(),
            city: String::new(),
            salary_negotiable: true,
            minimum_salary: None,
            maximum_salary: None,
            currency: "PHP".to_string(),
            screening_setting: ScreeningSetting::default(),
            require_video: true,
            questions: InterviewCategory::default_set(),
            team_members: Vec::new(),
            cv_secret_prompt: String::new(),
            pre_screening_questions: Vec::new(),
            ai_secret_prompt: String::new(),
        }
    }
}

impl CareerFormData {
    /// Seed a form from a persisted career for editing
    pub fn from_career(career: &Career) -> Self {
        Self {
            job_title: career.job_title.clone(),
            description: career.description.clone(),
            work_setup: career.work_setup.clone(),
            work_setup_remarks: career.work_setup_remarks.clone(),
            employment_type: career.employment_type.clone(),
            country: career.country.clone(),
            province: career.province.clone(),
            city: career.location.clone(),
            salary_negotiable: career.salary_negotiable,
            minimum_salary: career.minimum_salary,
            maximum_salary: career.maximum_salary,
            currency: career.currency.clone(),
            screening_setting: career.screening_setting,
            require_video: career.require_video,
            questions: career.questions.clone(),
            team_members: career.team_members.clone(),
            cv_secret_prompt: career.cv_secret_prompt.clone(),
            pre_screening_questions: career.pre_screening_questions.clone(),
            ai_secret_prompt: career.ai_secret_prompt.clone(),
        }
    }

    /// Shallow-merge a patch; fields the patch leaves as `None` are untouched.
    pub fn apply(&mut self, patch: FormPatch) {
        macro_rules! merge {
            ($($field:ident),+ $(,)?) => {
                $(
                    if let Some(value) = patch.$field {
                        self.$field = value;
                    }
                )+
            };
        }

        merge!(
            job_title,
            description,
            work_setup,
            work_setup_remarks,
            employment_type,
            country,
            province,
            city,
            salary_negotiable,
            minimum_salary,
            maximum_salary,
            currency,
            screening_setting,
            require_video,
            questions,
            team_members,
            cv_secret_prompt,
            pre_screening_questions,
            ai_secret_prompt,
        );
    }

    pub fn total_interview_questions(&self) -> usize {
        self.questions.iter().map(|c| c.questions.len()).sum()
    }
}

/// A partial update to [`CareerFormData`].
///
/// Salary fields are doubly optional so a patch can clear them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormPatch {
    pub job_title: Option<String>,
    pub description: Option<String>,
    pub work_setup: Option<String>,
    pub work_setup_remarks: Option<String>,
    pub employment_type: Option<String>,
    pub country: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub salary_negotiable: Option<bool>,
    pub minimum_salary: Option<Option<f64>>,
    pub maximum_salary: Option<Option<f64>>,
    pub currency: Option<String>,
    pub screening_setting: Option<ScreeningSetting>,
    pub require_video: Option<bool>,
    pub questions: Option<Vec<InterviewCategory>>,
    pub team_members: Option<Vec<TeamMember>>,
    pub cv_secret_prompt: Option<String>,
    pub pre_screening_questions: Option<Vec<PreScreeningQuestion>>,
    pub ai_secret_prompt: Option<String>,
}
