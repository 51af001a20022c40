use std::fmt;

use super::form::CareerFormData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepMeta {
    pub id: u8,
    pub name: &'static str,
}

pub const CAREER_DETAILS: u8 = 1;
pub const CV_REVIEW: u8 = 2;
pub const AI_INTERVIEW: u8 = 3;
pub const REVIEW: u8 = 4;

/// Runtime knobs of the wizard
#[derive(Debug, Clone)]
pub struct WizardConfig {
    pub steps: Vec<StepMeta>,
    pub storage_key: String,
    pub min_interview_questions: usize,
    /// Where to land after a successful create; edits land on `{careers_path}/manage/{id}`
    pub careers_path: String,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            steps: vec![
                StepMeta { id: CAREER_DETAILS, name: "Career Details & Team Access" },
                StepMeta { id: CV_REVIEW, name: "CV Review & Pre-screening" },
                StepMeta { id: AI_INTERVIEW, name: "AI Interview Setup" },
                StepMeta { id: REVIEW, name: "Review Career" },
            ],
            storage_key: "career_form_draft".to_string(),
            min_interview_questions: 5,
            careers_path: "/recruiter-dashboard/careers".to_string(),
        }
    }
}

impl WizardConfig {
    pub fn last_step(&self) -> u8 {
        self.steps.last().map(|s| s.id).unwrap_or(CAREER_DETAILS)
    }

    pub fn manage_path(&self, career_id: &str) -> String {
        format!("{}/manage/{}", self.careers_path, career_id)
    }
}

/// Why a step refuses to let the user move on
#[derive(Debug, Clone, PartialEq)]
pub enum StepIssue {
    MissingField(&'static str),
    NoPreScreeningQuestions,
    BlankPreScreeningQuestion(usize),
    DropdownWithoutOptions(usize),
    TooFewInterviewQuestions { have: usize, need: usize },
    UnknownStep(u8),
}

impl fmt::Display for StepIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepIssue::MissingField(field) => write!(f, "{} is required", field),
            StepIssue::NoPreScreeningQuestions => {
                write!(f, "Add at least one pre-screening question")
            }
            StepIssue::BlankPreScreeningQuestion(index) => {
                write!(f, "Pre-screening question {} needs text", index + 1)
            }
            StepIssue::DropdownWithoutOptions(index) => {
                write!(f, "Pre-screening question {} needs at least one option", index + 1)
            }
            StepIssue::TooFewInterviewQuestions { have, need } => write!(
                f,
                "Add at least {} interview questions ({} so far)",
                need, have
            ),
            StepIssue::UnknownStep(step) => write!(f, "Unknown step {}", step),
        }
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Everything that keeps `step` from validating, in field order
pub fn step_issues(form: &CareerFormData, step: u8, min_interview_questions: usize) -> Vec<StepIssue> {
    let mut issues = Vec::new();
    match step {
        CAREER_DETAILS => {
            let text_fields = [
                ("Job title", &form.job_title),
                ("Employment type", &form.employment_type),
                ("Work setup", &form.work_setup),
                ("Province", &form.province),
                ("City", &form.city),
                ("Description", &form.description),
            ];
            for (name, value) in text_fields {
                if blank(value) {
                    issues.push(StepIssue::MissingField(name));
                }
            }
            if form.minimum_salary.is_none() {
                issues.push(StepIssue::MissingField("Minimum salary"));
            }
            if form.maximum_salary.is_none() {
                issues.push(StepIssue::MissingField("Maximum salary"));
            }
        }
        CV_REVIEW => {
            if form.pre_screening_questions.is_empty() {
                issues.push(StepIssue::NoPreScreeningQuestions);
            }
            for (index, question) in form.pre_screening_questions.iter().enumerate() {
                if blank(&question.question) {
                    issues.push(StepIssue::BlankPreScreeningQuestion(index));
                } else if !question.is_complete() {
                    issues.push(StepIssue::DropdownWithoutOptions(index));
                }
            }
        }
        AI_INTERVIEW => {
            let have = form.total_interview_questions();
            if have < min_interview_questions {
                issues.push(StepIssue::TooFewInterviewQuestions {
                    have,
                    need: min_interview_questions,
                });
            }
        }
        REVIEW => {}
        other => issues.push(StepIssue::UnknownStep(other)),
    }
    issues
}

pub fn is_step_valid(form: &CareerFormData, step: u8, min_interview_questions: usize) -> bool {
    step_issues(form, step, min_interview_questions).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::career::{InterviewQuestion, PreScreeningKind, PreScreeningQuestion};

    fn details() -> CareerFormData {
        CareerFormData {
            job_title: "Backend Engineer".to_string(),
            description: "<p>Build services</p>".to_string(),
            work_setup: "Hybrid".to_string(),
            province: "Metro Manila".to_string(),
            city: "Makati".to_string(),
            minimum_salary: Some(50_000.0),
            maximum_salary: Some(80_000.0),
            ..Default::default()
        }
    }

    fn question(kind: PreScreeningKind, options: &[&str]) -> PreScreeningQuestion {
        PreScreeningQuestion {
            id: "q1".to_string(),
            question: "Notice period?".to_string(),
            kind,
            options: options.iter().map(|o| o.to_string()).collect(),
            range_min: None,
            range_max: None,
        }
    }

    fn with_interview_questions(count: usize) -> CareerFormData {
        let mut form = CareerFormData::default();
        form.questions[1].questions = (0..count)
            .map(|i| InterviewQuestion {
                id: format!("iq{}", i),
                question: format!("Question {}", i),
            })
            .collect();
        form
    }

    #[test]
    fn career_details_need_title() {
        let mut form = details();
        assert!(is_step_valid(&form, CAREER_DETAILS, 5));

        form.job_title.clear();
        assert!(!is_step_valid(&form, CAREER_DETAILS, 5));
        assert_eq!(
            step_issues(&form, CAREER_DETAILS, 5),
            vec![StepIssue::MissingField("Job title")]
        );
    }

    #[test]
    fn career_details_need_both_salaries() {
        let mut form = details();
        form.maximum_salary = None;
        assert!(!is_step_valid(&form, CAREER_DETAILS, 5));

        form.maximum_salary = Some(0.0);
        assert!(is_step_valid(&form, CAREER_DETAILS, 5));
    }

    #[test]
    fn cv_review_needs_a_question() {
        let form = CareerFormData::default();
        assert_eq!(
            step_issues(&form, CV_REVIEW, 5),
            vec![StepIssue::NoPreScreeningQuestions]
        );
    }

    #[test]
    fn dropdown_with_blank_option_blocks_cv_review() {
        let mut form = CareerFormData::default();
        form.pre_screening_questions = vec![question(PreScreeningKind::Dropdown, &[""])];
        assert!(!is_step_valid(&form, CV_REVIEW, 5));

        form.pre_screening_questions[0].options = vec!["Immediately".to_string()];
        assert!(is_step_valid(&form, CV_REVIEW, 5));
    }

    #[test]
    fn blank_question_text_blocks_cv_review() {
        let mut form = CareerFormData::default();
        let mut blank = question(PreScreeningKind::Text, &[]);
        blank.question = "   ".to_string();
        form.pre_screening_questions = vec![blank];
        assert_eq!(
            step_issues(&form, CV_REVIEW, 5),
            vec![StepIssue::BlankPreScreeningQuestion(0)]
        );
    }

    #[test]
    fn interview_setup_needs_five_questions() {
        assert!(!is_step_valid(&with_interview_questions(4), AI_INTERVIEW, 5));
        assert!(is_step_valid(&with_interview_questions(5), AI_INTERVIEW, 5));
        assert!(is_step_valid(&with_interview_questions(2), AI_INTERVIEW, 2));
    }

    #[test]
    fn review_is_always_valid_and_unknown_steps_never_are() {
        let form = CareerFormData::default();
        assert!(is_step_valid(&form, REVIEW, 5));
        assert!(!is_step_valid(&form, 0, 5));
        assert!(!is_step_valid(&form, 5, 5));
    }

    #[test]
    fn default_config() {
        let config = WizardConfig::default();
        assert_eq!(config.last_step(), REVIEW);
        assert_eq!(config.storage_key, "career_form_draft");
        assert_eq!(config.manage_path("c-1"), "/recruiter-dashboard/careers/manage/c-1");
    }
}
