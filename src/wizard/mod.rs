//! Recruiter-facing job posting wizard.
//!
//! Holds the form state for the four wizard steps, gates navigation on step
//! validity, mirrors unfinished work to a [`DraftStore`] and submits the
//! finished career through a [`CareerApi`].

pub mod draft;
pub mod form;
pub mod locations;
pub mod steps;
pub mod submit;

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use crate::career::{Career, CareerStatus};
use draft::{Draft, DraftStore};
use form::{CareerFormData, FormPatch};
use locations::{City, LocationCatalog};
use steps::{StepIssue, WizardConfig};
use submit::{CareerApi, Session};

pub use draft::{FileDraftStore, MemoryDraftStore};
pub use submit::HttpCareerApi;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { career_id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardError {
    /// The current step does not validate
    StepIncomplete(u8),
    AlreadySubmitting,
    SalaryRange,
    /// The request was sent and failed; carries the message for the recruiter
    Failed(String),
}

impl fmt::Display for WizardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardError::StepIncomplete(step) => {
                write!(f, "Please complete step {} before saving", step)
            }
            WizardError::AlreadySubmitting => write!(f, "A save is already in progress"),
            WizardError::SalaryRange => {
                write!(f, "Minimum salary cannot be greater than maximum salary")
            }
            WizardError::Failed(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for WizardError {}

/// A successful save: what to tell the recruiter and where to go next
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub message: String,
    pub redirect: String,
}

/// The view to show for the current step
#[derive(Debug)]
pub enum StepView<'a> {
    CareerDetails {
        form: &'a CareerFormData,
        cities: Vec<&'a City>,
    },
    CvReview {
        form: &'a CareerFormData,
        issues: Vec<StepIssue>,
    },
    AiInterview {
        form: &'a CareerFormData,
        total_questions: usize,
        minimum: usize,
    },
    Review {
        form: &'a CareerFormData,
        mode: &'a FormMode,
    },
}

/// Clears the submitting flag when the save finishes, however it finishes
struct SubmitGuard(Arc<AtomicBool>);

impl SubmitGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitGuard(flag.clone()))
    }
}

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct CareerWizard {
    form: CareerFormData,
    current_step: u8,
    mode: FormMode,
    has_saved_draft: bool,
    submitting: Arc<AtomicBool>,
    session: Session,
    drafts: Arc<dyn DraftStore>,
    catalog: LocationCatalog,
    config: WizardConfig,
}

impl CareerWizard {
    /// Start a new posting, resuming the stored draft if there is one
    pub fn create(session: Session, drafts: Arc<dyn DraftStore>, config: WizardConfig) -> Self {
        let catalog = LocationCatalog::philippines();
        let mut form = CareerFormData::default();
        if let Some((province, city)) = catalog.default_location() {
            form.province = province.to_string();
            form.city = city.to_string();
        }

        let mut wizard = Self {
            form,
            current_step: steps::CAREER_DETAILS,
            mode: FormMode::Create,
            has_saved_draft: false,
            submitting: Arc::new(AtomicBool::new(false)),
            session,
            drafts,
            catalog,
            config,
        };
        wizard.restore_draft();
        wizard
    }

    /// Edit an existing career; drafts are not used in this mode
    pub fn edit(
        career: &Career,
        session: Session,
        drafts: Arc<dyn DraftStore>,
        config: WizardConfig,
    ) -> Self {
        Self {
            form: CareerFormData::from_career(career),
            current_step: steps::CAREER_DETAILS,
            mode: FormMode::Edit {
                career_id: career.id.clone(),
            },
            has_saved_draft: false,
            submitting: Arc::new(AtomicBool::new(false)),
            session,
            drafts,
            catalog: LocationCatalog::philippines(),
            config,
        }
    }

    pub fn with_catalog(mut self, catalog: LocationCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn form(&self) -> &CareerFormData {
        &self.form
    }

    pub fn current_step(&self) -> u8 {
        self.current_step
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn has_saved_draft(&self) -> bool {
        self.has_saved_draft
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn catalog(&self) -> &LocationCatalog {
        &self.catalog
    }

    fn restore_draft(&mut self) {
        let raw = match self.drafts.load(&self.config.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(e) => {
                warn!("Failed to read career draft: {}", e);
                return;
            }
        };
        self.has_saved_draft = true;

        match serde_json::from_str::<Draft>(&raw) {
            Ok(draft) => {
                self.form = draft.form_data;
                self.current_step = draft.step.clamp(steps::CAREER_DETAILS, self.config.last_step());
                info!("Restored career draft at step {}", self.current_step);
            }
            Err(e) => warn!("Failed to load career draft: {}", e),
        }
    }

    /// Mirror the form under the step being left; call before changing steps.
    fn persist_draft(&self) {
        if self.mode != FormMode::Create {
            return;
        }
        let draft = Draft {
            form_data: self.form.clone(),
            step: self.current_step,
        };
        let result = serde_json::to_string(&draft)
            .map_err(std::io::Error::from)
            .and_then(|raw| self.drafts.save(&self.config.storage_key, &raw));
        if let Err(e) = result {
            warn!("Failed to save career draft: {}", e);
        }
    }

    /// Merge a partial update into the form.
    ///
    /// A province change drops a city that does not belong to the new province.
    pub fn update_form_data(&mut self, patch: FormPatch) {
        let province_changed = patch.province.is_some();
        self.form.apply(patch);

        if province_changed && !self.catalog.contains(&self.form.province, &self.form.city) {
            self.form.city = self
                .catalog
                .cities_in(&self.form.province)
                .first()
                .map(|c| c.name.clone())
                .unwrap_or_default();
        }
    }

    pub fn is_step_valid(&self, step: u8) -> bool {
        steps::is_step_valid(&self.form, step, self.config.min_interview_questions)
    }

    pub fn step_issues(&self, step: u8) -> Vec<StepIssue> {
        steps::step_issues(&self.form, step, self.config.min_interview_questions)
    }

    /// Advance one step if the current one validates
    pub fn handle_next(&mut self) -> bool {
        if self.current_step >= self.config.last_step() || !self.is_step_valid(self.current_step) {
            return false;
        }
        self.persist_draft();
        self.current_step += 1;
        true
    }

    pub fn handle_back(&mut self) -> bool {
        if self.current_step <= steps::CAREER_DETAILS {
            return false;
        }
        self.persist_draft();
        self.current_step -= 1;
        true
    }

    /// Jump to `step`. Going back is always allowed; going forward needs a valid current step.
    pub fn go_to_step(&mut self, step: u8) -> bool {
        if !(steps::CAREER_DETAILS..=self.config.last_step()).contains(&step) {
            return false;
        }
        if step > self.current_step && !self.is_step_valid(self.current_step) {
            return false;
        }
        self.persist_draft();
        self.current_step = step;
        true
    }

    /// Discard the stored draft and start over; nothing happens unless `confirmed`
    pub fn clear_draft(&mut self, confirmed: bool) -> bool {
        if !confirmed {
            return false;
        }
        if let Err(e) = self.drafts.remove(&self.config.storage_key) {
            warn!("Failed to remove career draft: {}", e);
        }

        self.form = CareerFormData::default();
        if let Some((province, city)) = self.catalog.default_location() {
            self.form.province = province.to_string();
            self.form.city = city.to_string();
        }
        self.current_step = steps::CAREER_DETAILS;
        self.has_saved_draft = false;
        true
    }

    pub fn render_step(&self) -> Option<StepView<'_>> {
        let form = &self.form;
        match self.current_step {
            steps::CAREER_DETAILS => Some(StepView::CareerDetails {
                form,
                cities: self.catalog.cities_in(&form.province),
            }),
            steps::CV_REVIEW => Some(StepView::CvReview {
                form,
                issues: self.step_issues(steps::CV_REVIEW),
            }),
            steps::AI_INTERVIEW => Some(StepView::AiInterview {
                form,
                total_questions: form.total_interview_questions(),
                minimum: self.config.min_interview_questions,
            }),
            steps::REVIEW => Some(StepView::Review {
                form,
                mode: &self.mode,
            }),
            _ => None,
        }
    }

    pub async fn save_as_unpublished(
        &mut self,
        api: &dyn CareerApi,
    ) -> Result<SubmitOutcome, WizardError> {
        self.submit(api, CareerStatus::Inactive).await
    }

    pub async fn save_and_publish(
        &mut self,
        api: &dyn CareerApi,
    ) -> Result<SubmitOutcome, WizardError> {
        self.submit(api, CareerStatus::Active).await
    }

    async fn submit(
        &mut self,
        api: &dyn CareerApi,
        status: CareerStatus,
    ) -> Result<SubmitOutcome, WizardError> {
        let _guard = SubmitGuard::acquire(&self.submitting).ok_or(WizardError::AlreadySubmitting)?;

        if !self.is_step_valid(self.current_step) {
            return Err(WizardError::StepIncomplete(self.current_step));
        }
        if submit::has_inverted_salary_range(&self.form) {
            return Err(WizardError::SalaryRange);
        }

        match self.mode.clone() {
            FormMode::Create => {
                let payload = submit::build_payload(&self.form, status, &self.session, None);
                match api.create_career(&payload).await {
                    Ok(_) => {
                        if let Err(e) = self.drafts.remove(&self.config.storage_key) {
                            warn!("Failed to remove career draft: {}", e);
                        }
                        self.has_saved_draft = false;
                        info!("Career created with status {}", status.as_str());

                        let message = if status == CareerStatus::Active {
                            "Career added and published"
                        } else {
                            "Career added"
                        };
                        Ok(SubmitOutcome {
                            message: message.to_string(),
                            redirect: self.config.careers_path.clone(),
                        })
                    }
                    Err(failure) => {
                        warn!("Career create failed: {}", failure);
                        Err(WizardError::Failed(
                            submit::create_failure_message(&failure).to_string(),
                        ))
                    }
                }
            }
            FormMode::Edit { career_id } => {
                let payload =
                    submit::build_payload(&self.form, status, &self.session, Some(&career_id));
                match api.update_career(&payload).await {
                    Ok(_) => {
                        info!("Career {} updated with status {}", career_id, status.as_str());
                        Ok(SubmitOutcome {
                            message: "Career updated".to_string(),
                            redirect: self.config.manage_path(&career_id),
                        })
                    }
                    Err(failure) => {
                        warn!("Career {} update failed: {}", career_id, failure);
                        Err(WizardError::Failed("Failed to update career".to_string()))
                    }
                }
            }
        }
    }
}
