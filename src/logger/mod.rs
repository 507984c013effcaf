use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::errors::FlowError;
use crate::estimator::{MealEstimate, NutritionEstimator};
use crate::meals::{MealEntry, MealPatch};

/// Stages of the photo-logging flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Waiting for an upload.
    Idle,
    /// An upload is pending estimation.
    Analyzing,
    /// An estimate is on screen, ready to confirm or edit.
    Result,
    /// Draft fields are being edited by hand.
    Edit,
    /// The last estimation attempt failed; retry or reset.
    Failed,
}

impl Stage {
    fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Analyzing => "analyzing",
            Self::Result => "result",
            Self::Edit => "edit",
            Self::Failed => "failed",
        }
    }
}

/// Identifies one upload attempt. A ticket from a superseded upload no longer
/// matches the logger's current generation, so its late result is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisTicket(u64);

/// Editable draft of the meal being logged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealDraft {
    pub food_items: String,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

impl From<MealEstimate> for MealDraft {
    fn from(e: MealEstimate) -> Self {
        Self {
            food_items: e.food_items,
            calories: e.calories,
            protein: e.protein,
            carbs: e.carbs,
            fat: e.fat,
        }
    }
}

/// What a completed flow hands to the meal log.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// A freshly logged meal, to be prepended.
    Created(MealEntry),
    /// An edit of an existing meal, to be merged in place.
    Updated { id: Uuid, patch: MealPatch },
}

/// Explicit state machine for the meal-logging flow.
///
/// Exactly one analysis can be current at a time: re-uploading while a
/// previous estimate is pending bumps the generation, and the stale ticket's
/// result is ignored when it eventually arrives.
#[derive(Debug)]
pub struct MealLogger {
    stage: Stage,
    generation: u64,
    preview: Option<String>,
    draft: MealDraft,
    // id + original timestamp when this logger was opened on an existing meal
    editing: Option<(Uuid, String)>,
}

impl Default for MealLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl MealLogger {
    /// Fresh flow for logging a new meal. Starts Idle.
    pub fn new() -> Self {
        Self {
            stage: Stage::Idle,
            generation: 0,
            preview: None,
            draft: MealDraft::default(),
            editing: None,
        }
    }

    /// Flow opened on an existing meal. Starts directly in Edit with the
    /// entry's fields as the draft; saving yields an in-place update.
    pub fn for_existing(entry: &MealEntry) -> Self {
        Self {
            stage: Stage::Edit,
            generation: 0,
            preview: entry.image_url.clone(),
            draft: MealDraft {
                food_items: entry.food_items.clone(),
                calories: entry.calories,
                protein: entry.protein,
                carbs: entry.carbs,
                fat: entry.fat,
            },
            editing: Some((entry.id, entry.timestamp.clone())),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn draft(&self) -> &MealDraft {
        &self.draft
    }

    /// Applies manual form edits. Only meaningful while editing.
    pub fn set_draft(&mut self, draft: MealDraft) -> Result<(), FlowError> {
        if self.stage != Stage::Edit {
            return Err(FlowError::InvalidTransition {
                action: "edit draft",
                stage: self.stage.name(),
            });
        }
        self.draft = draft;
        Ok(())
    }

    /// Accepts a photo and moves to Analyzing. Calling this again while a
    /// previous analysis is pending supersedes it.
    pub fn begin_upload(&mut self, image_url: impl Into<String>) -> Result<AnalysisTicket, FlowError> {
        match self.stage {
            Stage::Idle | Stage::Analyzing | Stage::Failed => {
                self.generation += 1;
                self.stage = Stage::Analyzing;
                self.preview = Some(image_url.into());
                debug!(generation = self.generation, "photo upload accepted");
                Ok(AnalysisTicket(self.generation))
            }
            stage => Err(FlowError::InvalidTransition {
                action: "upload photo",
                stage: stage.name(),
            }),
        }
    }

    /// Delivers a finished estimate. Returns false (and changes nothing) if
    /// the ticket was superseded by a newer upload or the flow moved on.
    pub fn complete_analysis(&mut self, ticket: AnalysisTicket, estimate: MealEstimate) -> bool {
        if self.stage != Stage::Analyzing || ticket.0 != self.generation {
            warn!(
                ticket = ticket.0,
                generation = self.generation,
                stage = self.stage.name(),
                "stale analysis result ignored"
            );
            return false;
        }
        self.draft = estimate.into();
        self.stage = Stage::Result;
        true
    }

    /// Reports a failed estimation attempt. Stale tickets are ignored the
    /// same way as in [`Self::complete_analysis`]. The preview is kept so the
    /// user can retry without re-picking the photo.
    pub fn fail_analysis(&mut self, ticket: AnalysisTicket, reason: &str) -> bool {
        if self.stage != Stage::Analyzing || ticket.0 != self.generation {
            warn!(ticket = ticket.0, generation = self.generation, "stale analysis failure ignored");
            return false;
        }
        warn!(reason, "estimation failed");
        self.stage = Stage::Failed;
        true
    }

    /// Runs one whole upload-and-analyze round against the given estimator.
    /// Holding `&mut self` across the await means no competing upload can
    /// start through this path; raced flows use the ticket API directly.
    #[instrument(skip(self, estimator))]
    pub async fn upload_and_analyze(
        &mut self,
        estimator: &dyn NutritionEstimator,
        image_url: &str,
    ) -> Result<Stage, FlowError> {
        let ticket = self.begin_upload(image_url)?;
        match estimator.estimate(image_url).await {
            Ok(estimate) => {
                self.complete_analysis(ticket, estimate);
            }
            Err(e) => {
                self.fail_analysis(ticket, &e.to_string());
                return Err(FlowError::EstimationFailed {
                    reason: e.to_string(),
                });
            }
        }
        Ok(self.stage)
    }

    /// Result → Edit ("Edit Details").
    pub fn edit(&mut self) -> Result<(), FlowError> {
        if self.stage != Stage::Result {
            return Err(FlowError::InvalidTransition {
                action: "edit",
                stage: self.stage.name(),
            });
        }
        self.stage = Stage::Edit;
        Ok(())
    }

    /// Leaves Edit without saving. In the photo flow this returns to Result
    /// (or Idle when nothing was uploaded); the draft keeps any typed values.
    /// When opened on an existing meal the caller simply discards the logger.
    pub fn cancel_edit(&mut self) -> Result<Stage, FlowError> {
        if self.stage != Stage::Edit {
            return Err(FlowError::InvalidTransition {
                action: "cancel edit",
                stage: self.stage.name(),
            });
        }
        self.stage = if self.preview.is_some() {
            Stage::Result
        } else {
            Stage::Idle
        };
        Ok(self.stage)
    }

    /// Confirms the draft, producing what the meal log should apply. Valid
    /// from Result or Edit; the flow then resets to Idle.
    pub fn save(&mut self) -> Result<SaveOutcome, FlowError> {
        if !matches!(self.stage, Stage::Result | Stage::Edit) {
            return Err(FlowError::InvalidTransition {
                action: "save",
                stage: self.stage.name(),
            });
        }
        let draft = std::mem::take(&mut self.draft);
        let preview = self.preview.take();
        let outcome = match self.editing.take() {
            Some((id, _timestamp)) => {
                info!(meal_id = %id, "meal edit saved");
                SaveOutcome::Updated {
                    id,
                    patch: MealPatch {
                        food_items: Some(draft.food_items),
                        image_url: preview,
                        calories: Some(draft.calories),
                        protein: Some(draft.protein),
                        carbs: Some(draft.carbs),
                        fat: Some(draft.fat),
                    },
                }
            }
            None => {
                let entry = MealEntry::new(
                    draft.food_items,
                    draft.calories,
                    draft.protein,
                    draft.carbs,
                    draft.fat,
                    preview,
                );
                info!(meal_id = %entry.id, calories = entry.calories, "meal saved");
                SaveOutcome::Created(entry)
            }
        };
        self.stage = Stage::Idle;
        Ok(outcome)
    }

    /// "Start over": drops the preview, the draft, and any pending analysis.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.stage = Stage::Idle;
        self.preview = None;
        self.draft = MealDraft::default();
        debug!("logging flow reset");
    }
}
