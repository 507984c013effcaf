use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::estimator::{MockEstimator, NutritionEstimator};
use crate::meals::{DailyTotals, MealEntry, MealLog, MealPatch};
use crate::profile::UserProfile;

/// Consumed-versus-target pair for one dashboard gauge.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GaugeProgress {
    pub consumed: u32,
    pub target: i32,
}

impl GaugeProgress {
    /// Fill percentage for the progress bar, capped at 100.
    pub fn percent(&self) -> f64 {
        if self.target <= 0 {
            return 100.0;
        }
        (f64::from(self.consumed) / f64::from(self.target) * 100.0).min(100.0)
    }
}

/// Dashboard snapshot: today's totals against the profile targets.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DailyProgress {
    pub calories: GaugeProgress,
    pub protein: GaugeProgress,
    pub carbs: GaugeProgress,
    pub fat: GaugeProgress,
}

/// Process-wide session state: the profile, the authoritative meal list, and
/// the injected recognition backend. Owned by the top-level application and
/// handed to each flow by reference; all mutation goes through these methods,
/// one user-triggered operation at a time.
pub struct SessionState {
    pub config: Arc<AppConfig>,
    pub estimator: Arc<dyn NutritionEstimator>,
    profile: Option<UserProfile>,
    meals: MealLog,
}

impl SessionState {
    /// Environment-configured session with the mock recognition backend.
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let estimator = Arc::new(MockEstimator::new(&config.estimator)) as Arc<dyn NutritionEstimator>;
        Ok(Self::from_parts(config, estimator))
    }

    pub fn from_parts(config: Arc<AppConfig>, estimator: Arc<dyn NutritionEstimator>) -> Self {
        Self {
            config,
            estimator,
            profile: None,
            meals: MealLog::new(),
        }
    }

    /// Replaces the profile wholesale, as re-running onboarding does.
    pub fn complete_onboarding(&mut self, profile: UserProfile) {
        info!(
            daily_calories = profile.daily_calories,
            daily_protein = profile.daily_protein,
            daily_carbs = profile.daily_carbs,
            daily_fat = profile.daily_fat,
            "onboarding complete, daily targets set"
        );
        self.profile = Some(profile);
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn log_meal(&mut self, entry: MealEntry) {
        self.meals.add(entry);
    }

    pub fn update_meal(&mut self, id: Uuid, patch: MealPatch) -> bool {
        self.meals.update(id, patch)
    }

    pub fn delete_meal(&mut self, id: Uuid) -> bool {
        self.meals.remove(id)
    }

    pub fn meals(&self) -> &MealLog {
        &self.meals
    }

    pub fn totals(&self) -> DailyTotals {
        self.meals.totals()
    }

    /// Totals against targets, for display. None until onboarding completes.
    pub fn progress(&self) -> Option<DailyProgress> {
        let profile = self.profile.as_ref()?;
        let totals = self.meals.totals();
        Some(DailyProgress {
            calories: GaugeProgress {
                consumed: totals.calories,
                target: profile.daily_calories,
            },
            protein: GaugeProgress {
                consumed: totals.protein,
                target: profile.daily_protein,
            },
            carbs: GaugeProgress {
                consumed: totals.carbs,
                target: profile.daily_carbs,
            },
            fat: GaugeProgress {
                consumed: totals.fat,
                target: profile.daily_fat,
            },
        })
    }

    /// Full reset: drops the profile and every logged meal.
    pub fn new_session(&mut self) {
        info!("session reset");
        self.profile = None;
        self.meals.clear();
    }

    /// Deterministic state for tests: default config, zero-delay estimator
    /// returning a fixed estimate.
    pub fn fake() -> Self {
        use crate::estimator::MealEstimate;
        use async_trait::async_trait;

        struct FixedEstimator;

        #[async_trait]
        impl NutritionEstimator for FixedEstimator {
            async fn estimate(&self, _image_url: &str) -> anyhow::Result<MealEstimate> {
                Ok(MealEstimate {
                    food_items: "Greek yogurt with berries and granola".into(),
                    calories: 420,
                    protein: 32,
                    carbs: 45,
                    fat: 14,
                })
            }
        }

        Self::from_parts(Arc::new(AppConfig::default()), Arc::new(FixedEstimator))
    }
}
