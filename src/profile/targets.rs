use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{BiometricProfile, Gender};

/// Basal Metabolic Rate via the Mifflin-St Jeor equation, kcal/day.
///
/// `Other` shares the female offset (-161), matching the onboarding formula
/// this calculator reproduces.
pub fn bmr(profile: &BiometricProfile) -> f64 {
    let base =
        10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * f64::from(profile.age);
    match profile.gender {
        Gender::Male => base + 5.0,
        Gender::Female | Gender::Other => base - 161.0,
    }
}

/// Total Daily Energy Expenditure: BMR scaled by the activity factor.
pub fn tdee(profile: &BiometricProfile) -> f64 {
    bmr(profile) * profile.activity_level.factor()
}

/// Daily calorie and macro targets derived from a complete biometric profile.
///
/// Calories are signed and never clamped: a pathological profile can produce a
/// negative target, and guarding against that belongs to the caller. Macros
/// come from a fixed 30/40/30 split of calories, each rounded independently,
/// so `protein*4 + carbs*4 + fat*9` may drift from `calories` by a few kcal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTargets {
    pub calories: i32,
    pub protein_g: i32,
    pub carbs_g: i32,
    pub fat_g: i32,
}

impl DailyTargets {
    pub fn calculate(profile: &BiometricProfile) -> Self {
        let calories = tdee(profile) + profile.goal.calorie_adjustment();
        let protein = calories * 0.3 / 4.0;
        let carbs = calories * 0.4 / 4.0;
        let fat = calories * 0.3 / 9.0;

        let targets = Self {
            calories: calories.round() as i32,
            protein_g: protein.round() as i32,
            carbs_g: carbs.round() as i32,
            fat_g: fat.round() as i32,
        };
        debug!(
            calories = targets.calories,
            protein_g = targets.protein_g,
            carbs_g = targets.carbs_g,
            fat_g = targets.fat_g,
            "daily targets computed"
        );
        targets
    }
}
