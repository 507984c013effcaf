mod targets;

pub use targets::DailyTargets;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    Sedentary,
    #[serde(rename = "Lightly Active")]
    LightlyActive,
    Active,
    #[serde(rename = "Very Active")]
    VeryActive,
}

impl ActivityLevel {
    pub fn factor(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::LightlyActive => 1.375,
            Self::Active => 1.55,
            Self::VeryActive => 1.725,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Goal {
    #[serde(rename = "Lose Weight")]
    LoseWeight,
    #[serde(rename = "Maintain Weight")]
    MaintainWeight,
    #[serde(rename = "Build Muscle")]
    BuildMuscle,
}

impl Goal {
    /// Daily kcal offset applied on top of TDEE.
    pub fn calorie_adjustment(self) -> f64 {
        match self {
            Self::LoseWeight => -500.0,
            Self::MaintainWeight => 0.0,
            Self::BuildMuscle => 300.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeightUnit {
    Cm,
    In,
}

impl HeightUnit {
    /// Canonicalizes a raw height reading to centimeters.
    pub fn to_cm(self, value: f64) -> f64 {
        match self {
            Self::Cm => value,
            Self::In => value * 2.54,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightUnit {
    Kg,
    Lbs,
}

impl WeightUnit {
    /// Canonicalizes a raw weight reading to kilograms.
    pub fn to_kg(self, value: f64) -> f64 {
        match self {
            Self::Kg => value,
            Self::Lbs => value * 0.453592,
        }
    }
}

/// Complete biometric input tuple for the target calculator. The onboarding
/// UI is responsible for validation; by the time this struct exists every
/// field is well-formed and metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiometricProfile {
    pub age: u32,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
}

/// Profile persisted for the session once onboarding completes. Targets are
/// computed once here and replaced wholesale if onboarding is redone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub age: u32,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    pub daily_calories: i32,
    pub daily_protein: i32,
    pub daily_carbs: i32,
    pub daily_fat: i32,
}

impl UserProfile {
    pub fn from_biometrics(input: BiometricProfile) -> Self {
        let targets = DailyTargets::calculate(&input);
        Self {
            age: input.age,
            gender: input.gender,
            height_cm: input.height_cm,
            weight_kg: input.weight_kg,
            activity_level: input.activity_level,
            goal: input.goal,
            daily_calories: targets.calories,
            daily_protein: targets.protein_g,
            daily_carbs: targets.carbs_g,
            daily_fat: targets.fat_g,
        }
    }

    pub fn targets(&self) -> DailyTargets {
        DailyTargets {
            calories: self.daily_calories,
            protein_g: self.daily_protein,
            carbs_g: self.daily_carbs,
            fat_g: self.daily_fat,
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn height_inches_to_cm() {
        assert!((HeightUnit::In.to_cm(70.0) - 177.8).abs() < 1e-9);
        assert_eq!(HeightUnit::Cm.to_cm(180.0), 180.0);
    }

    #[test]
    fn weight_pounds_to_kg() {
        let kg = WeightUnit::Lbs.to_kg(154.0);
        assert!((kg - 69.853168).abs() < 1e-6);
        assert_eq!(WeightUnit::Kg.to_kg(80.0), 80.0);
    }

    #[test]
    fn activity_factors_match_plan() {
        assert_eq!(ActivityLevel::Sedentary.factor(), 1.2);
        assert_eq!(ActivityLevel::LightlyActive.factor(), 1.375);
        assert_eq!(ActivityLevel::Active.factor(), 1.55);
        assert_eq!(ActivityLevel::VeryActive.factor(), 1.725);
    }

    #[test]
    fn labels_serialize_as_ui_strings() {
        let json = serde_json::to_string(&ActivityLevel::LightlyActive).expect("serialize");
        assert_eq!(json, "\"Lightly Active\"");
        let goal: Goal = serde_json::from_str("\"Lose Weight\"").expect("deserialize");
        assert_eq!(goal, Goal::LoseWeight);
    }
}
