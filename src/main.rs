use calorietrack::logger::{MealLogger, SaveOutcome};
use calorietrack::profile::{ActivityLevel, BiometricProfile, Gender, Goal, HeightUnit, UserProfile, WeightUnit};
use calorietrack::state::SessionState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "calorietrack=debug".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let mut state = SessionState::init()?;

    // Onboarding: raw form values arrive unit-tagged and are canonicalized to
    // metric before the calculator runs.
    let input = BiometricProfile {
        age: 30,
        gender: Gender::Male,
        height_cm: HeightUnit::In.to_cm(70.0),
        weight_kg: WeightUnit::Lbs.to_kg(176.0),
        activity_level: ActivityLevel::Active,
        goal: Goal::LoseWeight,
    };
    state.complete_onboarding(UserProfile::from_biometrics(input));

    // Photo-logging flow against the configured estimator.
    let estimator = std::sync::Arc::clone(&state.estimator);
    let mut logger = MealLogger::new();
    logger
        .upload_and_analyze(estimator.as_ref(), "file:///photos/lunch.jpg")
        .await?;
    match logger.save()? {
        SaveOutcome::Created(entry) => state.log_meal(entry),
        SaveOutcome::Updated { id, patch } => {
            state.update_meal(id, patch);
        }
    }

    let totals = state.totals();
    tracing::info!(
        calories = totals.calories,
        protein = totals.protein,
        carbs = totals.carbs,
        fat = totals.fat,
        "daily totals"
    );
    if let Some(progress) = state.progress() {
        tracing::info!(calorie_percent = progress.calories.percent(), "dashboard progress");
    }

    Ok(())
}
