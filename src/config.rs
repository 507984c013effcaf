use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct EstimatorConfig {
    pub delay_ms: u64,
    pub min_calories: u32,
    pub max_calories: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    pub estimator: EstimatorConfig,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            delay_ms: 2200,
            min_calories: 350,
            max_calories: 750,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = EstimatorConfig::default();
        let estimator = EstimatorConfig {
            delay_ms: std::env::var("ESTIMATOR_DELAY_MS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(defaults.delay_ms),
            min_calories: std::env::var("ESTIMATOR_MIN_CALORIES")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(defaults.min_calories),
            max_calories: std::env::var("ESTIMATOR_MAX_CALORIES")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(defaults.max_calories),
        };
        anyhow::ensure!(
            estimator.min_calories <= estimator.max_calories,
            "ESTIMATOR_MIN_CALORIES must not exceed ESTIMATOR_MAX_CALORIES"
        );
        Ok(Self { estimator })
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn defaults_match_mock_service_contract() {
        let cfg = EstimatorConfig::default();
        assert_eq!(cfg.delay_ms, 2200);
        assert_eq!(cfg.min_calories, 350);
        assert_eq!(cfg.max_calories, 750);
    }
}
