use std::env;
use std::time::Duration;

use crate::football_api::DEFAULT_API_BASE;
use crate::league_metrics::GoalsPerGameModel;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_base: String,
    pub refresh: Duration,
    pub fixture_limit: usize,
    pub goals_model: GoalsPerGameModel,
}

impl Config {
    /// Reads the process environment. Call after the dotenv files are loaded.
    pub fn from_env() -> Self {
        let api_key = opt_env("FOOTBALL_API_KEY");
        let api_base = opt_env("FOOTBALL_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let refresh_secs = env::var("DASHBOARD_REFRESH_SECS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(1800)
            .max(60);
        let fixture_limit = env::var("FIXTURE_LIMIT")
            .ok()
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(5)
            .clamp(1, 20);
        let goals_model = opt_env("LEAGUE_AVERAGE_MODEL")
            .and_then(|val| GoalsPerGameModel::from_env_value(&val))
            .unwrap_or_default();

        Self {
            api_key,
            api_base,
            refresh: Duration::from_secs(refresh_secs),
            fixture_limit,
            goals_model,
        }
    }
}

fn opt_env(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|val| {
        let trimmed = val.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
