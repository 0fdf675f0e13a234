use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::{
    advice::{AdviceParser, Vocabulary, VocabularyConfig},
    engine::AdviceEngine,
    hazard::{CautionThresholds, HazardClassifier},
    route::{RetryPolicy, RouteProviderId},
};

/// Routing service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Provider id, "osrm" or "straight".
    pub provider: String,
    pub base_url: String,
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub timeout_secs: u64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            provider: RouteProviderId::Osrm.to_string(),
            base_url: "https://router.project-osrm.org".to_string(),
            max_attempts: 3,
            base_delay_ms: 1000,
            timeout_secs: 10,
        }
    }
}

impl RoutingConfig {
    pub fn provider_id(&self) -> Result<RouteProviderId> {
        RouteProviderId::try_from(self.provider.as_str())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            base_delay: Duration::from_millis(self.base_delay_ms),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [thresholds]
/// wind_ms = 15.0
///
/// [vocabulary]
/// wind_labels = ["winds", "wind", "breeze"]
///
/// [routing]
/// provider = "osrm"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub thresholds: CautionThresholds,
    pub vocabulary: VocabularyConfig,
    pub routing: RoutingConfig,
}

impl Config {
    /// Compile the configured phrasing vocabulary.
    pub fn vocabulary(&self) -> Result<Vocabulary> {
        Vocabulary::compile(&self.vocabulary).context("Invalid [vocabulary] section in config")
    }

    /// Engine wired with the configured vocabulary and thresholds.
    pub fn engine(&self) -> Result<AdviceEngine> {
        Ok(AdviceEngine::new(
            AdviceParser::new(self.vocabulary()?),
            HazardClassifier::new(self.thresholds),
        ))
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "roadwx", "roadwx")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Store the route provider as string.
    pub fn set_route_provider(&mut self, id: RouteProviderId) {
        self.routing.provider = id.as_str().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = Config::from_toml("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.thresholds.gust_ms, 20.0);
        assert_eq!(cfg.routing.provider_id().unwrap(), RouteProviderId::Osrm);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = Config::from_toml(
            r#"
            [thresholds]
            wind_ms = 12.0

            [vocabulary]
            wind_labels = ["breeze"]
            "#,
        )
        .unwrap();

        assert_eq!(cfg.thresholds.wind_ms, 12.0);
        assert_eq!(cfg.thresholds.temp_c, -10.0);
        assert_eq!(cfg.vocabulary.wind_labels, vec!["breeze".to_string()]);
        assert_eq!(cfg.vocabulary.calm_words, vec!["calm".to_string()]);
    }

    #[test]
    fn configured_vocabulary_drives_the_engine() {
        let cfg = Config::from_toml(
            r#"
            [vocabulary]
            wind_labels = ["breeze"]
            "#,
        )
        .unwrap();

        let parsed = cfg.engine().unwrap().parser().parse("X: breeze 7 m/s, damp");
        assert_eq!(parsed.wind.as_deref(), Some("7 m/s"));
        assert_eq!(parsed.road_conditions, "damp");
    }

    #[test]
    fn empty_vocabulary_list_is_reported() {
        let mut cfg = Config::default();
        cfg.vocabulary.gust_labels.clear();

        let err = cfg.engine().unwrap_err();
        assert!(format!("{err:#}").contains("gust_labels"));
    }

    #[test]
    fn retry_policy_from_routing_section() {
        let mut cfg = Config::default();
        cfg.routing.max_attempts = 0;
        cfg.routing.base_delay_ms = 250;

        let policy = cfg.routing.retry_policy();
        assert_eq!(policy.max_attempts, 1);
        assert_eq!(policy.delay_before(2), Duration::from_millis(250));
    }

    #[test]
    fn set_route_provider_overrides_default() {
        let mut cfg = Config::default();
        cfg.set_route_provider(RouteProviderId::Straight);
        assert_eq!(cfg.routing.provider_id().unwrap(), RouteProviderId::Straight);
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let mut cfg = Config::default();
        cfg.thresholds.visibility_m = 500.0;

        let text = toml::to_string_pretty(&cfg).unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), cfg);
    }
}
