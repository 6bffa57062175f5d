use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::ranges::BandConfig;
use crate::timeline::EngagementCurve;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementConfig {
    pub bands: BandConfig,
    pub curve: EngagementCurve,
}

impl EngagementConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        Self::load_with(path, |key| env::var(key).ok())
    }

    pub fn load_with<F>(path: Option<PathBuf>, lookup: F) -> Result<(Self, Option<PathBuf>), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_path = path.or_else(|| default_config_path(&lookup));
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                let parsed: EngagementConfig =
                    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                        path: path.clone(),
                        source,
                    })?;
                tracing::info!(path = %path.display(), "loaded engagement config");
                parsed
            }
            _ => {
                tracing::debug!("no engagement config file, using defaults");
                EngagementConfig::default()
            }
        };

        config.apply_overrides_from(lookup);
        config.validate()?;
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let payload = toml::to_string_pretty(self)?;
        std::fs::write(path, payload).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bands.validate()?;
        self.curve.validate()?;
        Ok(())
    }

    // Unparseable values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let float = |key: &str| lookup(key).and_then(|value| value.trim().parse::<f64>().ok());
        let count = |key: &str| lookup(key).and_then(|value| value.trim().parse::<u64>().ok());

        if let Some(value) = float("ENGAGEMENT_RETWEET_SCALE") {
            self.bands.scales.retweets = value;
        }
        if let Some(value) = float("ENGAGEMENT_REPLY_SCALE") {
            self.bands.scales.replies = value;
        }
        if let Some(value) = count("ENGAGEMENT_LIKES_FLOOR") {
            self.bands.floors.likes = value;
        }
        if let Some(value) = count("ENGAGEMENT_RETWEETS_FLOOR") {
            self.bands.floors.retweets = value;
        }
        if let Some(value) = count("ENGAGEMENT_REPLIES_FLOOR") {
            self.bands.floors.replies = value;
        }
    }
}

fn default_config_path<F>(lookup: &F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    lookup("ENGAGEMENT_CONFIG_PATH")
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/engagement.toml")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn overrides_replace_scales_and_floors() {
        let vars: HashMap<&str, &str> = [
            ("ENGAGEMENT_RETWEET_SCALE", "0.6"),
            ("ENGAGEMENT_REPLIES_FLOOR", "4"),
            ("ENGAGEMENT_LIKES_FLOOR", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = EngagementConfig::default();
        config.apply_overrides_from(|key| vars.get(key).map(|value| value.to_string()));

        assert!((config.bands.scales.retweets - 0.6).abs() < 1e-12);
        assert_eq!(config.bands.floors.replies, 4);
        assert_eq!(config.bands.floors.likes, 8);
    }

    #[test]
    fn config_path_comes_from_lookup() {
        let path = default_config_path(&|key: &str| {
            (key == "ENGAGEMENT_CONFIG_PATH").then(|| "/etc/engagement.toml".to_string())
        });
        assert_eq!(path, Some(PathBuf::from("/etc/engagement.toml")));
        assert_eq!(
            default_config_path(&|_: &str| Some("  ".to_string())),
            Some(PathBuf::from("config/engagement.toml"))
        );
    }

    #[test]
    fn defaults_are_valid() {
        assert!(EngagementConfig::default().validate().is_ok());
    }
}
