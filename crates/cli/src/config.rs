use std::{fs, path::Path, path::PathBuf, str::FromStr};

use anyhow::Context;
use log::LevelFilter;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub registry_path: PathBuf,
    pub data_dir: PathBuf,
    pub username: String,
    pub workout_name: String,
    pub log_level: String,
}

impl Settings {
    /// Without a path the defaults are used.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("failed to parse configuration {}", path.display()))
    }

    pub fn level_filter(&self) -> anyhow::Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .with_context(|| format!("invalid log level \"{}\"", self.log_level))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            registry_path: PathBuf::from("registry/exercises.json"),
            data_dir: PathBuf::from("."),
            username: "raphael".to_string(),
            workout_name: "Workout {date}".to_string(),
            log_level: "info".to_string(),
        }
    }
}
