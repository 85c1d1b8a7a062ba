use std::{fs, io, path::Path};

use gymlog_domain as domain;
use log::debug;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ExerciseID {
    Number(u64),
    Text(String),
}

impl From<&domain::ExerciseID> for ExerciseID {
    fn from(value: &domain::ExerciseID) -> Self {
        match value {
            domain::ExerciseID::Number(id) => Self::Number(*id),
            domain::ExerciseID::Text(id) => Self::Text(id.clone()),
        }
    }
}

impl From<ExerciseID> for domain::ExerciseID {
    fn from(value: ExerciseID) -> Self {
        match value {
            ExerciseID::Number(id) => Self::Number(id),
            ExerciseID::Text(id) => Self::Text(id),
        }
    }
}

#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
struct ExerciseDefinition {
    id: ExerciseID,
    canonical_name: String,
    nickname_regex: String,
    nicknames: Vec<String>,
}

impl TryFrom<ExerciseDefinition> for domain::ExerciseDefinition {
    type Error = domain::RegistryLoadError;

    fn try_from(value: ExerciseDefinition) -> Result<Self, Self::Error> {
        domain::ExerciseDefinition::new(
            value.id.into(),
            &value.canonical_name,
            &value.nickname_regex,
            value.nicknames,
        )
    }
}

/// Parses a JSON array of exercise definitions, keeping their order.
pub fn parse_definitions(
    json: &str,
) -> Result<Vec<domain::ExerciseDefinition>, domain::RegistryLoadError> {
    serde_json::from_str::<Vec<ExerciseDefinition>>(json)
        .map_err(|err| domain::RegistryLoadError::Malformed(err.to_string()))?
        .into_iter()
        .map(domain::ExerciseDefinition::try_from)
        .collect()
}

pub fn read_definitions(
    path: &Path,
) -> Result<Vec<domain::ExerciseDefinition>, domain::RegistryLoadError> {
    let json = fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => domain::RegistryLoadError::Missing(path.display().to_string()),
        _ => domain::RegistryLoadError::Other(Box::new(err)),
    })?;
    debug!("reading exercise registry from {}", path.display());
    parse_definitions(&json)
}
