#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use gymlog_domain as domain;
use log::debug;

pub mod profile;
pub mod registry;

/// File based storage: the exercise registry is a JSON document and every user has a
/// JSON profile file in the data directory.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    registry_path: PathBuf,
    data_dir: PathBuf,
}

impl JsonStorage {
    #[must_use]
    pub fn new(registry_path: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            registry_path: registry_path.into(),
            data_dir: data_dir.into(),
        }
    }

    #[must_use]
    pub fn registry_path(&self) -> &Path {
        &self.registry_path
    }

    /// Usernames are only accepted if they consist of ASCII alphanumerics, `-` and `_`.
    pub fn profile_path(&self, username: &domain::Name) -> Result<PathBuf, domain::StorageError> {
        let name = username.as_ref();
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(domain::StorageError::InvalidUsername(name.to_string()));
        }
        Ok(self
            .data_dir
            .join(format!("workouts_{}.json", name.to_lowercase())))
    }
}

impl domain::RegistryRepository for JsonStorage {
    fn read_exercise_definitions(
        &self,
    ) -> Result<Vec<domain::ExerciseDefinition>, domain::RegistryLoadError> {
        registry::read_definitions(&self.registry_path)
    }
}

impl domain::ProfileRepository for JsonStorage {
    fn read_profile(
        &self,
        username: &domain::Name,
    ) -> Result<domain::UserProfile, domain::ReadError> {
        let path = self.profile_path(username)?;
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(domain::ReadError::NotFound);
            }
            Err(err) => return Err(domain::StorageError::from(err).into()),
        };
        debug!("read profile from {}", path.display());

        let profile = serde_json::from_str::<profile::UserProfile>(&json)
            .map_err(|err| domain::StorageError::Other(Box::new(err)))?;
        domain::UserProfile::try_from(profile)
            .map_err(|err| domain::StorageError::Other(Box::new(err)).into())
    }

    /// Replaces the whole profile file. The new content is written to a temporary file
    /// first and then moved into place.
    fn write_profile(&self, profile: &domain::UserProfile) -> Result<(), domain::WriteError> {
        let path = self.profile_path(&profile.username)?;
        let json = serde_json::to_string_pretty(&profile::UserProfile::from(profile))
            .map_err(|err| domain::StorageError::Other(Box::new(err)))?;

        fs::create_dir_all(&self.data_dir).map_err(domain::StorageError::from)?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(domain::StorageError::from)?;
        fs::rename(&tmp_path, &path).map_err(domain::StorageError::from)?;
        debug!("wrote profile to {}", path.display());

        Ok(())
    }
}
