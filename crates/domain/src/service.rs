use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, error, info};

use crate::{
    Name, ProfileRepository, ReadError, Registry, RegistryLoadError, RegistryRepository,
    ResolveError, SharedRegistry, UserProfile, WorkoutNaming, WorkoutRecord, WorkoutResolver,
    WriteError,
};

pub struct Service<R> {
    repository: R,
    registry: SharedRegistry,
    naming: WorkoutNaming,
    profile_lock: Mutex<()>,
}

macro_rules! log_on_error {
    ($result: expr, $expected: pat, $action: literal, $entity: literal) => {{
        let result = $result;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $expected => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
    ($result: expr, $action: literal, $entity: literal) => {{
        let result = $result;
        if let Err(ref err) = result {
            error!("failed to {} {}: {err}", $action, $entity);
        }
        result
    }};
}

impl<R> Service<R>
where
    R: RegistryRepository + ProfileRepository,
{
    pub fn new(repository: R, naming: WorkoutNaming) -> Result<Self, RegistryLoadError> {
        let registry = log_on_error!(
            Registry::load(&repository),
            "load",
            "exercise registry"
        )?;
        Ok(Self {
            repository,
            registry: SharedRegistry::new(registry),
            naming,
            profile_lock: Mutex::new(()),
        })
    }

    #[must_use]
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.snapshot()
    }

    /// The previous registry stays in use if reloading fails.
    pub fn reload_registry(&self) -> Result<Arc<Registry>, RegistryLoadError> {
        let registry = log_on_error!(
            self.registry.reload(&self.repository),
            "reload",
            "exercise registry"
        )?;
        info!("reloaded {} exercise definitions", registry.len());
        Ok(registry)
    }

    /// Resolves the workout text and appends the workout to the user's profile.
    ///
    /// A user without a stored profile starts with an empty one. Nothing is written
    /// if the text cannot be resolved. Concurrent calls are serialized from reading
    /// the profile until it is written back.
    pub fn log_workout(
        &self,
        username: &Name,
        workout_text: &str,
    ) -> Result<WorkoutRecord, LogWorkoutError> {
        log_on_error!(
            self.resolve_and_save(username, workout_text),
            LogWorkoutError::Resolve(_),
            "log",
            "workout"
        )
    }

    /// Fails with [`ReadError::NotFound`] if the user has no stored profile.
    pub fn last_workout(&self, username: &Name) -> Result<Option<WorkoutRecord>, ReadError> {
        log_on_error!(
            self.repository
                .read_profile(username)
                .map(|profile| profile.last_workout().cloned()),
            ReadError::NotFound,
            "get",
            "last workout"
        )
    }

    fn resolve_and_save(
        &self,
        username: &Name,
        workout_text: &str,
    ) -> Result<WorkoutRecord, LogWorkoutError> {
        let _guard = self
            .profile_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut profile = match self.repository.read_profile(username) {
            Ok(profile) => profile,
            Err(ReadError::NotFound) => {
                debug!("no profile stored for {username}, starting a new one");
                UserProfile::new(username.clone())
            }
            Err(err) => return Err(err.into()),
        };

        let registry = self.registry.snapshot();
        let workout =
            WorkoutResolver::new(&registry, &self.naming).resolve(workout_text, &profile)?;

        profile.append(workout.clone());
        self.repository.write_profile(&profile)?;

        info!(
            "saved workout \"{}\" with {} exercise(s) and {} set(s) for {username}",
            workout.name,
            workout.exercises.len(),
            workout.num_sets()
        );

        Ok(workout)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum LogWorkoutError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Write(#[from] WriteError),
}
