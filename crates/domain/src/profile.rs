use crate::{Name, ReadError, WorkoutRecord, WriteError};

pub trait ProfileRepository {
    /// Fails with [`ReadError::NotFound`] if no profile is stored for the user.
    fn read_profile(&self, username: &Name) -> Result<UserProfile, ReadError>;
    fn write_profile(&self, profile: &UserProfile) -> Result<(), WriteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub username: Name,
    pub workouts: Vec<WorkoutRecord>,
}

impl UserProfile {
    #[must_use]
    pub fn new(username: Name) -> Self {
        Self {
            username,
            workouts: vec![],
        }
    }

    pub fn append(&mut self, workout: WorkoutRecord) {
        self.workouts.push(workout);
    }

    #[must_use]
    pub fn last_workout(&self) -> Option<&WorkoutRecord> {
        self.workouts.last()
    }
}
