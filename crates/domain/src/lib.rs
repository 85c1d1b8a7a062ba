#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod matcher;
mod name;
mod profile;
mod registry;
mod service;
pub mod set;
mod workout;

pub use error::{ReadError, StorageError, WriteError};
pub use matcher::{MatchKind, MatchRule, Matcher, UnresolvedExerciseError};
pub use name::{Name, NameError, normalize, title_case};
pub use profile::{ProfileRepository, UserProfile};
pub use registry::{
    ExerciseDefinition, ExerciseID, NicknamePattern, Registry, RegistryLoadError,
    RegistryRepository, SharedRegistry,
};
pub use service::{LogWorkoutError, Service};
pub use set::{Reps, RepsError, SetEntry, SetParseError, SetParseErrorKind, Weight, WeightError};
pub use workout::{
    ExerciseLogEntry, ResolveError, WorkoutNaming, WorkoutParseError, WorkoutRecord,
    WorkoutResolver, split_segment, split_segments,
};
