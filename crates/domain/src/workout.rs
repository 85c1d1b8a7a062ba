use chrono::{Local, NaiveDateTime};
use log::debug;

use crate::{
    ExerciseID, Matcher, Name, Registry, SetEntry, SetParseError, UnresolvedExerciseError,
    UserProfile, name::title_case, set,
};

pub const SEGMENT_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseLogEntry {
    pub exercise_id: ExerciseID,
    pub exercise_name: Name,
    pub sets: Vec<SetEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutRecord {
    pub name: String,
    pub timestamp: NaiveDateTime,
    pub exercises: Vec<ExerciseLogEntry>,
}

impl WorkoutRecord {
    #[must_use]
    pub fn num_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }
}

/// Template for workout names. `{date}` is replaced by the date of the workout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutNaming {
    template: String,
}

impl WorkoutNaming {
    pub const DEFAULT_TEMPLATE: &str = "Workout {date}";

    #[must_use]
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    #[must_use]
    pub fn name(&self, timestamp: NaiveDateTime) -> String {
        self.template
            .replace("{date}", &timestamp.format("%B %d, %Y").to_string())
    }
}

impl Default for WorkoutNaming {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TEMPLATE)
    }
}

/// Turns free-form workout text into a [`WorkoutRecord`].
pub struct WorkoutResolver<'a> {
    matcher: Matcher<'a>,
    naming: &'a WorkoutNaming,
}

impl<'a> WorkoutResolver<'a> {
    #[must_use]
    pub fn new(registry: &'a Registry, naming: &'a WorkoutNaming) -> Self {
        Self {
            matcher: Matcher::new(registry),
            naming,
        }
    }

    pub fn resolve(
        &self,
        full_text: &str,
        profile: &UserProfile,
    ) -> Result<WorkoutRecord, ResolveError> {
        self.resolve_at(full_text, profile, Local::now().naive_local())
    }

    /// The first failing segment aborts the resolution.
    pub fn resolve_at(
        &self,
        full_text: &str,
        profile: &UserProfile,
        timestamp: NaiveDateTime,
    ) -> Result<WorkoutRecord, ResolveError> {
        debug!("resolving workout of {}: {full_text}", profile.username);

        let segments = split_segments(full_text);
        if segments.is_empty() {
            return Err(WorkoutParseError::NoExercises.into());
        }

        let exercises = segments
            .iter()
            .map(|segment| self.resolve_segment(segment))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(WorkoutRecord {
            name: self.naming.name(timestamp),
            timestamp,
            exercises,
        })
    }

    pub fn resolve_segment(&self, segment: &str) -> Result<ExerciseLogEntry, ResolveError> {
        let (exercise_name, sets_text) = split_segment(segment)?;
        let definition = self.matcher.resolve(&exercise_name)?;
        let sets = set::parse(sets_text)?;

        Ok(ExerciseLogEntry {
            exercise_id: definition.id.clone(),
            exercise_name: definition.canonical_name.clone(),
            sets,
        })
    }
}

/// Splits a workout into segments of one exercise each. Line breaks are removed
/// beforehand and blank segments are skipped.
#[must_use]
pub fn split_segments(full_text: &str) -> Vec<String> {
    full_text
        .replace(['\r', '\n'], "")
        .split(SEGMENT_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Splits a segment at its first digit into exercise name and sets text.
///
/// Colons are removed from the name and it is title-cased.
pub fn split_segment(segment: &str) -> Result<(String, &str), WorkoutParseError> {
    let Some(idx) = segment.find(|c: char| c.is_ascii_digit()) else {
        return Err(WorkoutParseError::MissingSets {
            segment: segment.to_string(),
        });
    };

    let (name, sets_text) = segment.split_at(idx);
    let name = title_case(&name.replace(':', "")).trim().to_string();

    if name.is_empty() {
        return Err(WorkoutParseError::MissingExerciseName {
            segment: segment.to_string(),
        });
    }

    Ok((name, sets_text.trim()))
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkoutParseError {
    #[error("no exercises given")]
    NoExercises,
    #[error("could not parse \"{segment}\": sets are missing")]
    MissingSets { segment: String },
    #[error("could not parse \"{segment}\": exercise name is missing")]
    MissingExerciseName { segment: String },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error(transparent)]
    Workout(#[from] WorkoutParseError),
    #[error(transparent)]
    UnresolvedExercise(#[from] UnresolvedExerciseError),
    #[error(transparent)]
    Set(#[from] SetParseError),
}
