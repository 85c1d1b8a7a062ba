use chrono::NaiveDateTime;
use gymlog_domain as domain;

use crate::registry::ExerciseID;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub username: String,
    pub workouts: Vec<Workout>,
}

impl From<&domain::UserProfile> for UserProfile {
    fn from(value: &domain::UserProfile) -> Self {
        Self {
            username: value.username.to_string(),
            workouts: value.workouts.iter().map(Workout::from).collect(),
        }
    }
}

impl TryFrom<UserProfile> for domain::UserProfile {
    type Error = ConversionError;

    fn try_from(value: UserProfile) -> Result<Self, Self::Error> {
        Ok(Self {
            username: domain::Name::new(&value.username)?,
            workouts: value
                .workouts
                .into_iter()
                .map(domain::WorkoutRecord::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Workout {
    pub workout_name: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDateTime,
    pub exercises: Vec<Exercise>,
}

impl From<&domain::WorkoutRecord> for Workout {
    fn from(value: &domain::WorkoutRecord) -> Self {
        Self {
            workout_name: value.name.clone(),
            date: value.timestamp,
            exercises: value.exercises.iter().map(Exercise::from).collect(),
        }
    }
}

impl TryFrom<Workout> for domain::WorkoutRecord {
    type Error = ConversionError;

    fn try_from(value: Workout) -> Result<Self, Self::Error> {
        Ok(Self {
            name: value.workout_name,
            timestamp: value.date,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::ExerciseLogEntry::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

/// Format of dates in profiles written by earlier versions.
const LEGACY_DATE_FORMAT: &str = "%a %H:%M, %B %d, %Y";

/// Accepts ISO 8601 date-times as well as dates like `Thu 18:30, October 15, 2026`.
fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let date = <String as serde::Deserialize>::deserialize(deserializer)?;
    date.parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(&date, LEGACY_DATE_FORMAT))
        .map_err(|err| serde::de::Error::custom(format!("invalid date \"{date}\": {err}")))
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    pub ex_id: ExerciseID,
    pub name: String,
    pub sets: Vec<Set>,
}

impl From<&domain::ExerciseLogEntry> for Exercise {
    fn from(value: &domain::ExerciseLogEntry) -> Self {
        Self {
            ex_id: ExerciseID::from(&value.exercise_id),
            name: value.exercise_name.to_string(),
            sets: value.sets.iter().map(Set::from).collect(),
        }
    }
}

impl TryFrom<Exercise> for domain::ExerciseLogEntry {
    type Error = ConversionError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(Self {
            exercise_id: value.ex_id.into(),
            exercise_name: domain::Name::new(&value.name)?,
            sets: value
                .sets
                .into_iter()
                .map(domain::SetEntry::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Set {
    pub reps: u32,
    pub weight: f32,
}

impl From<&domain::SetEntry> for Set {
    fn from(value: &domain::SetEntry) -> Self {
        Self {
            reps: value.reps.into(),
            weight: value.weight.into(),
        }
    }
}

impl TryFrom<Set> for domain::SetEntry {
    type Error = ConversionError;

    fn try_from(value: Set) -> Result<Self, Self::Error> {
        Ok(Self {
            reps: domain::Reps::new(value.reps)?,
            weight: domain::Weight::new(value.weight)?,
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConversionError {
    #[error(transparent)]
    Name(#[from] domain::NameError),
    #[error(transparent)]
    Reps(#[from] domain::RepsError),
    #[error(transparent)]
    Weight(#[from] domain::WeightError),
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Timelike};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::tests::data::{PROFILE, PROFILE_JSON};

    use super::*;

    #[test]
    fn test_user_profile_serialize() {
        assert_eq!(
            serde_json::to_value(UserProfile::from(&*PROFILE)).unwrap(),
            serde_json::from_str::<serde_json::Value>(PROFILE_JSON).unwrap()
        );
    }

    #[test]
    fn test_user_profile_deserialize() {
        let profile: UserProfile = serde_json::from_str(PROFILE_JSON).unwrap();

        assert_eq!(domain::UserProfile::try_from(profile), Ok(PROFILE.clone()));
    }

    #[rstest]
    #[case("2026-10-15T18:30:00", 18, 30)]
    #[case("2026-10-15T18:30:00.250", 18, 30)]
    #[case("Thu 18:30, October 15, 2026", 18, 30)]
    #[case("Thu 07:05, October 15, 2026", 7, 5)]
    fn test_workout_deserialize_date(#[case] date: &str, #[case] hour: u32, #[case] min: u32) {
        let workout: Workout = serde_json::from_value(serde_json::json!({
            "workout_name": "Test Upper Day October 15, 2026",
            "date": date,
            "exercises": []
        }))
        .unwrap();

        assert_eq!(workout.date.date(), NaiveDate::from_ymd_opt(2026, 10, 15).unwrap());
        assert_eq!((workout.date.hour(), workout.date.minute()), (hour, min));
    }

    #[rstest]
    #[case("Fri 18:30, October 15, 2026")]
    #[case("October 15, 2026")]
    #[case("yesterday")]
    fn test_workout_deserialize_invalid_date(#[case] date: &str) {
        assert!(
            serde_json::from_value::<Workout>(serde_json::json!({
                "workout_name": "Workout",
                "date": date,
                "exercises": []
            }))
            .is_err()
        );
    }

    #[test]
    fn test_user_profile_deserialize_legacy_file() {
        let profile: UserProfile = serde_json::from_str(
            r#"{
                "username": "raphael",
                "workouts": [{
                    "workout_name": "Test Upper Day October 15, 2026",
                    "date": "Thu 18:30, October 15, 2026",
                    "exercises": [{
                        "ex_id": 4,
                        "name": "Machine Row",
                        "sets": [{"reps": 8, "weight": 56.0}, {"reps": 8, "weight": 56.0}]
                    }]
                }]
            }"#,
        )
        .unwrap();

        let profile = domain::UserProfile::try_from(profile).unwrap();
        assert_eq!(
            profile.workouts[0].timestamp,
            NaiveDate::from_ymd_opt(2026, 10, 15)
                .unwrap()
                .and_hms_opt(18, 30, 0)
                .unwrap()
        );
        assert_eq!(profile.workouts[0].num_sets(), 2);
    }

    #[test]
    fn test_user_profile_invalid_username() {
        let profile = UserProfile {
            username: " ".to_string(),
            workouts: vec![],
        };

        assert_eq!(
            domain::UserProfile::try_from(profile),
            Err(ConversionError::Name(domain::NameError::Empty))
        );
    }

    #[test]
    fn test_set_invalid() {
        assert_eq!(
            domain::SetEntry::try_from(Set {
                reps: 1000,
                weight: 10.0
            }),
            Err(ConversionError::Reps(domain::RepsError::OutOfRange))
        );
        assert_eq!(
            domain::SetEntry::try_from(Set {
                reps: 10,
                weight: -10.0
            }),
            Err(ConversionError::Weight(domain::WeightError::OutOfRange))
        );
    }
}
