use chrono::{NaiveDate, NaiveDateTime};

use crate::{
    ExerciseDefinition, ExerciseLogEntry, Name, Registry, Reps, SetEntry, UserProfile, Weight,
    WorkoutRecord,
};

pub fn definition(id: u64, name: &str, pattern: &str, aliases: &[&str]) -> ExerciseDefinition {
    ExerciseDefinition::new(
        id.into(),
        name,
        pattern,
        aliases.iter().map(ToString::to_string).collect(),
    )
    .unwrap()
}

pub fn set(reps: u32, weight: f32) -> SetEntry {
    SetEntry {
        reps: Reps::new(reps).unwrap(),
        weight: Weight::new(weight).unwrap(),
    }
}

pub static DEFINITIONS: std::sync::LazyLock<Vec<ExerciseDefinition>> =
    std::sync::LazyLock::new(|| {
        vec![
            definition(
                1,
                "Overhead Press",
                "(ohp|overhead|shoulder press)",
                &["Military Press", "DB Press"],
            ),
            definition(2, "Assisted Pullup", "assisted pull[- ]?ups?", &["Assisted Chinup"]),
            definition(3, "Bench Press", "(bench|bp)$", &["Flat Bench"]),
            definition(4, "Machine Row", "(machine |seated )?rows?", &["Cable Row"]),
            definition(5, "Lat Pulldown", "lat pull ?downs?", &["Pulldown", "Seated Row"]),
            definition(6, "Seated Dumbbell Press", "(seated )?(db|dumbbell) press", &[]),
            definition(7, "Row Erg", "(erg|rowing erg)", &["Concept2"]),
        ]
    });

pub static REGISTRY: std::sync::LazyLock<Registry> =
    std::sync::LazyLock::new(|| Registry::new(DEFINITIONS.clone()).unwrap());

pub static TIMESTAMP: std::sync::LazyLock<NaiveDateTime> = std::sync::LazyLock::new(|| {
    NaiveDate::from_ymd_opt(2026, 10, 15)
        .unwrap()
        .and_hms_opt(18, 30, 0)
        .unwrap()
});

pub static WORKOUT: std::sync::LazyLock<WorkoutRecord> =
    std::sync::LazyLock::new(|| WorkoutRecord {
        name: "Workout October 15, 2026".to_string(),
        timestamp: *TIMESTAMP,
        exercises: vec![
            ExerciseLogEntry {
                exercise_id: 1.into(),
                exercise_name: Name::new("Overhead Press").unwrap(),
                sets: vec![set(8, 60.1), set(8, 60.1)],
            },
            ExerciseLogEntry {
                exercise_id: 2.into(),
                exercise_name: Name::new("Assisted Pullup").unwrap(),
                sets: vec![set(8, 60.0)],
            },
        ],
    });

pub static PROFILE: std::sync::LazyLock<UserProfile> =
    std::sync::LazyLock::new(|| UserProfile {
        username: Name::new("raphael").unwrap(),
        workouts: vec![WORKOUT.clone()],
    });
