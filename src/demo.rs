//! First-run seed data: ten sample entries persisted when no history exists
//! yet.

use chrono::NaiveDate;

use crate::workout::{Exercise, WorkoutEntry};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("Demo dates are valid")
}

fn strength(name: &str, sets: u32, reps: u32, weight: f64) -> Exercise {
    Exercise::Strength {
        name: name.to_string(),
        sets,
        reps,
        weight,
    }
}

fn cardio(name: &str, duration: &str, intensity: &str) -> Exercise {
    Exercise::Cardio {
        name: name.to_string(),
        duration: duration.to_string(),
        intensity: intensity.to_string(),
    }
}

fn other(name: &str, description: &str) -> Exercise {
    Exercise::Other {
        name: name.to_string(),
        description: description.to_string(),
    }
}

fn entry(
    id: &str,
    date: NaiveDate,
    workout_type: &str,
    exercises: Vec<Exercise>,
    warmup_completed: bool,
    notes: &str,
) -> WorkoutEntry {
    WorkoutEntry {
        id: id.to_string(),
        date,
        workout_type: workout_type.to_string(),
        exercises,
        warmup_completed,
        notes: notes.to_string(),
        photo: None,
    }
}

/// The seeded history, newest first.
pub(crate) fn demo_entries() -> Vec<WorkoutEntry> {
    vec![
        entry(
            "1",
            date(2025, 9, 24),
            "Push (Chest, Shoulders, Triceps)",
            vec![
                strength("Bench Press", 4, 8, 185.0),
                strength("Shoulder Press", 3, 10, 135.0),
            ],
            true,
            "up 10lbs from last week. left shoulder still tight but better after bench",
        ),
        entry(
            "2",
            date(2025, 9, 22),
            "Cardio",
            vec![
                cardio("Running", "30 minutes", "Moderate"),
                other(
                    "Plank Hold",
                    "3 sets of 60 seconds, focused on core stability and breathing",
                ),
            ],
            true,
            "track laps. planks getting easier (barely)",
        ),
        entry(
            "3",
            date(2025, 9, 19),
            "Full Body",
            vec![
                strength("Squats", 4, 10, 205.0),
                cardio("Cycling", "20 minutes", "High"),
                other(
                    "Yoga Flow",
                    "15-minute flexibility and mobility routine focusing on hip openers and spinal twists",
                ),
            ],
            true,
            "good mix today. squats felt solid, bike was brutal after",
        ),
        entry(
            "4",
            date(2025, 9, 13),
            "Push (Chest, Shoulders, Triceps)",
            vec![
                strength("Overhead Press", 3, 6, 95.0),
                strength("Tricep Dips", 3, 12, 0.0),
            ],
            true,
            "shoulders still sore from monday. took it easier",
        ),
        entry(
            "5",
            date(2025, 9, 7),
            "Pull (Back, Biceps)",
            vec![
                strength("Pull-ups", 3, 8, 0.0),
                strength("Lat Pull-Downs", 3, 10, 140.0),
                cardio("Rowing Machine", "15 minutes", "Moderate"),
            ],
            true,
            "two med bands for pullups. did rolling hills on rower",
        ),
        entry(
            "6",
            date(2025, 9, 5),
            "Legs (Quads, Hamstrings, Glutes)",
            vec![
                strength("Romanian Deadlift", 3, 12, 135.0),
                strength("Bulgarian Split Squats", 3, 8, 40.0),
            ],
            true,
            "RDL form getting better (deeper). left side on split squats still weaker",
        ),
        entry(
            "7",
            date(2025, 9, 3),
            "Other",
            vec![
                cardio("Walking", "45 minutes", "Low"),
                other(
                    "Stretching Routine",
                    "Full body stretching session with emphasis on tight areas from previous workouts",
                ),
            ],
            false,
            "rest day walk. everything sore from yesterday",
        ),
        entry(
            "8",
            date(2025, 9, 2),
            "Cardio",
            vec![
                other("Burpees", "4 sets of 10 reps - full body functional movement"),
                cardio("Jump Rope", "10 minutes", "High"),
                strength("Push-ups", 3, 15, 0.0),
            ],
            true,
            "gym was packed, didn't want to wait for machines",
        ),
        entry(
            "9",
            date(2025, 9, 1),
            "Pull (Back, Biceps)",
            vec![
                strength("Chin-Ups", 3, 8, 0.0),
                strength("Lat Pull-Downs", 3, 12, 0.0),
            ],
            true,
            "gym was packed, didn't want to wait for machines",
        ),
        entry(
            "10",
            date(2025, 8, 29),
            "Cardio",
            vec![cardio("Cycle", "45 minutes", "Low")],
            true,
            "incline 3",
        ),
    ]
}
