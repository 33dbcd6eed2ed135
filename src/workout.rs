// src/workout.rs
use anyhow::{bail, Context, Result};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::demo;
use crate::observable::Observable;
use crate::settings::SettingsStore;
use crate::storage::{self, StorageBackend};

const ENTRIES_KEY: &str = "entries";
const WEEKLY_GOAL_KEY: &str = "weeklyGoal";
const USER_GOALS_KEY: &str = "userGoals";

/// Target number of workouts per week until the user picks their own.
pub const DEFAULT_WEEKLY_GOAL: u32 = 3;

/// One movement within an entry, variant-typed by activity kind.
///
/// The shape is advisory: every variant field defaults individually, so
/// stored exercises missing a field still load. Only the `type` tag is
/// closed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Exercise {
    Strength {
        #[serde(default)]
        name: String,
        #[serde(default)]
        sets: u32,
        #[serde(default)]
        reps: u32,
        /// 0 means bodyweight only.
        #[serde(default)]
        weight: f64,
    },
    Cardio {
        #[serde(default)]
        name: String,
        /// Free text, e.g. "30 minutes".
        #[serde(default)]
        duration: String,
        /// Conventionally Low, Moderate or High.
        #[serde(default)]
        intensity: String,
    },
    Other {
        #[serde(default)]
        name: String,
        #[serde(default)]
        description: String,
    },
}

impl Exercise {
    pub fn name(&self) -> &str {
        match self {
            Exercise::Strength { name, .. }
            | Exercise::Cardio { name, .. }
            | Exercise::Other { name, .. } => name,
        }
    }
}

/// One logged workout session. `id` and `date` are always present once an
/// entry exists; the rest of the shape is advisory and loads leniently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutEntry {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub workout_type: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub warmup_completed: bool,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub photo: Option<String>,
}

/// Fields for a new entry. `id` is always assigned by the store; a `None`
/// date falls back to the day the entry is created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewWorkoutEntry {
    pub date: Option<NaiveDate>,
    pub workout_type: String,
    pub exercises: Vec<Exercise>,
    pub warmup_completed: bool,
    pub notes: String,
    pub photo: Option<String>,
}

/// Shallow-merge patch for [`WorkoutStore::update_entry`]. `None` leaves a
/// field untouched; for `photo`, `Some(None)` clears it. Ids are not
/// patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryPatch {
    pub date: Option<NaiveDate>,
    pub workout_type: Option<String>,
    pub exercises: Option<Vec<Exercise>>,
    pub warmup_completed: Option<bool>,
    pub notes: Option<String>,
    pub photo: Option<Option<String>>,
}

impl WorkoutEntry {
    fn apply(&mut self, patch: EntryPatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(workout_type) = patch.workout_type {
            self.workout_type = workout_type;
        }
        if let Some(exercises) = patch.exercises {
            self.exercises = exercises;
        }
        if let Some(warmup_completed) = patch.warmup_completed {
            self.warmup_completed = warmup_completed;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(photo) = patch.photo {
            self.photo = photo;
        }
    }
}

/// Personal goal targets. A key with no target is `None`; a stored object is
/// taken as-is, so keys it omits load as `None` rather than the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserGoals {
    pub weight_goal: Option<f64>,
    pub monthly_distance_goal: Option<f64>,
    pub consistency_goal: Option<f64>,
    #[serde(rename = "strengthPRGoal")]
    pub strength_pr_goal: Option<f64>,
    pub cardio_time_goal: Option<f64>,
}

impl Default for UserGoals {
    fn default() -> Self {
        UserGoals {
            weight_goal: None,
            monthly_distance_goal: None,
            consistency_goal: Some(80.0),
            strength_pr_goal: None,
            cardio_time_goal: None,
        }
    }
}

/// Key-by-key patch for [`WorkoutStore::update_user_goals`]. The outer `None`
/// leaves a goal untouched, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserGoalsPatch {
    pub weight_goal: Option<Option<f64>>,
    pub monthly_distance_goal: Option<Option<f64>>,
    pub consistency_goal: Option<Option<f64>>,
    pub strength_pr_goal: Option<Option<f64>>,
    pub cardio_time_goal: Option<Option<f64>>,
}

/// The fixed user-goal keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum GoalKind {
    Weight,
    MonthlyDistance,
    Consistency,
    StrengthPr,
    CardioTime,
}

impl fmt::Display for GoalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalKind::Weight => write!(f, "weightGoal"),
            GoalKind::MonthlyDistance => write!(f, "monthlyDistanceGoal"),
            GoalKind::Consistency => write!(f, "consistencyGoal"),
            GoalKind::StrengthPr => write!(f, "strengthPRGoal"),
            GoalKind::CardioTime => write!(f, "cardioTimeGoal"),
        }
    }
}

/// Parses a goal key name (as stored, e.g. "weightGoal") into a [`GoalKind`].
///
/// # Errors
/// Returns an error if the name matches no known goal key.
pub fn parse_goal_kind(name: &str) -> Result<GoalKind> {
    let trimmed = name.trim();
    for kind in GoalKind::iter() {
        if kind.to_string().eq_ignore_ascii_case(trimmed) {
            return Ok(kind);
        }
    }
    bail!("Unknown goal key: '{trimmed}'");
}

/// Owns the workout entries, the weekly goal and the user goal targets.
///
/// The storage capability is injected once at construction; `None` turns
/// every persistence touchpoint into a no-op while the in-memory state keeps
/// working.
pub struct WorkoutStore {
    pub entries: Observable<Vec<WorkoutEntry>>,
    pub weekly_goal: Observable<u32>,
    pub user_goals: Observable<UserGoals>,
    storage: Option<Rc<dyn StorageBackend>>,
    last_issued_id: Cell<i64>,
}

impl WorkoutStore {
    pub fn new(storage: Option<Rc<dyn StorageBackend>>) -> Self {
        Self {
            entries: Observable::new(Vec::new()),
            weekly_goal: Observable::new(DEFAULT_WEEKLY_GOAL),
            user_goals: Observable::new(UserGoals::default()),
            storage,
            last_issued_id: Cell::new(0),
        }
    }

    /// Loads persisted state into the containers. Skips entirely when no
    /// storage medium was injected, leaving the in-memory defaults untouched.
    ///
    /// A first run (no stored entries) seeds the demo dataset and persists it
    /// immediately. Absent keys fall back to the current values; present but
    /// unparseable values are errors, not silent resets.
    ///
    /// # Errors
    /// Returns an error when a stored value fails to parse or the demo seed
    /// cannot be persisted.
    pub fn init(&self) -> Result<()> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };

        match storage.get(&storage::storage_key(ENTRIES_KEY)) {
            Some(raw) => {
                let stored: Vec<WorkoutEntry> = serde_json::from_str(&raw)
                    .context("Failed to parse stored workout entries")?;
                tracing::debug!(count = stored.len(), "loaded persisted workout entries");
                self.entries.set(stored);
            }
            None => {
                tracing::debug!("no stored entries, seeding demo data");
                self.entries.set(demo::demo_entries());
                self.save_entries()?;
            }
        }

        if let Some(raw) = storage.get(&storage::storage_key(WEEKLY_GOAL_KEY)) {
            let goal: u32 = raw
                .trim()
                .parse()
                .with_context(|| format!("Failed to parse stored weekly goal '{raw}'"))?;
            self.weekly_goal.set(goal);
        }

        if let Some(raw) = storage.get(&storage::storage_key(USER_GOALS_KEY)) {
            let goals: UserGoals =
                serde_json::from_str(&raw).context("Failed to parse stored user goals")?;
            self.user_goals.set(goals);
        }

        Ok(())
    }

    /// Adds a new entry at the front of the list (newest first) and persists
    /// the full list. Returns the assigned id.
    ///
    /// # Errors
    /// Returns an error if the updated list cannot be persisted. The
    /// in-memory list has already been updated at that point.
    pub fn add_entry(&self, new: NewWorkoutEntry) -> Result<String> {
        let entry = WorkoutEntry {
            id: self.next_entry_id(),
            date: new.date.unwrap_or_else(|| Utc::now().date_naive()),
            workout_type: new.workout_type,
            exercises: new.exercises,
            warmup_completed: new.warmup_completed,
            notes: new.notes,
            photo: new.photo,
        };
        let id = entry.id.clone();
        self.entries.update(|mut list| {
            list.insert(0, entry);
            list
        });
        self.save_entries()?;
        Ok(id)
    }

    /// Shallow-merges `patch` into the entry with `id`. An unknown id is a
    /// silent no-op; the list is persisted afterward either way.
    ///
    /// # Errors
    /// Returns an error if the list cannot be persisted.
    pub fn update_entry(&self, id: &str, patch: EntryPatch) -> Result<()> {
        self.entries.update(|mut list| {
            if let Some(entry) = list.iter_mut().find(|e| e.id == id) {
                entry.apply(patch);
            }
            list
        });
        self.save_entries()
    }

    /// Removes the entry with `id` if present, preserving the order of the
    /// rest. The list is persisted afterward either way.
    ///
    /// # Errors
    /// Returns an error if the list cannot be persisted.
    pub fn delete_entry(&self, id: &str) -> Result<()> {
        self.entries
            .update(|list| list.into_iter().filter(|e| e.id != id).collect());
        self.save_entries()
    }

    /// Groups the current entries by the Sunday on or before their date.
    /// Within a bucket, entries keep their relative list order. Pure read;
    /// nothing observable changes.
    pub fn entries_by_week(&self) -> BTreeMap<NaiveDate, Vec<WorkoutEntry>> {
        let mut weeks: BTreeMap<NaiveDate, Vec<WorkoutEntry>> = BTreeMap::new();
        for entry in self.entries.get() {
            weeks
                .entry(week_start_sunday(entry.date))
                .or_default()
                .push(entry);
        }
        weeks
    }

    /// Replaces the weekly workout target and persists it.
    ///
    /// # Errors
    /// Returns an error if the goal cannot be persisted.
    pub fn set_weekly_goal(&self, goal: u32) -> Result<()> {
        self.weekly_goal.set(goal);
        self.save_weekly_goal()
    }

    /// Merges `patch` key-by-key into the current goals and persists the
    /// result. Keys the patch does not mention keep their current targets.
    ///
    /// # Errors
    /// Returns an error if the goals cannot be persisted.
    pub fn update_user_goals(&self, patch: UserGoalsPatch) -> Result<()> {
        self.user_goals.update(|mut goals| {
            if let Some(value) = patch.weight_goal {
                goals.weight_goal = value;
            }
            if let Some(value) = patch.monthly_distance_goal {
                goals.monthly_distance_goal = value;
            }
            if let Some(value) = patch.consistency_goal {
                goals.consistency_goal = value;
            }
            if let Some(value) = patch.strength_pr_goal {
                goals.strength_pr_goal = value;
            }
            if let Some(value) = patch.cardio_time_goal {
                goals.cardio_time_goal = value;
            }
            goals
        });
        self.save_user_goals()
    }

    /// Sets a single goal target (`None` clears it) and persists.
    ///
    /// # Errors
    /// Returns an error if the goals cannot be persisted.
    pub fn set_user_goal(&self, kind: GoalKind, value: Option<f64>) -> Result<()> {
        self.user_goals.update(|mut goals| {
            match kind {
                GoalKind::Weight => goals.weight_goal = value,
                GoalKind::MonthlyDistance => goals.monthly_distance_goal = value,
                GoalKind::Consistency => goals.consistency_goal = value,
                GoalKind::StrengthPr => goals.strength_pr_goal = value,
                GoalKind::CardioTime => goals.cardio_time_goal = value,
            }
            goals
        });
        self.save_user_goals()
    }

    /// Wipes every persisted key (this store's three plus the settings
    /// store's two), restores all stores to their documented defaults and
    /// persists those defaults immediately. No-op when no storage medium was
    /// injected.
    ///
    /// # Errors
    /// Returns an error if a key cannot be removed or a default cannot be
    /// re-persisted.
    pub fn clear_all_data(&self, settings: &SettingsStore) -> Result<()> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };
        tracing::debug!("clearing all persisted data");

        for key in [ENTRIES_KEY, WEEKLY_GOAL_KEY, USER_GOALS_KEY] {
            storage
                .remove(&storage::storage_key(key))
                .with_context(|| format!("Failed to remove stored '{key}'"))?;
        }

        self.entries.set(demo::demo_entries());
        self.weekly_goal.set(DEFAULT_WEEKLY_GOAL);
        self.user_goals.set(UserGoals::default());
        self.save_entries()?;
        self.save_weekly_goal()?;
        self.save_user_goals()?;

        settings.reset_to_defaults()
    }

    // Millisecond-timestamp ids, bumped past the last issued id and past any
    // id already in the list, so they stay unique for the process lifetime.
    fn next_entry_id(&self) -> String {
        let entries = self.entries.get();
        let mut candidate = Utc::now().timestamp_millis();
        if candidate <= self.last_issued_id.get() {
            candidate = self.last_issued_id.get() + 1;
        }
        while entries.iter().any(|e| e.id == candidate.to_string()) {
            candidate += 1;
        }
        self.last_issued_id.set(candidate);
        candidate.to_string()
    }

    fn save_entries(&self) -> Result<()> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };
        let json = serde_json::to_string(&self.entries.get())
            .context("Failed to serialize workout entries")?;
        storage
            .set(&storage::storage_key(ENTRIES_KEY), &json)
            .context("Failed to persist workout entries")
    }

    fn save_weekly_goal(&self) -> Result<()> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };
        storage
            .set(
                &storage::storage_key(WEEKLY_GOAL_KEY),
                &self.weekly_goal.get().to_string(),
            )
            .context("Failed to persist weekly goal")
    }

    fn save_user_goals(&self) -> Result<()> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };
        let json = serde_json::to_string(&self.user_goals.get())
            .context("Failed to serialize user goals")?;
        storage
            .set(&storage::storage_key(USER_GOALS_KEY), &json)
            .context("Failed to persist user goals")
    }
}

// --- Helper Functions ---

/// The Sunday on or before `date`. Weeks run Sunday through Saturday.
fn week_start_sunday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}
