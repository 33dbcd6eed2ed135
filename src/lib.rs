use anyhow::{Context, Result};
use std::rc::Rc;

// --- Declare modules ---
mod demo;
pub mod modal;
pub mod observable;
pub mod settings;
pub mod storage;
pub mod workout;

// --- Expose public types ---
pub use modal::{ModalDescriptor, ModalOptions, ModalResponse, ModalService};
pub use observable::{Observable, Subscription};
pub use settings::{parse_feature, EnabledFeatures, Feature, SettingsStore, DEFAULT_THEME};
pub use storage::{
    Error as StorageError, // Renamed from Error
    FileStorage,
    MemoryStorage,
    StorageBackend,
    STORAGE_PREFIX,
};
pub use workout::{
    parse_goal_kind, EntryPatch, Exercise, GoalKind, NewWorkoutEntry, UserGoals, UserGoalsPatch,
    WorkoutEntry, WorkoutStore, DEFAULT_WEEKLY_GOAL,
};

/// The application's state services, constructed once by the host and passed
/// around by reference.
///
/// The storage capability is injected here and shared by both persisting
/// stores; `None` (headless contexts such as prerendering) turns every
/// persistence touchpoint into a no-op while the stores keep working in
/// memory.
pub struct AppStores {
    pub workout: WorkoutStore,
    pub settings: SettingsStore,
    pub modal: ModalService,
}

impl AppStores {
    pub fn new(storage: Option<Rc<dyn StorageBackend>>) -> Self {
        Self {
            workout: WorkoutStore::new(storage.clone()),
            settings: SettingsStore::new(storage),
            modal: ModalService::new(),
        }
    }

    /// Builds the stores and loads persisted state in one step.
    ///
    /// # Errors
    /// Returns an error when stored state fails to parse or the first-run
    /// seed cannot be persisted.
    pub fn initialize(storage: Option<Rc<dyn StorageBackend>>) -> Result<Self> {
        let stores = Self::new(storage);
        stores.init()?;
        Ok(stores)
    }

    /// Loads persisted data into both stores, workout first, then settings.
    /// Calling it again against unchanged storage reproduces the same state.
    ///
    /// # Errors
    /// Returns an error when stored state fails to parse or the first-run
    /// seed cannot be persisted.
    pub fn init(&self) -> Result<()> {
        self.workout
            .init()
            .context("Failed to initialize workout store")?;
        self.settings
            .init()
            .context("Failed to initialize settings store")?;
        Ok(())
    }

    /// Erases every persisted key and restores every store to its defaults.
    /// No-op without a storage medium.
    ///
    /// # Errors
    /// Returns an error if a key cannot be removed or a default cannot be
    /// re-persisted.
    pub fn clear_all_data(&self) -> Result<()> {
        self.workout.clear_all_data(&self.settings)
    }
}
