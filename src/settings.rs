//src/settings.rs
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::observable::Observable;
use crate::storage::{self, StorageBackend};

const THEME_KEY: &str = "theme";
const FEATURES_KEY: &str = "features";

/// Theme applied until the user picks one.
pub const DEFAULT_THEME: &str = "tundra";

/// Toggles for the optional UI sections.
///
/// The field-level defaults are load semantics, not the fresh-store state: a
/// stored object missing a key loads that flag as `false`, while a store that
/// never persisted anything starts all-`true` via [`Default`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnabledFeatures {
    #[serde(default)]
    pub notes: bool,
    #[serde(default)]
    pub warmup: bool,
    #[serde(default)]
    pub photo: bool,
}

impl Default for EnabledFeatures {
    fn default() -> Self {
        EnabledFeatures {
            notes: true,
            warmup: true,
            photo: true,
        }
    }
}

/// The fixed feature-flag keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Feature {
    Notes,
    Warmup,
    Photo,
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feature::Notes => write!(f, "notes"),
            Feature::Warmup => write!(f, "warmup"),
            Feature::Photo => write!(f, "photo"),
        }
    }
}

/// Parses a flag name (as stored, e.g. "warmup") into a [`Feature`].
///
/// # Errors
/// Returns an error if the name matches no known flag.
pub fn parse_feature(name: &str) -> Result<Feature> {
    let trimmed = name.trim();
    for feature in Feature::iter() {
        if feature.to_string().eq_ignore_ascii_case(trimmed) {
            return Ok(feature);
        }
    }
    bail!("Unknown feature flag: '{trimmed}'");
}

/// Owns the UI settings: the theme name and the feature flags.
pub struct SettingsStore {
    pub theme: Observable<String>,
    pub enabled_features: Observable<EnabledFeatures>,
    storage: Option<Rc<dyn StorageBackend>>,
}

impl SettingsStore {
    pub fn new(storage: Option<Rc<dyn StorageBackend>>) -> Self {
        Self {
            theme: Observable::new(DEFAULT_THEME.to_string()),
            enabled_features: Observable::new(EnabledFeatures::default()),
            storage,
        }
    }

    /// Loads persisted settings; skips entirely without a storage medium.
    /// The stored feature object is taken as-is, so flags it omits load as
    /// `false` rather than the fresh-store defaults.
    ///
    /// # Errors
    /// Returns an error when the stored feature flags fail to parse.
    pub fn init(&self) -> Result<()> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };

        if let Some(theme) = storage.get(&storage::storage_key(THEME_KEY)) {
            self.theme.set(theme);
        }

        if let Some(raw) = storage.get(&storage::storage_key(FEATURES_KEY)) {
            let features: EnabledFeatures =
                serde_json::from_str(&raw).context("Failed to parse stored feature flags")?;
            self.enabled_features.set(features);
        }

        Ok(())
    }

    /// Replaces the theme and persists it. The name is stored as a raw
    /// string, not JSON.
    ///
    /// # Errors
    /// Returns an error if the theme cannot be persisted.
    pub fn set_theme(&self, name: &str) -> Result<()> {
        self.theme.set(name.to_string());
        self.save_theme()
    }

    /// The current theme name.
    pub fn get_theme(&self) -> String {
        self.theme.get()
    }

    /// Flips one feature flag and persists the set. A flag that loaded as
    /// missing is `false`, so its first toggle yields `true`.
    ///
    /// # Errors
    /// Returns an error if the flags cannot be persisted.
    pub fn toggle_feature(&self, feature: Feature) -> Result<()> {
        self.enabled_features.update(|mut features| {
            match feature {
                Feature::Notes => features.notes = !features.notes,
                Feature::Warmup => features.warmup = !features.warmup,
                Feature::Photo => features.photo = !features.photo,
            }
            features
        });
        self.save_features()
    }

    /// The raw current value of one feature flag.
    pub fn is_feature_enabled(&self, feature: Feature) -> bool {
        let features = self.enabled_features.get();
        match feature {
            Feature::Notes => features.notes,
            Feature::Warmup => features.warmup,
            Feature::Photo => features.photo,
        }
    }

    /// Clear-all delegate: wipes both persisted settings keys, restores the
    /// documented defaults and re-persists them.
    pub(crate) fn reset_to_defaults(&self) -> Result<()> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };

        for key in [THEME_KEY, FEATURES_KEY] {
            storage
                .remove(&storage::storage_key(key))
                .with_context(|| format!("Failed to remove stored '{key}'"))?;
        }

        self.theme.set(DEFAULT_THEME.to_string());
        self.enabled_features.set(EnabledFeatures::default());
        self.save_theme()?;
        self.save_features()
    }

    fn save_theme(&self) -> Result<()> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };
        storage
            .set(&storage::storage_key(THEME_KEY), &self.theme.get())
            .context("Failed to persist theme")
    }

    fn save_features(&self) -> Result<()> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };
        let json = serde_json::to_string(&self.enabled_features.get())
            .context("Failed to serialize feature flags")?;
        storage
            .set(&storage::storage_key(FEATURES_KEY), &json)
            .context("Failed to persist feature flags")
    }
}
