//! Settings persistence module.
//!
//! Per-model API keys and enablement flags are the only durable state of
//! the application. They are stored as two JSON documents under
//! `.polychat/` - one object per store key - and are always written
//! wholesale. There is no versioning and no migration: a file that cannot
//! be read or parsed is treated as absent, never as an error.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::app::state::SettingsPanelState;
use crate::core::ModelId;

/// Persisted settings as they appear on disk.
///
/// Keys are the symbolic model identifiers (`"chatgpt"`, `"claude"`, ...).
/// `BTreeMap` keeps the serialized output stable between saves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedSettings {
    /// Model identifier to API-key string.
    pub api_keys: BTreeMap<String, String>,
    /// Model identifier to enabled flag.
    pub enabled_models: BTreeMap<String, bool>,
}

impl From<&SettingsPanelState> for PersistedSettings {
    fn from(state: &SettingsPanelState) -> Self {
        let api_keys = state
            .api_keys
            .iter()
            .map(|(model, key)| (model.id().to_string(), key.clone()))
            .collect();
        let enabled_models = state
            .enabled
            .iter()
            .map(|(model, on)| (model.id().to_string(), *on))
            .collect();
        Self {
            api_keys,
            enabled_models,
        }
    }
}

impl PersistedSettings {
    /// Applies these persisted settings to a mutable [`SettingsPanelState`].
    ///
    /// Entries whose identifier is not in the model registry are dropped;
    /// the registry is the source of truth for which models exist.
    pub fn apply_to(&self, state: &mut SettingsPanelState) {
        state.api_keys = self
            .api_keys
            .iter()
            .filter_map(|(id, key)| ModelId::parse(id).map(|m| (m, key.clone())))
            .collect();
        state.enabled = self
            .enabled_models
            .iter()
            .filter_map(|(id, on)| ModelId::parse(id).map(|m| (m, *on)))
            .collect();
    }
}

/// Reads one JSON store file, treating missing and malformed content alike
/// as an empty mapping.
fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    let Ok(content) = std::fs::read_to_string(path) else {
        return T::default();
    };
    serde_json::from_str(&content).unwrap_or_default()
}

/// Writes one JSON store file as pretty-printed JSON.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize settings")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write settings file: {}", path.display()))
}

/// Loads settings from the two store files.
///
/// Either file being absent or malformed yields an empty mapping for that
/// file; this function never fails.
#[must_use]
pub fn load_settings(api_keys_path: &Path, enabled_models_path: &Path) -> PersistedSettings {
    PersistedSettings {
        api_keys: read_json_or_default(api_keys_path),
        enabled_models: read_json_or_default(enabled_models_path),
    }
}

/// Saves settings wholesale to the two store files.
///
/// The parent directory must exist (callers go through
/// [`StoragePaths::save_settings`], which ensures it).
///
/// # Errors
///
/// Returns an error if either file cannot be written.
///
/// [`StoragePaths::save_settings`]: crate::fs::StoragePaths::save_settings
pub fn save_settings(
    api_keys_path: &Path,
    enabled_models_path: &Path,
    settings: &PersistedSettings,
) -> Result<()> {
    write_json(api_keys_path, &settings.api_keys)?;
    write_json(enabled_models_path, &settings.enabled_models)
}
