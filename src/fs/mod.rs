//! File system operations.

use std::path::{Path, PathBuf};

use anyhow::Context;

pub mod settings;

pub use settings::{PersistedSettings, load_settings, save_settings};

/// Holds all polychat-related paths derived from a base directory.
///
/// This struct enables dependency injection of filesystem paths, allowing
/// tests to use isolated temporary directories instead of the actual
/// working directory. In production, the base is typically the current
/// working directory (or whatever `--dir` points at).
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use polychat::fs::StoragePaths;
///
/// let paths = StoragePaths::new(Path::new("/tmp/test"));
/// assert_eq!(
///     paths.api_keys_file(),
///     Path::new("/tmp/test/.polychat/api_keys.json")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct StoragePaths {
    base: PathBuf,
}

impl StoragePaths {
    /// Creates paths rooted at the given base directory.
    #[must_use]
    pub fn new(base: &Path) -> Self {
        Self {
            base: base.to_path_buf(),
        }
    }

    /// Creates paths rooted at the current working directory.
    ///
    /// # Panics
    ///
    /// Panics if the current directory cannot be determined.
    #[must_use]
    #[allow(clippy::expect_used)] // Documented panic - fundamental requirement for app startup.
    pub fn from_cwd() -> Self {
        Self {
            base: std::env::current_dir().expect("Failed to get current directory"),
        }
    }

    /// Returns the base directory.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Returns the `.polychat` directory path.
    #[must_use]
    pub fn polychat_dir(&self) -> PathBuf {
        self.base.join(".polychat")
    }

    /// Returns the API-key store path (`.polychat/api_keys.json`).
    #[must_use]
    pub fn api_keys_file(&self) -> PathBuf {
        self.base.join(".polychat/api_keys.json")
    }

    /// Returns the enabled-model store path (`.polychat/enabled_models.json`).
    #[must_use]
    pub fn enabled_models_file(&self) -> PathBuf {
        self.base.join(".polychat/enabled_models.json")
    }

    /// Ensures the `.polychat` directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn ensure_polychat_dir(&self) -> anyhow::Result<()> {
        let dir = self.polychat_dir();
        if !dir.exists() {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        Ok(())
    }

    /// Loads settings from both store files.
    ///
    /// Missing or malformed files yield empty mappings; this never fails.
    #[must_use]
    pub fn load_settings(&self) -> PersistedSettings {
        load_settings(&self.api_keys_file(), &self.enabled_models_file())
    }

    /// Saves settings wholesale to both store files.
    ///
    /// Creates the `.polychat` directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or a file
    /// cannot be written.
    pub fn save_settings(&self, settings: &PersistedSettings) -> anyhow::Result<()> {
        self.ensure_polychat_dir()?;
        save_settings(
            &self.api_keys_file(),
            &self.enabled_models_file(),
            settings,
        )
    }
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::from_cwd()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn paths_are_derived_from_base() {
        let base = Path::new("/test/base");
        let paths = StoragePaths::new(base);

        assert_eq!(paths.base(), Path::new("/test/base"));
        assert_eq!(paths.polychat_dir(), Path::new("/test/base/.polychat"));
        assert_eq!(
            paths.api_keys_file(),
            Path::new("/test/base/.polychat/api_keys.json")
        );
        assert_eq!(
            paths.enabled_models_file(),
            Path::new("/test/base/.polychat/enabled_models.json")
        );
    }

    #[test]
    fn ensure_polychat_dir_creates_directory() {
        let temp = TempDir::new().unwrap();
        let paths = StoragePaths::new(temp.path());

        assert!(!paths.polychat_dir().exists());
        paths.ensure_polychat_dir().unwrap();
        assert!(paths.polychat_dir().exists());
    }

    #[test]
    fn ensure_polychat_dir_succeeds_when_exists() {
        let temp = TempDir::new().unwrap();
        let paths = StoragePaths::new(temp.path());

        std::fs::create_dir_all(paths.polychat_dir()).unwrap();
        paths.ensure_polychat_dir().unwrap();
    }

    #[test]
    fn save_and_load_settings_roundtrip() {
        let temp = TempDir::new().unwrap();
        let paths = StoragePaths::new(temp.path());

        let mut settings = PersistedSettings::default();
        settings
            .api_keys
            .insert("claude".to_string(), "sk-test".to_string());
        settings.enabled_models.insert("claude".to_string(), true);

        paths.save_settings(&settings).unwrap();
        let loaded = paths.load_settings();
        assert_eq!(settings, loaded);
    }
}
