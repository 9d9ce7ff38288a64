//! Persisted UI preferences.
//!
//! [`UiPreferences`] is an explicit context object: it is created from a
//! [`PreferenceStore`], reads the persisted value once, and changes only
//! through [`UiPreferences::toggle_collapse`], which also persists.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::ShareholdingError;

/// Key under which the sidebar collapse flag is stored.
pub const SIDEBAR_COLLAPSED_KEY: &str = "sidebarCollapsed";

/// Environment variable overriding the preference file location.
pub const PREFERENCES_PATH_ENV: &str = "SHAREHOLDING_PREFS_PATH";

/// String key/value storage for preferences.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, ShareholdingError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ShareholdingError>;
}

/// Preferences kept in a flat JSON object on disk.
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$SHAREHOLDING_PREFS_PATH`, else `$HOME/.config/shareholding/preferences.json`,
    /// else `preferences.json` in the working directory.
    pub fn default_location() -> Self {
        if let Ok(path) = std::env::var(PREFERENCES_PATH_ENV) {
            if !path.trim().is_empty() {
                return Self::new(path);
            }
        }
        match std::env::var("HOME") {
            Ok(home) => Self::new(
                Path::new(&home)
                    .join(".config")
                    .join("shareholding")
                    .join("preferences.json"),
            ),
            Err(_) => Self::new("preferences.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>, ShareholdingError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => {
                return Err(ShareholdingError::Preferences(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            }
        };
        serde_json::from_str(&raw).map_err(|e| {
            ShareholdingError::Preferences(format!("{}: {}", self.path.display(), e))
        })
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, ShareholdingError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ShareholdingError> {
        // An unreadable file is replaced rather than blocking the write.
        let mut values = self.read_all().unwrap_or_default();
        values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| ShareholdingError::Preferences(format!("{}: {}", parent.display(), e)))?;
        }
        let json = serde_json::to_string_pretty(&values)
            .map_err(|e| ShareholdingError::Preferences(e.to_string()))?;
        std::fs::write(&self.path, json)
            .map_err(|e| ShareholdingError::Preferences(format!("{}: {}", self.path.display(), e)))
    }
}

/// Preferences held in memory only.
#[derive(Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, ShareholdingError> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ShareholdingError> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// UI layout preferences shared by every page.
pub struct UiPreferences<S> {
    store: S,
    sidebar_collapsed: bool,
}

impl<S: PreferenceStore> UiPreferences<S> {
    /// Loads the persisted state. Only the exact value `true` means collapsed;
    /// a read failure is logged and treated as not collapsed.
    pub fn init(store: S) -> Self {
        let sidebar_collapsed = match store.get(SIDEBAR_COLLAPSED_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                tracing::warn!("Failed to read preferences: {}", e);
                false
            }
        };
        Self {
            store,
            sidebar_collapsed,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.sidebar_collapsed
    }

    /// Flips the sidebar state and persists it. On a write failure the new
    /// state is kept for this session and the error is returned.
    pub fn toggle_collapse(&mut self) -> Result<bool, ShareholdingError> {
        self.sidebar_collapsed = !self.sidebar_collapsed;
        self.store
            .set(SIDEBAR_COLLAPSED_KEY, &self.sidebar_collapsed.to_string())?;
        Ok(self.sidebar_collapsed)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
