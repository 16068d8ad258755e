//! # Settings State
//!
//! The process-wide Settings, loaded once at startup and replaced whole
//! after every successful save.

use std::sync::{Arc, Mutex};

use beshob_core::Settings;

/// Managed Settings.
#[derive(Debug)]
pub struct SettingsState {
    settings: Arc<Mutex<Settings>>,
}

impl SettingsState {
    pub fn new(settings: Settings) -> Self {
        SettingsState {
            settings: Arc::new(Mutex::new(settings)),
        }
    }

    /// Returns a copy of the current settings.
    ///
    /// Commands take a snapshot before awaiting so no lock spans an await.
    pub fn snapshot(&self) -> Settings {
        self.with_settings(Settings::clone)
    }

    /// Replaces the settings after they were persisted.
    pub fn replace(&self, settings: Settings) {
        self.with_settings_mut(|s| *s = settings);
    }

    /// Executes a function with read access to the settings.
    pub fn with_settings<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Settings) -> R,
    {
        let settings = self.settings.lock().expect("Settings mutex poisoned");
        f(&settings)
    }

    /// Executes a function with write access to the settings.
    pub fn with_settings_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Settings) -> R,
    {
        let mut settings = self.settings.lock().expect("Settings mutex poisoned");
        f(&mut settings)
    }
}

impl Default for SettingsState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
