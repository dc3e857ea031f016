//! File-backed collaborators for the `propose` subcommand.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use slot_engine::{
    CalendarProvider, PreferenceStore, ProviderError, RawBusyInterval, TimeWindow, UserPreference,
};
use tracing::debug;

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ProviderError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| ProviderError::Unavailable(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&text)
        .map_err(|e| ProviderError::Malformed(format!("{}: {}", path.display(), e)))
}

/// Busy intervals read from a JSON array of `{"start", "end"}` objects.
///
/// Without a path the calendar reports an empty schedule. With a path, any
/// read or parse failure is a provider error.
pub struct FileCalendar {
    path: Option<PathBuf>,
}

impl FileCalendar {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl CalendarProvider for FileCalendar {
    fn busy_intervals(
        &self,
        calendar_id: &str,
        window: &TimeWindow,
    ) -> Result<Vec<RawBusyInterval>, ProviderError> {
        let Some(path) = &self.path else {
            return Ok(Vec::new());
        };
        debug!(
            calendar_id,
            path = %path.display(),
            window_start = %window.start,
            "reading busy file"
        );
        read_json(path)
    }
}

/// Preferences read from a JSON file; no path means "use defaults".
pub struct FilePreferences {
    path: Option<PathBuf>,
}

impl FilePreferences {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl PreferenceStore for FilePreferences {
    fn preferences(&self, user_id: &str) -> Result<Option<UserPreference>, ProviderError> {
        match &self.path {
            Some(path) => {
                debug!(user_id, path = %path.display(), "reading preference file");
                read_json(path).map(Some)
            }
            None => Ok(None),
        }
    }
}
