use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ToolSizes;
use crate::tool::{DEFAULT_COLOR, ToolKind, parse_hex_color};

/// Storage key the preferences live under
pub const PREFERENCES_KEY: &str = "paint_store/preferences";

/// Errors that can occur while saving or loading preferences
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize preferences: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid preference data: {0}")]
    InvalidState(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Tool settings carried between sessions. Gesture state is never saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct StorePreferences {
    pub tool: ToolKind,
    pub color: String,
    pub sizes: ToolSizes,
}

impl Default for StorePreferences {
    fn default() -> Self {
        Self {
            tool: ToolKind::default(),
            color: DEFAULT_COLOR.to_owned(),
            sizes: ToolSizes::default(),
        }
    }
}

impl StorePreferences {
    /// Rejects data the store would accept but the canvas cannot use.
    pub fn validate(&self) -> PersistenceResult<()> {
        parse_hex_color(&self.color).map_err(|e| PersistenceError::InvalidState(e.to_string()))?;
        for kind in ToolKind::ALL {
            let size = self.sizes.get(kind);
            if !(size.is_finite() && size > 0.0) {
                return Err(PersistenceError::InvalidState(format!(
                    "{} size must be positive, got {}",
                    kind, size
                )));
            }
        }
        Ok(())
    }
}

/// Writes the preferences as JSON under [`PREFERENCES_KEY`].
pub fn save_preferences(
    preferences: &StorePreferences,
    storage: &mut dyn eframe::Storage,
) -> PersistenceResult<()> {
    let json = serde_json::to_string(preferences)?;
    storage.set_string(PREFERENCES_KEY, json);
    Ok(())
}

/// Reads the preferences back. `Ok(None)` means nothing was saved yet.
pub fn load_preferences(
    storage: &dyn eframe::Storage,
) -> PersistenceResult<Option<StorePreferences>> {
    let Some(json) = storage.get_string(PREFERENCES_KEY) else {
        return Ok(None);
    };
    let preferences: StorePreferences = serde_json::from_str(&json)?;
    preferences.validate()?;
    Ok(Some(preferences))
}
