//! Player preferences
//!
//! Persisted separately from the leaderboard in LocalStorage. Missing fields
//! fall back to their defaults so older saves keep loading.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::persistence::{self, Storage, StorageError};
use crate::sim::Controls;

/// DOM `KeyboardEvent.key` values bound to each gameplay control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub fire: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        fn keys(list: &[&str]) -> Vec<String> {
            list.iter().map(|k| k.to_string()).collect()
        }
        Self {
            left: keys(&["ArrowLeft", "a", "A"]),
            right: keys(&["ArrowRight", "d", "D"]),
            fire: keys(&[" "]),
        }
    }
}

impl KeyBindings {
    /// Resolve a held-key map into gameplay controls
    pub fn resolve(&self, held: &HashMap<String, bool>) -> Controls {
        Controls {
            left: any_held(&self.left, held),
            right: any_held(&self.right, held),
            fire: any_held(&self.fire, held),
        }
    }
}

fn any_held(bound: &[String], held: &HashMap<String, bool>) -> bool {
    bound
        .iter()
        .any(|key| held.get(key).copied().unwrap_or(false))
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bindings: KeyBindings,
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bindings: KeyBindings::default(),
            show_fps: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "alien_barrage_settings";

    /// Load settings, falling back to defaults
    pub fn load(storage: &dyn Storage) -> Self {
        match persistence::load_json(storage, Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), StorageError> {
        persistence::save_json(storage, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
