//! Sketch settings and tunables
//!
//! Persisted as JSON: LocalStorage on the web, an optional file natively.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::SceneLayout;

/// Sketch settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the mirrors, diamond and observer sit
    pub layout: SceneLayout,

    // === Motion ===
    /// Units per frame for the particle
    pub particle_speed: f32,
    /// Units per frame for ghost ray tips
    pub ghost_speed: f32,
    /// Minimum x travel from the flight origin before a mirror crossing counts
    pub reflect_guard: f32,

    // === Sight ball ===
    pub sight_offset_y: f32,
    pub sight_size: f32,
    pub sight_max_offset: f32,
    pub sight_pulse_step: f32,

    // === Visuals ===
    /// Draw the live trail from the flight origin to the particle
    pub show_trail: bool,
    /// Draw ghost rays
    pub show_ghost_rays: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            layout: SceneLayout::default(),

            particle_speed: RAY_SPEED,
            ghost_speed: RAY_SPEED,
            reflect_guard: REFLECT_GUARD,

            sight_offset_y: SIGHT_OFFSET_Y,
            sight_size: SIGHT_SIZE,
            sight_max_offset: SIGHT_MAX_OFFSET,
            sight_pulse_step: SIGHT_PULSE_STEP,

            show_trail: true,
            show_ghost_rays: true,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "mirror_sketch_settings";

    /// Environment variable naming a settings file (native only)
    pub const PATH_ENV: &'static str = "MIRROR_SKETCH_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from the file named by `MIRROR_SKETCH_SETTINGS`, if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::PATH_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path);
                    settings
                }
                Err(e) => {
                    log::warn!("Bad settings file {}: {}, using defaults", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Can't read settings file {}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Write settings to the file named by `MIRROR_SKETCH_SETTINGS`, if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        let Ok(path) = std::env::var(Self::PATH_ENV) else {
            return;
        };
        match self.to_json() {
            Ok(json) => match std::fs::write(&path, json) {
                Ok(()) => log::info!("Settings saved to {}", path),
                Err(e) => log::warn!("Can't write settings file {}: {}", path, e),
            },
            Err(e) => log::warn!("Can't serialize settings: {}", e),
        }
    }
}
