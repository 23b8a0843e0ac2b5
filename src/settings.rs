//! Game settings and preferences
//!
//! Persisted separately from the leaderboard as a JSON dotfile in the
//! user's home directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::sim::state::MAX_PARTICLES;

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Visual Effects ===
    /// Screen shake when the yard falls
    pub screen_shake: bool,
    /// Zoomies trail behind the dog
    pub trails: bool,
    /// Particle effects (catch poofs, score popups)
    pub particles: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Accessibility ===
    /// Reduced motion (minimize shake and flashes)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Visual effects - all on by default
            screen_shake: true,
            trails: true,
            particles: true,

            // HUD
            show_fps: true,

            // Audio
            master_volume: 0.8,
            sfx_volume: 1.0,

            // Accessibility
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// File name under the home directory
    const STORAGE_FILE: &'static str = ".yard_patrol_settings.json";

    /// Where the settings live on disk
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(Self::STORAGE_FILE)
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles { 0 } else { MAX_PARTICLES }
    }

    /// Load settings from disk, falling back to defaults when the file is
    /// missing or stale
    pub fn load_from(path: &Path) -> Self {
        if let Ok(json) = std::fs::read_to_string(path)
            && let Ok(settings) = serde_json::from_str(&json)
        {
            log::info!("Loaded settings from {}", path.display());
            return settings;
        }
        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to disk, logging and swallowing failures
    pub fn save_to(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = std::fs::write(path, json) {
                    log::warn!("Failed to write settings to {}: {err}", path.display());
                } else {
                    log::info!("Settings saved");
                }
            }
            Err(err) => log::warn!("Failed to encode settings: {err}"),
        }
    }
}
