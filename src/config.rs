//! Runtime settings (`~/.swarm_shooter.json`).
//!
//! Every field has a default, so a partial file only overrides what it names
//! and a missing file is the same as an empty one.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SWARM_SHOOTER_CONFIG";

/// Rules the simulation consults every frame.  Copied into `GameState`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gameplay {
    /// Spawn an explosion of particles when a projectile hits an enemy.
    pub particles: bool,
    /// When false, touching an enemy ends the game.
    pub player_invulnerable: bool,
    /// Clicks beyond this many live projectiles are ignored.
    pub max_projectiles: usize,
    /// Explosions stop adding particles past this count.
    pub max_particles: usize,
}

impl Default for Gameplay {
    fn default() -> Self {
        Self {
            particles: true,
            player_invulnerable: true,
            max_projectiles: 512,
            max_particles: 2000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Target frame duration in milliseconds (16 ≈ 60 FPS).
    pub frame_ms: u64,
    /// Wall-clock time between enemy spawns.
    pub spawn_interval_ms: u64,
    /// Opacity of the black layer painted over the previous frame.
    pub fade_alpha: f32,
    /// Fallback filter when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Where tracing output goes; the terminal itself is the game screen.
    pub log_file: Option<PathBuf>,
    pub gameplay: Gameplay,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_ms: 16,
            spawn_interval_ms: 1000,
            fade_alpha: 0.3,
            log_filter: "info".to_string(),
            log_file: None,
            gameplay: Gameplay::default(),
        }
    }
}

impl Settings {
    /// Load from `$SWARM_SHOOTER_CONFIG`, else `~/.swarm_shooter.json`.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Missing file → defaults.  Unreadable or malformed file → error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&text).map_err(|source| GameError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("swarm_shooter.log"))
    }
}

fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".swarm_shooter.json")
}
