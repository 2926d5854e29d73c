//! TOML-based exercise catalog.
//!
//! Stores the user's exercise definitions plus app-level defaults:
//! - Per-exercise set/rep/timing parameters
//! - Two-sided exercises and their switch countdown
//! - The shared prepare countdown
//!
//! The catalog is stored at `~/.config/setpace/exercises.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CatalogError;

/// Returns `~/.config/setpace[-dev]/` based on SETPACE_ENV.
///
/// Set SETPACE_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, CatalogError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SETPACE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("setpace-dev")
    } else {
        base_dir.join("setpace")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// App-level defaults shared by every exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppDefaults {
    /// Get-into-position countdown before the first set.
    #[serde(default = "default_prepare_secs")]
    pub prepare_secs: u32,
}

/// One exercise definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_sets")]
    pub sets: u32,
    #[serde(default = "default_reps")]
    pub reps: u32,
    #[serde(default = "default_rep_duration_secs")]
    pub rep_duration_secs: u32,
    #[serde(default)]
    pub hold_secs: u32,
    #[serde(default = "default_rest_secs")]
    pub rest_secs: u32,
    /// Run each set once per side, right then left.
    #[serde(default)]
    pub perform_both_sides: bool,
    #[serde(default = "default_side_switch_secs")]
    pub side_switch_secs: u32,
}

/// The full catalog.
///
/// Serialized to/from TOML at `~/.config/setpace/exercises.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub app: AppDefaults,
    #[serde(default, rename = "exercise")]
    pub exercises: Vec<ExerciseDef>,
}

// Default functions
fn default_prepare_secs() -> u32 {
    5
}
fn default_sets() -> u32 {
    3
}
fn default_reps() -> u32 {
    10
}
fn default_rep_duration_secs() -> u32 {
    3
}
fn default_rest_secs() -> u32 {
    30
}
fn default_side_switch_secs() -> u32 {
    5
}

impl Default for AppDefaults {
    fn default() -> Self {
        Self {
            prepare_secs: default_prepare_secs(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::starter()
    }
}

impl Catalog {
    /// Location of the catalog file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created.
    pub fn path() -> Result<PathBuf, CatalogError> {
        Ok(data_dir()?.join("exercises.toml"))
    }

    /// Load from disk, seeding the starter catalog on first run.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be parsed, or if the
    /// starter catalog cannot be written.
    pub fn load() -> Result<Self, CatalogError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let catalog = Self::starter();
            catalog.save_to(&path)?;
            Ok(catalog)
        }
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| CatalogError::ParseFailed(e.to_string()))
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), CatalogError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), CatalogError> {
        let content = toml::to_string_pretty(self).map_err(|e| CatalogError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| CatalogError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load from disk, falling back to the starter catalog on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|_| Self::starter())
    }

    /// The catalog seeded on first run.
    pub fn starter() -> Self {
        Self {
            app: AppDefaults::default(),
            exercises: vec![
                ExerciseDef {
                    name: "Squat".into(),
                    description: "Bodyweight squat at a steady tempo.".into(),
                    sets: 3,
                    reps: 10,
                    rep_duration_secs: 3,
                    hold_secs: 0,
                    rest_secs: 45,
                    perform_both_sides: false,
                    side_switch_secs: 5,
                },
                ExerciseDef {
                    name: "Glute Bridge".into(),
                    description: "Lift, squeeze at the top, lower slowly.".into(),
                    sets: 3,
                    reps: 12,
                    rep_duration_secs: 2,
                    hold_secs: 2,
                    rest_secs: 30,
                    perform_both_sides: false,
                    side_switch_secs: 5,
                },
                ExerciseDef {
                    name: "Side Leg Raise".into(),
                    description: "Slow raise with a brief hold at the top.".into(),
                    sets: 2,
                    reps: 10,
                    rep_duration_secs: 2,
                    hold_secs: 1,
                    rest_secs: 30,
                    perform_both_sides: true,
                    side_switch_secs: 5,
                },
            ],
        }
    }

    /// Find an exercise by name, case-insensitively.
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownExercise`] when no exercise matches.
    pub fn find(&self, name: &str) -> Result<&ExerciseDef, CatalogError> {
        self.exercises
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| CatalogError::UnknownExercise(name.to_string()))
    }
}
