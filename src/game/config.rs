// Hero configuration file

use crate::engine::assets::{AssetError, ClipDefinition, ClipLibrary};
use crate::engine::camera::CameraFollow;
use crate::game::animation::{AnimationCatalog, AnimationTable, CatalogError};
use crate::game::animation::catalog::{StateClipEntry, TransitionEntry};
use crate::game::characters::stats::MotionTunables;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Everything needed to set up a hero. Missing sections fall back to
/// [`HeroConfig::standard`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    pub motion: MotionTunables,
    pub clips: Vec<ClipDefinition>,
    pub animation: AnimationTable,
    pub camera: CameraFollow,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl HeroConfig {
    /// Stock hero: base tunables, one clip per state plus landing and
    /// run-stop connectors. Walk and run mark footsteps, attack its swing.
    pub fn standard() -> Self {
        let clips = vec![
            ClipDefinition::new("idle", 8, 12.0),
            ClipDefinition::new("walk", 8, 12.0)
                .with_marker(0.0, "footstep")
                .with_marker(0.25, "footstep"),
            ClipDefinition::new("run", 6, 16.0)
                .with_marker(0.0, "footstep")
                .with_marker(0.1875, "footstep"),
            ClipDefinition::new("crouch", 4, 12.0),
            ClipDefinition::new("rise", 3, 12.0),
            ClipDefinition::new("fall", 3, 12.0),
            ClipDefinition::new("attack", 6, 20.0).with_marker(0.125, "swing"),
            ClipDefinition::new("land", 3, 20.0),
            ClipDefinition::new("run-stop", 4, 20.0),
        ];

        let states = ["idle", "walk", "run", "crouch", "rise", "fall", "attack"]
            .into_iter()
            .map(|name| StateClipEntry {
                state: name.to_string(),
                clip: name.to_string(),
            })
            .collect();

        let transitions = [
            ("fall", "idle", "land"),
            ("fall", "walk", "land"),
            ("fall", "run", "land"),
            ("run", "idle", "run-stop"),
        ]
        .into_iter()
        .map(|(from, to, via)| TransitionEntry {
            from: from.to_string(),
            to: to.to_string(),
            transition: via.to_string(),
        })
        .collect();

        Self {
            motion: MotionTunables::default(),
            clips,
            animation: AnimationTable {
                states,
                transitions,
            },
            camera: CameraFollow::default(),
        }
    }

    /// Read a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        log::info!(
            "Loaded hero config from {} ({} clips)",
            path.display(),
            config.clips.len()
        );
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Register every clip definition
    pub fn build_library(&self) -> Result<ClipLibrary, ConfigError> {
        Ok(ClipLibrary::from_definitions(&self.clips)?)
    }

    /// Resolve the animation tables against `library`
    pub fn build_catalog(&self, library: &ClipLibrary) -> Result<AnimationCatalog, ConfigError> {
        Ok(AnimationCatalog::from_table(&self.animation, library)?)
    }
}
