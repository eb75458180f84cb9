//! Startup configuration: optional RON file, overridden by CLI flags

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::atlas::{AtlasGrid, MAX_CELL_SIZE};
use crate::selection::RepeatPolicy;

pub const DEFAULT_CATALOG_PATH: &str = "data/pokemon.json";
pub const DEFAULT_ATLAS_PATH: &str = "assets/sprites.png";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {reason}")]
    Parse { path: String, reason: String },
    #[error("invalid atlas grid: columns and cell size must be non-zero (got {columns} columns, {cell_width}x{cell_height} cells)")]
    InvalidGrid {
        columns: u32,
        cell_width: u32,
        cell_height: u32,
    },
    #[error("invalid atlas grid: cells larger than {max}px are not supported (got {cell_width}x{cell_height})")]
    CellTooLarge {
        cell_width: u32,
        cell_height: u32,
        max: u32,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: PathBuf,
    pub atlas: PathBuf,
    pub grid: AtlasGrid,
    pub deselect_on_repeat: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from(DEFAULT_CATALOG_PATH),
            atlas: PathBuf::from(DEFAULT_ATLAS_PATH),
            grid: AtlasGrid::default(),
            deselect_on_repeat: false,
        }
    }
}

/// Values given on the command line; `None` keeps the file/default value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigOverrides {
    pub catalog: Option<PathBuf>,
    pub atlas: Option<PathBuf>,
    pub columns: Option<u32>,
    pub cell_width: Option<u32>,
    pub cell_height: Option<u32>,
    pub deselect_on_repeat: bool,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&text).map_err(|reason| ConfigError::Parse {
            path: path.display().to_string(),
            reason,
        })
    }

    pub fn from_ron_str(text: &str) -> Result<Self, String> {
        ron::de::from_str(text).map_err(|e| e.to_string())
    }

    /// Load `path` if given, otherwise start from defaults, then apply CLI values.
    pub fn resolve(path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        base.apply(overrides).validate()
    }

    pub fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(catalog) = overrides.catalog {
            self.catalog = catalog;
        }
        if let Some(atlas) = overrides.atlas {
            self.atlas = atlas;
        }
        if let Some(columns) = overrides.columns {
            self.grid.columns = columns;
        }
        if let Some(width) = overrides.cell_width {
            self.grid.cell_width = width;
        }
        if let Some(height) = overrides.cell_height {
            self.grid.cell_height = height;
        }
        self.deselect_on_repeat |= overrides.deselect_on_repeat;
        self
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        let grid = self.grid;
        if !grid.is_valid() {
            return Err(ConfigError::InvalidGrid {
                columns: grid.columns,
                cell_width: grid.cell_width,
                cell_height: grid.cell_height,
            });
        }
        if grid.cell_width > MAX_CELL_SIZE || grid.cell_height > MAX_CELL_SIZE {
            return Err(ConfigError::CellTooLarge {
                cell_width: grid.cell_width,
                cell_height: grid.cell_height,
                max: MAX_CELL_SIZE,
            });
        }
        Ok(self)
    }

    pub fn repeat_policy(&self) -> RepeatPolicy {
        RepeatPolicy::from_flag(self.deselect_on_repeat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let config = Config::from_ron_str("(grid: (columns: 4))").unwrap();
        assert_eq!(config.grid.columns, 4);
        assert_eq!(config.grid.cell_width, AtlasGrid::default().cell_width);
        assert_eq!(config.catalog, PathBuf::from(DEFAULT_CATALOG_PATH));
        assert!(!config.deselect_on_repeat);
    }

    #[test]
    fn test_overrides_win() {
        let config = Config::default().apply(ConfigOverrides {
            catalog: Some("dex.json".into()),
            columns: Some(1),
            cell_width: Some(50),
            cell_height: Some(50),
            deselect_on_repeat: true,
            ..Default::default()
        });
        assert_eq!(config.catalog, PathBuf::from("dex.json"));
        assert_eq!(config.atlas, PathBuf::from(DEFAULT_ATLAS_PATH));
        assert_eq!(config.grid, AtlasGrid::new(50, 50, 1));
        assert_eq!(config.repeat_policy(), RepeatPolicy::Deselect);
    }

    #[test]
    fn test_zero_columns_rejected() {
        let err = Config::default()
            .apply(ConfigOverrides {
                columns: Some(0),
                ..Default::default()
            })
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidGrid { columns: 0, .. }));
    }

    #[test]
    fn test_oversized_cells_rejected() {
        let err = Config::default()
            .apply(ConfigOverrides {
                cell_height: Some(50_000),
                ..Default::default()
            })
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::CellTooLarge {
                cell_height: 50_000,
                ..
            }
        ));

        let at_limit = Config::default().apply(ConfigOverrides {
            cell_width: Some(MAX_CELL_SIZE),
            ..Default::default()
        });
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_bad_ron_is_parse_error() {
        assert!(Config::from_ron_str("(grid: oops)").is_err());
    }
}
