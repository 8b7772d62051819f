//! TOML run configuration.
//!
//! Serde-based configuration for the docking pipeline. Every section has
//! defaults that reproduce the stock pipeline behavior, so an empty file (or
//! no file at all) is a valid configuration.

use crate::DockError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration for a docking run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DockConfig {
    /// Output directory for all run artifacts
    #[serde(default)]
    pub run: RunConfig,

    /// Search box dimensions
    #[serde(default, rename = "box")]
    pub search_box: BoxConfig,

    /// Ligand conformer generation settings
    #[serde(default)]
    pub conformer: ConformerConfig,

    /// External tool locations
    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Run directory; all per-ligand and receptor artifacts land here
    pub dir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("docking_results"),
        }
    }
}

/// Cubic docking search box. The same box is used for every ligand of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxConfig {
    pub size_x: f64,
    pub size_y: f64,
    pub size_z: f64,
}

impl Default for BoxConfig {
    fn default() -> Self {
        Self {
            size_x: 20.0,
            size_y: 20.0,
            size_z: 20.0,
        }
    }
}

/// Conformer generation and minimization settings for ligand preparation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConformerConfig {
    /// Force field used for geometry optimization
    pub forcefield: String,
    /// Maximum number of minimization steps
    pub steps: u32,
}

impl Default for ConformerConfig {
    fn default() -> Self {
        Self {
            forcefield: "UFF".to_string(),
            steps: 200,
        }
    }
}

/// Locations of the external collaborators. Bare names are resolved via PATH.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Open Babel binary (format conversion, conformer generation)
    pub obabel: PathBuf,
    /// AutoDock Vina binary (docking search)
    pub vina: PathBuf,
    /// Directory containing the `p2rank_2.4.2` distribution
    pub prank_root: PathBuf,
    /// PyMOL binary override; discovered via PATH when unset
    pub pymol: Option<PathBuf>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            obabel: PathBuf::from("obabel"),
            vina: PathBuf::from("vina"),
            prank_root: PathBuf::from("."),
            pymol: None,
        }
    }
}

impl DockConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, DockError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, DockError> {
        let config: DockConfig =
            toml::from_str(content).map_err(|e| DockError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject box and minimization settings that cannot drive a run.
    pub fn validate(&self) -> Result<(), DockError> {
        let b = &self.search_box;
        if b.size_x <= 0.0 || b.size_y <= 0.0 || b.size_z <= 0.0 {
            return Err(DockError::config(format!(
                "search box dimensions must be positive, got {}x{}x{}",
                b.size_x, b.size_y, b.size_z
            )));
        }
        if self.conformer.steps == 0 {
            return Err(DockError::config(
                "conformer.steps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_pipeline() {
        let config = DockConfig::default();
        assert_eq!(config.run.dir, PathBuf::from("docking_results"));
        assert!((config.search_box.size_x - 20.0).abs() < f64::EPSILON);
        assert!((config.search_box.size_y - 20.0).abs() < f64::EPSILON);
        assert!((config.search_box.size_z - 20.0).abs() < f64::EPSILON);
        assert_eq!(config.conformer.steps, 200);
        assert_eq!(config.conformer.forcefield, "UFF");
        assert_eq!(config.tools.vina, PathBuf::from("vina"));
    }

    #[test]
    fn empty_toml_is_valid() {
        let config = DockConfig::parse("").expect("empty config");
        assert_eq!(config.conformer.steps, 200);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = DockConfig::parse(
            r#"
            [box]
            size_x = 25.0
            size_y = 25.0
            size_z = 25.0

            [tools]
            vina = "/opt/vina/bin/vina"
            "#,
        )
        .expect("parse");
        assert!((config.search_box.size_x - 25.0).abs() < f64::EPSILON);
        assert_eq!(config.tools.vina, PathBuf::from("/opt/vina/bin/vina"));
        assert_eq!(config.tools.obabel, PathBuf::from("obabel"));
        assert_eq!(config.conformer.steps, 200);
    }

    #[test]
    fn single_key_sections_fill_remaining_fields_from_defaults() {
        let config = DockConfig::parse(
            r#"
            [box]
            size_x = 30.0

            [tools]
            vina = "/opt/vina/bin/vina"
            "#,
        )
        .expect("partial sections");
        assert!((config.search_box.size_x - 30.0).abs() < f64::EPSILON);
        assert!((config.search_box.size_y - 20.0).abs() < f64::EPSILON);
        assert!((config.search_box.size_z - 20.0).abs() < f64::EPSILON);
        assert_eq!(config.tools.vina, PathBuf::from("/opt/vina/bin/vina"));
        assert_eq!(config.tools.obabel, PathBuf::from("obabel"));
        assert_eq!(config.tools.prank_root, PathBuf::from("."));
    }

    #[test]
    fn rejects_degenerate_box() {
        let err = DockConfig::parse(
            r#"
            [box]
            size_x = 0.0
            size_y = 20.0
            size_z = 20.0
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("must be positive"));
    }
}
