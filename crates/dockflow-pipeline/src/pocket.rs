//! Binding-pocket location via the external p2rank predictor.
//!
//! p2rank lives at a fixed relative path under a configurable root and writes
//! its ranked predictions table to a version-specific output location. Only
//! the top-ranked pocket is used. Everything here is fatal: a missing
//! launcher, a failed invocation, or an uninterpretable table aborts the run.

use dockflow_core::{DockError, RunLayout};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Relative location of the p2rank distribution under the tool root.
const P2RANK_DIR: &str = "p2rank_2.4.2";

/// Predicted binding-site center. One per run, shared by every ligand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PocketCenter {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Runs p2rank and extracts the top-ranked pocket center.
#[derive(Debug, Clone)]
pub struct PocketLocator {
    prank_root: PathBuf,
}

impl PocketLocator {
    pub fn new(prank_root: impl Into<PathBuf>) -> Self {
        Self {
            prank_root: prank_root.into(),
        }
    }

    /// Path to the `prank` launcher script.
    pub fn prank_path(&self) -> PathBuf {
        self.prank_root.join(P2RANK_DIR).join("prank")
    }

    /// Where p2rank writes the predictions table for this receptor.
    fn predictions_path(&self, receptor_id: &str) -> PathBuf {
        self.prank_root
            .join(P2RANK_DIR)
            .join("test_output")
            .join(format!("predict_{receptor_id}"))
            .join(format!("{receptor_id}.pdb_predictions.csv"))
    }

    /// Invoke `prank predict -f <receptor.pdb>` and parse the result table.
    pub fn locate(&self, layout: &RunLayout) -> Result<PocketCenter, DockError> {
        let prank = self.prank_path();
        if !prank.is_file() {
            return Err(DockError::ToolMissing {
                tool: "prank".to_string(),
                path: prank,
            });
        }
        ensure_executable(&prank)?;

        log::info!("running p2rank on {}", layout.receptor_pdb().display());
        let status = Command::new(&prank)
            .arg("predict")
            .arg("-f")
            .arg(layout.receptor_pdb())
            .status()
            .map_err(|e| DockError::tool("prank", format!("failed to spawn: {e}")))?;
        if !status.success() {
            return Err(DockError::tool(
                "prank",
                format!("predict exited with {status}"),
            ));
        }

        let csv_path = self.predictions_path(layout.receptor_id());
        let content = std::fs::read_to_string(&csv_path).map_err(|e| {
            DockError::PocketParse(format!(
                "cannot read predictions table {}: {e}",
                csv_path.display()
            ))
        })?;
        parse_predictions(&content)
    }
}

/// `chmod 755` the launcher if the execute bits are missing.
#[cfg(unix)]
fn ensure_executable(path: &Path) -> Result<(), DockError> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = std::fs::metadata(path)?;
    let mut permissions = metadata.permissions();
    if permissions.mode() & 0o111 == 0 {
        log::debug!("making {} executable", path.display());
        permissions.set_mode(0o755);
        std::fs::set_permissions(path, permissions)?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_executable(_path: &Path) -> Result<(), DockError> {
    Ok(())
}

/// Extract the top-ranked pocket center from a p2rank predictions table.
///
/// p2rank pads its header cells with incidental spaces (`   center_x`), so
/// columns are matched by trimmed name; any drift in the tool's format fails
/// loudly here rather than silently misreading a column. Only the first data
/// row is consulted.
pub fn parse_predictions(content: &str) -> Result<PocketCenter, DockError> {
    let mut lines = content.lines();
    let header = lines
        .next()
        .ok_or_else(|| DockError::PocketParse("predictions table is empty".to_string()))?;

    let columns: Vec<&str> = header.split(',').map(str::trim).collect();
    let col = |name: &str| {
        columns.iter().position(|c| *c == name).ok_or_else(|| {
            DockError::PocketParse(format!(
                "predictions table has no '{name}' column (header: {header})"
            ))
        })
    };
    let (ix, iy, iz) = (col("center_x")?, col("center_y")?, col("center_z")?);

    let first_row = lines.find(|l| !l.trim().is_empty()).ok_or_else(|| {
        DockError::PocketParse(
            "predictions table contains zero pockets; cannot define a search box".to_string(),
        )
    })?;
    let fields: Vec<&str> = first_row.split(',').map(str::trim).collect();

    let coord = |index: usize, name: &str| -> Result<f64, DockError> {
        fields
            .get(index)
            .and_then(|f| f.parse::<f64>().ok())
            .ok_or_else(|| {
                DockError::PocketParse(format!(
                    "cannot parse {name} from predictions row: {first_row}"
                ))
            })
    };

    Ok(PocketCenter {
        x: coord(ix, "center_x")?,
        y: coord(iy, "center_y")?,
        z: coord(iz, "center_z")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Header and row shapes taken from real p2rank 2.4.x output, including
    /// the space padding inside header cells.
    const REAL_OUTPUT: &str = "\
name,rank,score,probability,sas_points,surf_atoms,   center_x,   center_y,   center_z,residue_ids,surf_atom_ids
pocket1,1,15.91,0.855,54,38,    15.441,    26.226,     4.517, A_25 A_28 A_29, 123 126 130
pocket2,2,4.28,0.302,21,19,     1.120,    14.996,    -8.322, A_81 A_84, 640 645
";

    #[test]
    fn extracts_top_ranked_center_despite_header_padding() {
        let center = parse_predictions(REAL_OUTPUT).expect("parse");
        assert!((center.x - 15.441).abs() < 1e-9);
        assert!((center.y - 26.226).abs() < 1e-9);
        assert!((center.z - 4.517).abs() < 1e-9);
    }

    #[test]
    fn zero_rows_is_a_clear_fatal_error() {
        let header_only =
            "name,rank,score,probability,sas_points,surf_atoms,   center_x,   center_y,   center_z\n";
        let err = parse_predictions(header_only).unwrap_err();
        assert!(err.to_string().contains("zero pockets"));
    }

    #[test]
    fn missing_column_names_the_column() {
        let err = parse_predictions("name,rank,score\npocket1,1,15.91\n").unwrap_err();
        assert!(err.to_string().contains("center_x"));
    }

    #[test]
    fn unparseable_coordinate_is_fatal() {
        let bad = "\
name,rank,   center_x,   center_y,   center_z
pocket1,1,not-a-number,26.226,4.517
";
        let err = parse_predictions(bad).unwrap_err();
        assert!(err.to_string().contains("center_x"));
    }

    #[test]
    fn missing_launcher_is_tool_missing() {
        let dir = tempfile::tempdir().unwrap();
        let locator = PocketLocator::new(dir.path());
        let layout = RunLayout::new(dir.path().join("run"), "1ABC");
        let err = locator.locate(&layout).unwrap_err();
        assert!(matches!(err, DockError::ToolMissing { .. }));
    }
}
