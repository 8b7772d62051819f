//! Combined best-pose structure generation.
//!
//! After a successful dock, the first model of the engine's multi-pose output
//! is converted back to PDB and merged with the cleaned receptor into
//! `<id>_ligand_<i>_best.pdb`, the file the visualizer aligns and renders.
//! The score is already recorded by the time this runs, so a failure here is
//! logged and non-fatal.

use dockflow_core::{pdb, DockError, RunLayout};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Builds combined receptor + best-pose PDB files.
#[derive(Debug, Clone)]
pub struct BestPoseBuilder {
    obabel: PathBuf,
}

impl BestPoseBuilder {
    pub fn new(obabel: impl Into<PathBuf>) -> Self {
        Self {
            obabel: obabel.into(),
        }
    }

    /// Write the combined file for ligand `index`. Returns the path on
    /// success; the caller treats `Err` as a logged warning.
    pub fn build(&self, layout: &RunLayout, index: usize) -> Result<PathBuf, DockError> {
        let pose_pdb = layout.ligand_pose_pdb(index);
        self.pdbqt_to_pdb(&layout.ligand_out(index), &pose_pdb)?;

        let pose_content = std::fs::read_to_string(&pose_pdb)?;
        // The intermediate conversion has served its purpose either way
        if let Err(err) = std::fs::remove_file(&pose_pdb) {
            log::warn!("could not remove {}: {err}", pose_pdb.display());
        }
        let best_model = pdb::first_model(&pose_content);
        if pdb::atom_record_count(&best_model) == 0 {
            return Err(DockError::Pdb(format!(
                "no atoms in best pose from {}",
                layout.ligand_out(index).display()
            )));
        }

        let receptor = std::fs::read_to_string(layout.receptor_pdb())?;
        let combined = pdb::merge_structures(&receptor, &best_model);

        let dest = layout.best_pose(index);
        std::fs::write(&dest, combined)?;
        Ok(dest)
    }

    fn pdbqt_to_pdb(&self, input: &Path, output: &Path) -> Result<(), DockError> {
        let status = Command::new(&self.obabel)
            .args(["-i", "pdbqt"])
            .arg(input)
            .args(["-o", "pdb", "-O"])
            .arg(output)
            .status()
            .map_err(|e| DockError::tool("obabel", format!("failed to spawn: {e}")))?;
        if !status.success() {
            return Err(DockError::tool(
                "obabel",
                format!("pose conversion of {} exited with {status}", input.display()),
            ));
        }
        Ok(())
    }
}
