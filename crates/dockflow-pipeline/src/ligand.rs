//! Ligand preparation: SMILES string to minimized 3D structure file.
//!
//! Four independent fallible steps: lexical parse, 3D embedding with explicit
//! hydrogens, force-field minimization, and a read-back sanity check. Every
//! failure is caught here, logged with the offending string and cause, and
//! reported as a plain negative result; a bad ligand never aborts the run.

use crate::smiles;
use dockflow_core::{pdb, ConformerConfig, DockError};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Prepares minimized 3D ligand structures via the Open Babel toolkit.
#[derive(Debug, Clone)]
pub struct LigandPreparer {
    obabel: PathBuf,
    conformer: ConformerConfig,
}

impl LigandPreparer {
    pub fn new(obabel: impl Into<PathBuf>, conformer: ConformerConfig) -> Self {
        Self {
            obabel: obabel.into(),
            conformer,
        }
    }

    /// Prepare one ligand, writing the minimized structure to `dest`.
    ///
    /// Returns `true` on success. All failures are logged and swallowed; the
    /// caller only needs the verdict to exclude the candidate from later
    /// stages.
    pub fn prepare(&self, smiles: &str, dest: &Path) -> bool {
        match self.try_prepare(smiles, dest) {
            Ok(()) => {
                println!("Minimized molecule saved as {}", dest.display());
                true
            }
            Err(err) => {
                log::warn!("ligand preparation failed for {smiles}: {err}");
                println!("Failed to prepare ligand for SMILES: {smiles}\n{err}");
                false
            }
        }
    }

    fn try_prepare(&self, smiles: &str, dest: &Path) -> Result<(), DockError> {
        smiles::validate(smiles)
            .map_err(|reason| DockError::InvalidSmiles(format!("{smiles} ({reason})")))?;

        self.embed(smiles, dest)?;
        self.minimize(dest)?;
        self.sanitize(dest)?;
        Ok(())
    }

    /// Generate one 3D conformer with explicit hydrogens.
    fn embed(&self, smiles: &str, dest: &Path) -> Result<(), DockError> {
        let output = Command::new(&self.obabel)
            .arg(format!("-:{smiles}"))
            .arg("-O")
            .arg(dest)
            .args(["--gen3d", "-h"])
            .output()
            .map_err(|e| DockError::tool("obabel", format!("failed to spawn: {e}")))?;

        if !output.status.success() {
            return Err(DockError::tool(
                "obabel",
                format!(
                    "3D embedding exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            ));
        }
        Ok(())
    }

    /// Force-field geometry optimization, capped at the configured step count.
    fn minimize(&self, dest: &Path) -> Result<(), DockError> {
        let output = Command::new(&self.obabel)
            .arg(dest)
            .arg("-O")
            .arg(dest)
            .args([
                "--minimize",
                "--ff",
                &self.conformer.forcefield,
                "--steps",
                &self.conformer.steps.to_string(),
            ])
            .output()
            .map_err(|e| DockError::tool("obabel", format!("failed to spawn: {e}")))?;

        if !output.status.success() {
            return Err(DockError::tool(
                "obabel",
                format!(
                    "energy minimization exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            ));
        }
        Ok(())
    }

    /// Read the produced structure back and require at least one atom record.
    fn sanitize(&self, dest: &Path) -> Result<(), DockError> {
        let content = std::fs::read_to_string(dest)?;
        if pdb::atom_record_count(&content) == 0 {
            return Err(DockError::Pdb(format!(
                "toolkit produced no atom records in {}",
                dest.display()
            )));
        }
        Ok(())
    }
}

/// Probe whether Open Babel is invocable (used for an early, clear failure).
pub fn check_obabel(obabel: &Path) -> bool {
    Command::new(obabel)
        .arg("-V")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_smiles_is_rejected_without_spawning() {
        // A preparer pointing at a nonexistent binary: validation must fail
        // first, so no spawn error surfaces.
        let preparer = LigandPreparer::new("/nonexistent/obabel", ConformerConfig::default());
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("ligand_1.pdb");
        assert!(!preparer.prepare("not-a-smiles", &dest));
        assert!(!dest.exists());
    }

    #[test]
    fn missing_toolkit_is_caught_not_propagated() {
        let preparer = LigandPreparer::new("/nonexistent/obabel", ConformerConfig::default());
        let dir = tempfile::tempdir().unwrap();
        // Valid SMILES, unreachable toolkit: still just a negative verdict.
        assert!(!preparer.prepare("CCO", &dir.path().join("ligand_1.pdb")));
    }

    #[test]
    fn sanitize_rejects_empty_output() {
        let preparer = LigandPreparer::new("obabel", ConformerConfig::default());
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("empty.pdb");
        std::fs::write(&dest, "REMARK no atoms here\n").unwrap();
        let err = preparer.sanitize(&dest).unwrap_err();
        assert!(err.to_string().contains("no atom records"));
    }
}
