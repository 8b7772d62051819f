//! PDB to PDBQT conversion via Open Babel.
//!
//! Receptor and ligand conversions carry different flag sets. Unlike ligand
//! preparation, a conversion failure is fatal and propagates; there is
//! intentionally no per-ligand skip path here.

use dockflow_core::DockError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Role-specific obabel invocation for docking-format conversion.
#[derive(Debug, Clone)]
pub struct FormatConverter {
    obabel: PathBuf,
}

impl FormatConverter {
    pub fn new(obabel: impl Into<PathBuf>) -> Self {
        Self {
            obabel: obabel.into(),
        }
    }

    /// Receptor conversion: rigid output (`-xr`), no name annotations
    /// (`-xn`), no automatic hydrogen/charge assignment (`-xp`).
    pub fn convert_receptor(&self, input: &Path, output: &Path) -> Result<(), DockError> {
        self.run(input, output, &["-xr", "-xn", "-xp"])
    }

    /// Ligand conversion: explicit hydrogen addition (`-h`).
    pub fn convert_ligand(&self, input: &Path, output: &Path) -> Result<(), DockError> {
        self.run(input, output, &["-h"])
    }

    fn run(&self, input: &Path, output: &Path, extra: &[&str]) -> Result<(), DockError> {
        let status = Command::new(&self.obabel)
            .args(["-i", "pdb"])
            .arg(input)
            .args(["-o", "pdbqt", "-O"])
            .arg(output)
            .args(extra)
            .status()
            .map_err(|e| DockError::tool("obabel", format!("failed to spawn: {e}")))?;

        if !status.success() {
            return Err(DockError::tool(
                "obabel",
                format!(
                    "conversion of {} exited with {status}",
                    input.display()
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_failure_propagates_as_tool_error() {
        let converter = FormatConverter::new("/nonexistent/obabel");
        let err = converter
            .convert_receptor(Path::new("in.pdb"), Path::new("out.pdbqt"))
            .unwrap_err();
        assert!(matches!(err, DockError::Tool { .. }));
        assert!(err.to_string().contains("obabel"));
    }
}
