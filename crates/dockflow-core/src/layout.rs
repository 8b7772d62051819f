//! Run-directory path layout.
//!
//! Every artifact of a run lives under one directory with fixed names; the
//! layout is the single authority for those names so the stages and the
//! visualizer never disagree on a path. Ligand indices are 1-based.

use std::path::{Path, PathBuf};

/// Computes artifact paths for one docking run.
#[derive(Debug, Clone)]
pub struct RunLayout {
    dir: PathBuf,
    receptor_id: String,
}

impl RunLayout {
    pub fn new(dir: impl Into<PathBuf>, receptor_id: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            receptor_id: receptor_id.into(),
        }
    }

    /// The run directory itself.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Receptor accession identifier for this run.
    pub fn receptor_id(&self) -> &str {
        &self.receptor_id
    }

    /// Minimized 3D ligand structure, `ligand_<i>.pdb`.
    pub fn ligand_pdb(&self, index: usize) -> PathBuf {
        self.dir.join(format!("ligand_{index}.pdb"))
    }

    /// Docking-format ligand, `ligand_<i>.pdbqt`.
    pub fn ligand_pdbqt(&self, index: usize) -> PathBuf {
        self.dir.join(format!("ligand_{index}.pdbqt"))
    }

    /// Docked poses written by the engine, `ligand_<i>_out.pdbqt`.
    pub fn ligand_out(&self, index: usize) -> PathBuf {
        self.dir.join(format!("ligand_{index}_out.pdbqt"))
    }

    /// Verbatim engine output for one ligand, `vina_log_<i>.txt`.
    pub fn vina_log(&self, index: usize) -> PathBuf {
        self.dir.join(format!("vina_log_{index}.txt"))
    }

    /// Raw downloaded receptor, `<id>_dirty.pdb`.
    pub fn receptor_dirty(&self) -> PathBuf {
        self.dir.join(format!("{}_dirty.pdb", self.receptor_id))
    }

    /// Heteroatom-stripped receptor, `<id>.pdb`.
    pub fn receptor_pdb(&self) -> PathBuf {
        self.dir.join(format!("{}.pdb", self.receptor_id))
    }

    /// Docking-format receptor, `<id>.pdbqt`.
    pub fn receptor_pdbqt(&self) -> PathBuf {
        self.dir.join(format!("{}.pdbqt", self.receptor_id))
    }

    /// Result table, `docking_results.txt`.
    pub fn results_file(&self) -> PathBuf {
        self.dir.join("docking_results.txt")
    }

    /// Intermediate PDB conversion of the top docked pose,
    /// `ligand_<i>_pose.pdb`. Removed once the combined structure is built.
    pub fn ligand_pose_pdb(&self, index: usize) -> PathBuf {
        self.dir.join(format!("ligand_{index}_pose.pdb"))
    }

    /// Combined receptor + best-pose structure, `<id>_ligand_<i>_best.pdb`.
    pub fn best_pose(&self, index: usize) -> PathBuf {
        self.dir
            .join(format!("{}_ligand_{index}_best.pdb", self.receptor_id))
    }

    /// Rendered still of the docked pose, `ligand_<i>_pose.png`.
    pub fn pose_png(&self, index: usize) -> PathBuf {
        self.dir.join(format!("ligand_{index}_pose.png"))
    }

    /// Rendered still of the best pose aligned onto the original receptor.
    pub fn aligned_png(&self, index: usize) -> PathBuf {
        self.dir.join(format!("ligand_{index}_aligned.png"))
    }

    /// End-of-run summary JSON.
    pub fn run_summary(&self) -> PathBuf {
        self.dir.join("run_summary.json")
    }
}
