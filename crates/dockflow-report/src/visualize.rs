//! Headless PyMOL rendering of docking results.
//!
//! Two independent renders per docked ligand, each from a freshly built
//! scene: a still of the docked pose against the converted receptor, and a
//! still of the combined best-pose structure superimposed onto the original
//! unfiltered receptor. No alignment quality metric is captured; the image is
//! the only product.

use crate::scene::RenderScene;
use crate::{find_pymol, pymol_install_instructions};
use anyhow::{bail, Context, Result};
use dockflow_core::RunLayout;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Renders still images for docked ligands via `pymol -cq`.
pub struct Visualizer {
    pymol: PathBuf,
    layout: RunLayout,
}

impl Visualizer {
    /// Build a visualizer, discovering PyMOL on PATH unless overridden.
    pub fn new(layout: RunLayout, pymol_override: Option<PathBuf>) -> Result<Self> {
        let pymol = match pymol_override {
            Some(path) => path,
            None => find_pymol()
                .with_context(|| format!("PyMOL not found.\n{}", pymol_install_instructions()))?,
        };
        Ok(Self { pymol, layout })
    }

    /// Render the docked pose still, `ligand_<i>_pose.png`.
    pub fn render_pose(&self, index: usize) -> Result<PathBuf> {
        let mut scene = RenderScene::new();
        scene
            .load(&self.layout.receptor_pdbqt(), "receptor")
            .load(&self.layout.ligand_out(index), "docked_ligand")
            .show_cartoon("receptor")
            .show_sticks("docked_ligand")
            .color("gray70", "receptor")
            .color("cyan", "docked_ligand")
            .orient("docked_ligand")
            .render_png(&self.layout.pose_png(index));

        self.run_scene(&scene, index, "pose")?;
        Ok(self.layout.pose_png(index))
    }

    /// Render the alignment still, `ligand_<i>_aligned.png`: the combined
    /// best-pose structure superimposed onto the original dirty receptor.
    pub fn render_alignment(&self, index: usize) -> Result<PathBuf> {
        let mut scene = RenderScene::new();
        scene
            .load(&self.layout.best_pose(index), "best_pose")
            .load(&self.layout.receptor_dirty(), "original")
            .show_cartoon("original")
            .show_sticks("best_pose")
            .color("wheat", "original")
            .color("marine", "best_pose")
            .align("best_pose", "original")
            .orient("best_pose")
            .render_png(&self.layout.aligned_png(index));

        self.run_scene(&scene, index, "aligned")?;
        Ok(self.layout.aligned_png(index))
    }

    fn run_scene(&self, scene: &RenderScene, index: usize, kind: &str) -> Result<()> {
        let script_path = self
            .layout
            .dir()
            .join(format!("render_{index}_{kind}.pml"));
        fs::write(&script_path, scene.to_script())
            .with_context(|| format!("writing render script {}", script_path.display()))?;

        let status = Command::new(&self.pymol)
            .arg("-cq")
            .arg(&script_path)
            .status()
            .with_context(|| format!("failed to run PyMOL: {}", self.pymol.display()))?;

        if !status.success() {
            bail!(
                "PyMOL exited with {status}. Check {} for issues.",
                script_path.display()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlaunchable_pymol_surfaces_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let layout = RunLayout::new(dir.path(), "1HSG");
        let vis = Visualizer::new(layout.clone(), Some(PathBuf::from("/nonexistent/pymol")))
            .unwrap();
        let err = vis.render_pose(1).unwrap_err();
        assert!(err.to_string().contains("failed to run PyMOL"));
        // The script is still written before the launch attempt
        assert!(layout.dir().join("render_1_pose.pml").exists());
    }

    #[test]
    fn pose_and_alignment_use_distinct_outputs() {
        let layout = RunLayout::new("run", "1HSG");
        assert_ne!(layout.pose_png(1), layout.aligned_png(1));
    }
}
