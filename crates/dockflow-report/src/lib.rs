//! # dockflow-report
//!
//! Durable run records and optional visualization: the streaming result-table
//! writer, and headless PyMOL rendering of docked poses driven by an explicit
//! scene object.

pub mod results;
pub mod scene;
pub mod visualize;

pub use results::ResultsWriter;
pub use scene::RenderScene;
pub use visualize::Visualizer;

/// Locate the PyMOL binary on PATH.
pub fn find_pymol() -> Option<std::path::PathBuf> {
    which::which("pymol").ok()
}

/// Human-oriented install pointers for a missing renderer.
pub fn pymol_install_instructions() -> &'static str {
    r#"PyMOL is required for rendering docked poses.

Installation options:
  Ubuntu/Debian: sudo apt install pymol
  macOS:         brew install pymol
  Conda:         conda install -c conda-forge pymol-open-source

Or download from: https://pymol.org/"#
}
