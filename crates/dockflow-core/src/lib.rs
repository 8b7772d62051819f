//! # dockflow-core
//!
//! Shared foundation for the dockflow docking pipeline: the unified error
//! type, TOML run configuration, the run-directory path layout, and
//! lightweight text-level PDB handling.

pub mod config;
pub mod errors;
pub mod layout;
pub mod pdb;

pub use config::{BoxConfig, ConformerConfig, DockConfig, ToolsConfig};
pub use errors::DockError;
pub use layout::RunLayout;
