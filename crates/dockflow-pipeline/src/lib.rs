//! # dockflow-pipeline
//!
//! Stage implementations for the docking convenience pipeline: ligand
//! conformer preparation, receptor fetch and cleanup, binding-pocket
//! location, docking-format conversion, the per-ligand docking driver, and
//! the orchestrator that sequences them.
//!
//! Every computationally hard step is delegated to an external tool (Open
//! Babel, p2rank, AutoDock Vina); this crate owns the sequencing, file-path
//! bookkeeping, subprocess invocation, and the narrow parsers over tool
//! output.

pub mod convert;
pub mod dock;
pub mod fanout;
pub mod ligand;
pub mod orchestrator;
pub mod pocket;
pub mod pose;
pub mod receptor;
pub mod smiles;

pub use convert::FormatConverter;
pub use dock::{DockOutcome, DockingEngine};
pub use fanout::OutputFanout;
pub use ligand::LigandPreparer;
pub use orchestrator::{DockingPipeline, RunSummary};
pub use pocket::{PocketCenter, PocketLocator};
pub use receptor::ReceptorPreparer;
