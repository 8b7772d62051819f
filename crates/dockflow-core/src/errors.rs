//! Error types for dockflow.

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for all dockflow operations.
///
/// The pipeline deliberately mixes three propagation policies (skip, abort,
/// record); this type covers the abort cases plus the causes that stages
/// catch and downgrade locally.
#[derive(Error, Debug)]
pub enum DockError {
    /// Remote structure fetch failures (network, HTTP status)
    #[error("Failed to fetch structure '{id}': {message}")]
    Fetch { id: String, message: String },

    /// A SMILES string that does not lex as a molecular graph
    #[error("Invalid SMILES string: {0}")]
    InvalidSmiles(String),

    /// An external tool exited non-zero or could not be spawned
    #[error("{tool} failed: {message}")]
    Tool { tool: String, message: String },

    /// A required external tool binary is absent
    #[error("{tool} not found at {path}")]
    ToolMissing { tool: String, path: PathBuf },

    /// Pocket prediction output that cannot be interpreted
    #[error("Pocket prediction parse error: {0}")]
    PocketParse(String),

    /// PDB content that fails structural sanity checks
    #[error("PDB error: {0}")]
    Pdb(String),

    /// Configuration loading / validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors (file reading, log writing, directory creation)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors (run summary JSON)
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DockError {
    /// Creates a tool-invocation error.
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        DockError::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Creates a fetch error.
    pub fn fetch(id: impl Into<String>, message: impl Into<String>) -> Self {
        DockError::Fetch {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        DockError::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_error_names_the_tool() {
        let err = DockError::tool("vina", "exit status 1");
        assert_eq!(err.to_string(), "vina failed: exit status 1");
    }

    #[test]
    fn missing_tool_reports_path() {
        let err = DockError::ToolMissing {
            tool: "prank".into(),
            path: PathBuf::from("p2rank_2.4.2/prank"),
        };
        assert!(err.to_string().contains("p2rank_2.4.2/prank"));
    }
}
