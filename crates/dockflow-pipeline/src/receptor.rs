//! Receptor preparation: fetch by accession id, strip heteroatom records.
//!
//! The fetch pulls the legacy PDB text format from the RCSB download service.
//! A fetch failure is fatal for the run; there is no retry. The cleanup step
//! is a pure text filter over record names, not a structural edit.

use dockflow_core::{pdb, DockError, RunLayout};
use std::fs;

const RCSB_DOWNLOAD_URL: &str = "https://files.rcsb.org/download/";

/// Fetches and cleans the receptor structure for a run.
pub struct ReceptorPreparer {
    client: reqwest::blocking::Client,
}

impl ReceptorPreparer {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Download `<id>.pdb`, store it as the dirty receptor, then write the
    /// heteroatom-stripped copy. Creates the run directory if absent.
    pub fn prepare(&self, layout: &RunLayout) -> Result<(), DockError> {
        fs::create_dir_all(layout.dir())?;

        // An already-downloaded structure is reused; the file is immutable
        // once fetched and the id names it unambiguously.
        let dirty = layout.receptor_dirty();
        let raw = if dirty.is_file() {
            log::info!("reusing previously fetched receptor {}", dirty.display());
            fs::read_to_string(&dirty)?
        } else {
            let raw = self.fetch(layout.receptor_id())?;
            fs::write(&dirty, &raw)?;
            log::info!(
                "fetched receptor {} ({} bytes) -> {}",
                layout.receptor_id(),
                raw.len(),
                dirty.display()
            );
            raw
        };

        let cleaned = pdb::strip_hetatm(&raw);
        fs::write(layout.receptor_pdb(), cleaned)?;
        Ok(())
    }

    fn fetch(&self, id: &str) -> Result<String, DockError> {
        let url = format!("{RCSB_DOWNLOAD_URL}{}.pdb", id.to_uppercase());
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| DockError::fetch(id, e.to_string()))?;

        if !response.status().is_success() {
            return Err(DockError::fetch(
                id,
                format!("HTTP {} from {url}", response.status()),
            ));
        }
        response.text().map_err(|e| DockError::fetch(id, e.to_string()))
    }
}

impl Default for ReceptorPreparer {
    fn default() -> Self {
        Self::new()
    }
}
