//! The run orchestrator: sequences the pipeline stages for one receptor and
//! a list of ligand candidates.
//!
//! Stage order and failure policy follow the pipeline contract: ligand
//! preparation failures skip the candidate, receptor/pocket/conversion
//! failures abort the run, docking-engine failures are recorded per ligand
//! and the run continues. Everything is synchronous and sequential; exactly
//! one external process runs at a time.

use crate::convert::FormatConverter;
use crate::dock::{DockingEngine, DockOutcome, SCORE_NOT_AVAILABLE};
use crate::ligand::LigandPreparer;
use crate::pocket::{PocketCenter, PocketLocator};
use crate::pose::BestPoseBuilder;
use crate::receptor::ReceptorPreparer;
use dockflow_core::{DockConfig, DockError, RunLayout};
use dockflow_report::ResultsWriter;
use serde::{Deserialize, Serialize};

/// One ligand candidate tracked through the run.
#[derive(Debug, Clone)]
struct Candidate {
    smiles: String,
    /// 1-based ordinal, also the index in every artifact filename
    index: usize,
    valid: bool,
}

/// End-of-run accounting, also serialized to `run_summary.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub receptor_id: String,
    pub input_count: usize,
    pub valid_count: usize,
    pub docked_count: usize,
    pub error_count: usize,
    pub pocket_center: PocketCenter,
    pub results_file: std::path::PathBuf,
}

/// Sequences a complete docking run.
pub struct DockingPipeline {
    config: DockConfig,
}

impl DockingPipeline {
    pub fn new(config: DockConfig) -> Self {
        Self { config }
    }

    /// Run the full pipeline for `smiles_list` against receptor `receptor_id`.
    ///
    /// Produces exactly one result row per input SMILES, in input order.
    pub fn run(&self, smiles_list: &[String], receptor_id: &str) -> Result<RunSummary, DockError> {
        let layout = RunLayout::new(&self.config.run.dir, receptor_id);
        std::fs::create_dir_all(layout.dir())?;

        // Probe the always-required tools up front so a bad environment
        // fails before any artifacts are written.
        if !crate::ligand::check_obabel(&self.config.tools.obabel) {
            return Err(DockError::ToolMissing {
                tool: "obabel".to_string(),
                path: self.config.tools.obabel.clone(),
            });
        }
        if !crate::dock::check_vina(&self.config.tools.vina) {
            return Err(DockError::ToolMissing {
                tool: "vina".to_string(),
                path: self.config.tools.vina.clone(),
            });
        }

        println!("Receptor Name: {receptor_id}");
        println!("Number of ligands: {}", smiles_list.len());

        // Ligand preparation: recoverable per candidate
        let preparer =
            LigandPreparer::new(&self.config.tools.obabel, self.config.conformer.clone());
        let mut candidates: Vec<Candidate> = Vec::with_capacity(smiles_list.len());
        for (i, smiles) in smiles_list.iter().enumerate() {
            let index = i + 1;
            let valid = preparer.prepare(smiles, &layout.ligand_pdb(index));
            if !valid {
                println!("Skipping invalid SMILES: {smiles}");
            }
            candidates.push(Candidate {
                smiles: smiles.clone(),
                index,
                valid,
            });
        }
        let valid_count = candidates.iter().filter(|c| c.valid).count();
        println!("Number of valid SMILES processed: {valid_count}");

        // Receptor fetch + cleanup: fatal on failure
        ReceptorPreparer::new().prepare(&layout)?;

        // Pocket prediction: fatal on failure, top-ranked pocket only
        let locator = PocketLocator::new(&self.config.tools.prank_root);
        let center = locator.locate(&layout)?;
        log::info!(
            "pocket center for {receptor_id}: ({:.3}, {:.3}, {:.3})",
            center.x,
            center.y,
            center.z
        );

        // Receptor conversion: fatal on failure
        let converter = FormatConverter::new(&self.config.tools.obabel);
        println!("Converting receptor to PDBQT format...");
        converter.convert_receptor(&layout.receptor_pdb(), &layout.receptor_pdbqt())?;
        println!("Receptor conversion complete.");

        let engine =
            DockingEngine::new(&self.config.tools.vina, self.config.search_box.clone());
        let pose_builder = BestPoseBuilder::new(&self.config.tools.obabel);
        let mut results = ResultsWriter::create(&layout.results_file())?;

        let mut docked_count = 0;
        let mut error_count = 0;

        for candidate in &candidates {
            println!(
                "\nProcessing ligand {} of {}",
                candidate.index,
                candidates.len()
            );
            println!("SMILES: {}", candidate.smiles);

            if !candidate.valid {
                // Preparation already failed and was reported; the candidate
                // still gets its row so the table stays one-per-input.
                results.record(&candidate.smiles, SCORE_NOT_AVAILABLE)?;
                continue;
            }

            // Ligand conversion: fatal on failure, no per-ligand skip here
            println!("Converting ligand to PDBQT format...");
            converter.convert_ligand(
                &layout.ligand_pdb(candidate.index),
                &layout.ligand_pdbqt(candidate.index),
            )?;
            println!("Ligand conversion complete.");

            println!("Starting Vina docking...");
            let outcome = engine.dock(&layout, candidate.index, center)?;

            match &outcome {
                DockOutcome::Scored(score) => {
                    docked_count += 1;
                    println!("Vina docking completed successfully.");
                    println!("Best docking score: {score}");
                }
                DockOutcome::NoScore => {
                    docked_count += 1;
                    println!("Vina docking completed successfully.");
                    println!("Best docking score: {SCORE_NOT_AVAILABLE}");
                }
                DockOutcome::EngineFailed => {
                    error_count += 1;
                    println!(
                        "Error running Vina for ligand {}. Check the log file for details.",
                        candidate.index
                    );
                }
            }

            results.record(&candidate.smiles, outcome.score_field())?;

            if !matches!(outcome, DockOutcome::EngineFailed) {
                match pose_builder.build(&layout, candidate.index) {
                    Ok(path) => log::info!("combined best pose written: {}", path.display()),
                    Err(err) => log::warn!(
                        "could not build best pose for ligand {}: {err}",
                        candidate.index
                    ),
                }
                println!(
                    "Docking output saved as {}",
                    layout.ligand_out(candidate.index).display()
                );
            }
        }

        let summary = RunSummary {
            receptor_id: receptor_id.to_string(),
            input_count: candidates.len(),
            valid_count,
            docked_count,
            error_count,
            pocket_center: center,
            results_file: layout.results_file(),
        };
        let json = serde_json::to_string_pretty(&summary)?;
        std::fs::write(layout.run_summary(), json)?;

        Ok(summary)
    }
}
