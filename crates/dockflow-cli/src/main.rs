//! dockflow CLI entry point.
//!
//! `dockflow run` drives the full docking pipeline for a list of SMILES
//! against one receptor; `dockflow render` produces still images for an
//! already-completed run.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use dockflow_core::{DockConfig, RunLayout};
use dockflow_pipeline::{DockingPipeline, RunSummary};
use dockflow_report::Visualizer;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dockflow")]
#[command(version)]
#[command(about = "Molecular docking convenience pipeline", long_about = None)]
struct Cli {
    /// Config TOML file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dock a list of ligands against a receptor
    Run {
        /// Receptor accession identifier (e.g. 1HSG)
        #[arg(short, long)]
        receptor: String,

        /// SMILES strings, one per flag occurrence
        #[arg(short, long = "smiles")]
        smiles: Vec<String>,

        /// File with one SMILES per line (combined with --smiles)
        #[arg(long)]
        smiles_file: Option<PathBuf>,

        /// Output directory override
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Render images for an already-completed run
    Render {
        /// Run directory (defaults to the configured run dir)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Ligand index (1-based); renders every docked ligand when omitted
        #[arg(short, long)]
        index: Option<usize>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => DockConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DockConfig::default(),
    };

    match cli.command {
        Commands::Run {
            receptor,
            smiles,
            smiles_file,
            out,
        } => run(config, receptor, smiles, smiles_file, out),
        Commands::Render { dir, index } => render(config, dir, index),
    }
}

fn run(
    mut config: DockConfig,
    receptor: String,
    mut smiles: Vec<String>,
    smiles_file: Option<PathBuf>,
    out: Option<PathBuf>,
) -> Result<()> {
    if let Some(dir) = out {
        config.run.dir = dir;
    }
    if let Some(path) = smiles_file {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading SMILES file {}", path.display()))?;
        smiles.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#'))
                .map(str::to_string),
        );
    }
    if smiles.is_empty() {
        bail!("no ligands given; pass --smiles or --smiles-file");
    }

    let summary = DockingPipeline::new(config).run(&smiles, &receptor)?;
    println!(
        "\nDone: {}/{} ligands docked ({} errors). Results: {}",
        summary.docked_count,
        summary.input_count,
        summary.error_count,
        summary.results_file.display()
    );
    Ok(())
}

fn render(config: DockConfig, dir: Option<PathBuf>, index: Option<usize>) -> Result<()> {
    let dir = dir.unwrap_or(config.run.dir.clone());
    let summary = read_summary(&dir)?;
    let layout = RunLayout::new(&dir, &summary.receptor_id);
    let visualizer = Visualizer::new(layout.clone(), config.tools.pymol.clone())?;

    let indices: Vec<usize> = match index {
        Some(i) => vec![i],
        None => (1..=summary.input_count)
            .filter(|i| layout.ligand_out(*i).exists())
            .collect(),
    };
    if indices.is_empty() {
        bail!("no docked ligands found in {}", dir.display());
    }

    for i in indices {
        let pose = visualizer.render_pose(i)?;
        println!("Rendered {}", pose.display());
        if layout.best_pose(i).exists() {
            let aligned = visualizer.render_alignment(i)?;
            println!("Rendered {}", aligned.display());
        } else {
            log::warn!("no combined best pose for ligand {i}; skipping alignment render");
        }
    }
    Ok(())
}

fn read_summary(dir: &std::path::Path) -> Result<RunSummary> {
    // The summary carries the receptor id and ligand count for the run
    let path = dir.join("run_summary.json");
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("reading {}; run `dockflow run` first", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}
