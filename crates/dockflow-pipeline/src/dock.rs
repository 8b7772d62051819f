//! The docking driver: one AutoDock Vina invocation per ligand.
//!
//! Engine output is streamed live through the two-sink fan-out (console +
//! per-ligand log file), then the best score is recovered from the log.
//! Failure isolation is per-ligand: a non-zero engine exit is recorded as the
//! `Error` sentinel and the run moves on to the next candidate.

use crate::fanout::{stream_command, OutputFanout};
use crate::pocket::PocketCenter;
use dockflow_core::{BoxConfig, DockError, RunLayout};
use std::fs::File;
use std::path::PathBuf;
use std::process::Command;

/// Score sentinel for a successful dock with no recognizable results table.
pub const SCORE_NOT_AVAILABLE: &str = "N/A";
/// Score sentinel for a non-zero engine exit.
pub const SCORE_ERROR: &str = "Error";

/// Outcome of one per-ligand docking attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum DockOutcome {
    /// Engine succeeded and the ranked table yielded a best score
    Scored(String),
    /// Engine succeeded but no rank-1 row was found in its output
    NoScore,
    /// Engine exited non-zero; the candidate is recorded and skipped
    EngineFailed,
}

impl DockOutcome {
    /// The score field written to the result table.
    pub fn score_field(&self) -> &str {
        match self {
            DockOutcome::Scored(score) => score,
            DockOutcome::NoScore => SCORE_NOT_AVAILABLE,
            DockOutcome::EngineFailed => SCORE_ERROR,
        }
    }
}

/// Drives the external docking engine with a fixed search box.
#[derive(Debug, Clone)]
pub struct DockingEngine {
    vina: PathBuf,
    search_box: BoxConfig,
}

impl DockingEngine {
    pub fn new(vina: impl Into<PathBuf>, search_box: BoxConfig) -> Self {
        Self {
            vina: vina.into(),
            search_box,
        }
    }

    /// Dock one prepared ligand against the shared receptor and pocket.
    ///
    /// Streams combined engine output to the console and to the per-ligand
    /// log, then parses the best score from the log. Only infrastructure
    /// failures (spawn, log I/O) return `Err`; an engine failure is a normal
    /// [`DockOutcome::EngineFailed`].
    pub fn dock(
        &self,
        layout: &RunLayout,
        index: usize,
        center: PocketCenter,
    ) -> Result<DockOutcome, DockError> {
        let log_path = layout.vina_log(index);
        let log_file = File::create(&log_path)?;

        let mut fanout = OutputFanout::new();
        fanout.add_sink(Box::new(std::io::stdout()));
        fanout.add_sink(Box::new(log_file));

        let mut command = Command::new(&self.vina);
        command
            .arg("--receptor")
            .arg(layout.receptor_pdbqt())
            .arg("--ligand")
            .arg(layout.ligand_pdbqt(index))
            .arg("--out")
            .arg(layout.ligand_out(index))
            .args(["--center_x", &center.x.to_string()])
            .args(["--center_y", &center.y.to_string()])
            .args(["--center_z", &center.z.to_string()])
            .args(["--size_x", &self.search_box.size_x.to_string()])
            .args(["--size_y", &self.search_box.size_y.to_string()])
            .args(["--size_z", &self.search_box.size_z.to_string()]);

        let status = stream_command(&mut command, &mut fanout)
            .map_err(|e| DockError::tool("vina", format!("failed to run: {e}")))?;

        if !status.success() {
            log::warn!("vina exited with {status} for ligand {index}");
            return Ok(DockOutcome::EngineFailed);
        }

        // Score recovery re-reads the just-written log, same as the engine's
        // own users do, so the log stays the single source of truth.
        let log_content = std::fs::read_to_string(&log_path)?;
        Ok(match parse_best_score(&log_content) {
            Some(score) => DockOutcome::Scored(score),
            None => DockOutcome::NoScore,
        })
    }
}

/// Extract the best (rank-1) affinity from engine output.
///
/// The ranked-results table is located structurally: find the horizontal rule
/// that closes the table header, then take the first following row whose
/// leading token is the integer rank 1 and return its second field. Matching
/// on table structure rather than a literal line prefix keeps this robust
/// against indentation changes in the engine's output.
pub fn parse_best_score(log: &str) -> Option<String> {
    let mut lines = log.lines();

    // Table header rule: a run of dashes segmented by '+'
    lines.find(|line| {
        let t = line.trim();
        t.len() > 4 && t.contains('+') && t.chars().all(|c| c == '-' || c == '+')
    })?;

    for line in lines {
        let mut fields = line.split_whitespace();
        match fields.next().and_then(|tok| tok.parse::<i32>().ok()) {
            Some(1) => return fields.next().map(str::to_string),
            Some(_) => continue,
            // A non-numeric leading token means the table has ended
            None => break,
        }
    }
    None
}

/// Probe whether the docking engine is invocable.
pub fn check_vina(vina: &std::path::Path) -> bool {
    Command::new(vina)
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Trimmed-down transcript of a real Vina run.
    const VINA_LOG: &str = "\
AutoDock Vina v1.2.5
Computing Vina grid ... done.
Performing docking (random seed: -1717276062) ...
0%   10   20   30   40   50   60   70   80   90   100%
|----|----|----|----|----|----|----|----|----|----|
***************************************************

mode |   affinity | dist from best mode
     | (kcal/mol) | rmsd l.b.| rmsd u.b.
-----+------------+----------+----------
   1       -7.683          0          0
   2       -7.441      2.094      5.851
   3       -7.237      2.137      5.914
";

    #[test]
    fn finds_rank_one_score_structurally() {
        assert_eq!(parse_best_score(VINA_LOG), Some("-7.683".to_string()));
    }

    #[test]
    fn indentation_of_the_rank_column_does_not_matter() {
        let reindented = VINA_LOG.replace("   1   ", "1      ");
        assert_eq!(parse_best_score(&reindented), Some("-7.683".to_string()));
    }

    #[test]
    fn no_table_means_no_score() {
        let log = "AutoDock Vina v1.2.5\nWARNING: could not map ligand\n";
        assert_eq!(parse_best_score(log), None);
    }

    #[test]
    fn progress_bar_rule_is_not_mistaken_for_the_table() {
        // The |----|----| progress ruler contains dashes and pipes but no '+'
        let log = "\
0%   10   20   30   40   50%
|----|----|----|----|----|
1 is not a result row here
";
        assert_eq!(parse_best_score(log), None);
    }

    #[test]
    fn empty_table_yields_none() {
        let log = "\
mode |   affinity | dist from best mode
-----+------------+----------+----------
Writing output ... done.
";
        assert_eq!(parse_best_score(log), None);
    }

    #[test]
    fn outcome_score_fields_use_fixed_sentinels() {
        assert_eq!(DockOutcome::Scored("-7.5".into()).score_field(), "-7.5");
        assert_eq!(DockOutcome::NoScore.score_field(), "N/A");
        assert_eq!(DockOutcome::EngineFailed.score_field(), "Error");
    }
}
