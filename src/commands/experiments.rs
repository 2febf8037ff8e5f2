use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use colored::Colorize;
use tracing::{info, warn};

use crate::charts::{self, LineChart};
use crate::config::PlotConfig;
use crate::discovery::{experiment_dirs, find_event_file};
use crate::event_log::ScalarLog;
use crate::labels::ExperimentKind;
use crate::types::Run;

#[derive(Debug, Clone)]
pub struct ExperimentsArgs {
    /// Holds one subdirectory per experiment.
    pub dir: PathBuf,
    pub output: PathBuf,
    pub title: String,
    pub kind: ExperimentKind,
    pub scalar: String,
    pub x_label: String,
    pub y_label: String,
}

/// Labelled runs for every experiment under `dir` that has data for `scalar`.
///
/// Experiments without an event file, without the scalar, or whose event file
/// cannot be read are left out with a warning.
pub fn collect_runs(dir: &Path, kind: ExperimentKind, scalar: &str) -> Result<Vec<(String, Run)>> {
    let mut runs = Vec::new();

    for exp_dir in experiment_dirs(dir)? {
        let name = exp_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let Some(event_file) = find_event_file(&exp_dir)? else {
            warn!("no events file found in {}", exp_dir.display());
            continue;
        };

        let run = match ScalarLog::open(&event_file).and_then(|log| log.run(scalar)) {
            Ok(run) if !run.is_empty() => run,
            Ok(_) => {
                warn!("no data found for {name}");
                continue;
            }
            Err(err) => {
                warn!("skipping {name}: {err}");
                continue;
            }
        };

        info!("{name}: {} points", run.len());
        runs.push((kind.label(&name), run));
    }

    Ok(runs)
}

pub fn run(args: &ExperimentsArgs, config: &PlotConfig) -> Result<()> {
    let runs = collect_runs(&args.dir, args.kind, &args.scalar)?;
    if runs.is_empty() {
        bail!("no experiment in {} has '{}' data", args.dir.display(), args.scalar);
    }

    let chart = LineChart {
        title: &args.title,
        x_label: &args.x_label,
        y_label: &args.y_label,
        series: runs.iter().map(|(label, run)| (label.as_str(), run)).collect(),
        markers: false,
        target: None,
    };
    charts::render(&chart, &args.output, config)
        .map_err(|e| anyhow::anyhow!(e))
        .with_context(|| format!("failed to draw {}", args.output.display()))?;

    println!("{} {}", "Plot saved to".green(), args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::event_log::testing::write_event_file;

    fn experiment(root: &Path, name: &str, scalars: &[(i64, &str, f32)]) {
        let dir = root.join(name);
        fs::create_dir(&dir).unwrap();
        write_event_file(&dir.join("events.out.tfevents.1.host"), scalars);
    }

    #[test]
    fn labels_every_experiment_with_data() {
        let root = tempfile::tempdir().unwrap();
        experiment(
            root.path(),
            "q1_sb_rtg_na_CartPole-v0",
            &[(0, "Eval_AverageReturn", 20.), (1, "Eval_AverageReturn", 45.)],
        );
        experiment(
            root.path(),
            "q1_sb_no_rtg_dsa_CartPole-v0",
            &[(0, "Eval_AverageReturn", 10.)],
        );

        let runs = collect_runs(root.path(), ExperimentKind::CartPole, "Eval_AverageReturn").unwrap();

        // sorted by directory name
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].0, "No RTG, DSA");
        assert_eq!(runs[1].0, "RTG, No DSA");
        assert_eq!(runs[1].1.points(), &[(0., 20.), (1., 45.)]);
    }

    #[test]
    fn skips_experiments_without_data() {
        let root = tempfile::tempdir().unwrap();
        experiment(root.path(), "has_data", &[(0, "Eval_AverageReturn", 1.)]);
        experiment(root.path(), "other_scalar", &[(0, "Train_AverageReturn", 1.)]);
        fs::create_dir(root.path().join("no_events")).unwrap();
        fs::write(root.path().join("stray.txt"), b"not an experiment").unwrap();

        let runs = collect_runs(root.path(), ExperimentKind::General, "Eval_AverageReturn").unwrap();

        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].0, "has_data");
    }

    #[test]
    fn corrupt_event_files_are_skipped() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("broken");
        fs::create_dir(&dir).unwrap();
        let mut bytes = 8u64.to_le_bytes().to_vec();
        bytes.extend([0u8; 4]);
        bytes.extend([1u8; 12]);
        fs::write(dir.join("events.out.tfevents.1.host"), bytes).unwrap();

        let runs = collect_runs(root.path(), ExperimentKind::General, "Eval_AverageReturn").unwrap();

        assert!(runs.is_empty());
    }
}
