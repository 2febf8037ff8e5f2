use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use colored::Colorize;

use crate::charts::{self, LineChart};
use crate::config::PlotConfig;
use crate::constants::{axes, files, EVAL_COMPARISON_TITLE, EVAL_RETURN_TAG};
use crate::discovery::find_event_file;
use crate::event_log::ScalarLog;
use crate::types::Run;

#[derive(Debug, Clone, Default)]
pub struct EvalArgs {
    pub dirs: Vec<PathBuf>,
    pub labels: Vec<String>,
    pub title: Option<String>,
    pub output: Option<PathBuf>,
    pub target: Option<f64>,
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

/// `Eval_AverageReturn` by iteration for one experiment directory.
pub fn eval_returns(dir: &Path) -> Result<Run> {
    let event_file = find_event_file(dir)?
        .ok_or_else(|| anyhow!("no event file found in {}", dir.display()))?;
    let log = ScalarLog::open(&event_file)?;
    Ok(log.run(EVAL_RETURN_TAG)?)
}

/// Custom labels apply in order; directories past the end use their name.
pub fn labelled_runs(args: &EvalArgs) -> Result<Vec<(String, Run)>> {
    args.dirs
        .iter()
        .enumerate()
        .map(|(i, dir)| {
            let label = args.labels.get(i).cloned().unwrap_or_else(|| dir_name(dir));
            let run = eval_returns(dir).with_context(|| format!("failed to read {}", dir.display()))?;
            Ok((label, run))
        })
        .collect()
}

/// Where the chart goes: inside the directory when there is only one, plus
/// `--output` when given.
pub fn output_paths(args: &EvalArgs) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    if let [dir] = args.dirs.as_slice() {
        paths.push(dir.join(files::EVAL_OUTPUT_STEM).with_extension("svg"));
    }
    paths.extend(args.output.clone());
    if paths.is_empty() {
        bail!("--output is required when comparing several experiments");
    }
    Ok(paths)
}

pub fn default_title(dirs: &[PathBuf]) -> String {
    match dirs {
        [dir] => dir_name(dir),
        _ => EVAL_COMPARISON_TITLE.to_string(),
    }
}

pub fn run(args: &EvalArgs, config: &PlotConfig) -> Result<()> {
    let paths = output_paths(args)?;
    let runs = labelled_runs(args)?;

    for (label, run) in &runs {
        let values: Vec<String> = run.values().map(|v| format!("{v:.2}")).collect();
        println!("\n{}:", label.bold());
        println!("  {}: [{}]", EVAL_RETURN_TAG, values.join(", "));
    }

    let title = args.title.clone().unwrap_or_else(|| default_title(&args.dirs));
    let chart = LineChart {
        title: &title,
        x_label: axes::ITERATION,
        y_label: axes::EVAL_RETURN,
        series: runs.iter().map(|(label, run)| (label.as_str(), run)).collect(),
        markers: true,
        target: args.target,
    };

    for path in &paths {
        charts::render(&chart, path, config)
            .map_err(|e| anyhow!(e))
            .with_context(|| format!("failed to draw {}", path.display()))?;
        println!("{} {}", "Plot saved to:".green(), path.display());
    }
    Ok(())
}
