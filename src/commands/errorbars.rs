use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use tracing::info;

use crate::charts::{self, ErrorBarChart};
use crate::config::PlotConfig;
use crate::results::ResultsFile;

#[derive(Debug, Clone)]
pub struct ErrorBarsArgs {
    pub results: PathBuf,
    pub output: PathBuf,
}

pub fn run(args: &ErrorBarsArgs, config: &PlotConfig) -> Result<()> {
    let results = ResultsFile::load(&args.results)
        .with_context(|| format!("failed to load results from {}", args.results.display()))?;
    info!(
        panels = results.panels.len(),
        "loaded {}",
        args.results.display()
    );

    charts::render(&ErrorBarChart { results: &results }, &args.output, config)
        .map_err(|e| anyhow!(e))
        .with_context(|| format!("failed to draw {}", args.output.display()))?;
    println!("{} {}", "Plot saved to".green(), args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_demos_parse() {
        let demos = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos");
        for name in ["dagger.toml", "learning_rate_sweep.toml"] {
            let file = ResultsFile::load(&demos.join(name)).unwrap();
            assert!(!file.panels.is_empty(), "{name}");
        }
    }

    #[test]
    fn unreadable_results_fail_before_drawing() {
        let dir = tempfile::tempdir().unwrap();
        let args = ErrorBarsArgs {
            results: dir.path().join("missing.toml"),
            output: dir.path().join("out.png"),
        };

        let err = run(&args, &PlotConfig::default()).unwrap_err();

        assert!(err.to_string().contains("failed to load results"));
        assert!(!args.output.exists());
    }
}
