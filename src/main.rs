use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use rl_plots::commands::compare::{CompareArgs, Group, StepSource};
use rl_plots::commands::errorbars::ErrorBarsArgs;
use rl_plots::commands::eval::EvalArgs;
use rl_plots::commands::experiments::ExperimentsArgs;
use rl_plots::commands::{compare, errorbars, eval, experiments, inspect};
use rl_plots::config::PlotConfig;
use rl_plots::constants::{axes, files, EVAL_RETURN_TAG, STEPS_TAG, TRAIN_RETURN_TAG};
use rl_plots::labels::ExperimentKind;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// `--x-tag` value that selects the event step instead of a scalar.
const EVENT_STEP: &str = "step";

#[derive(Parser)]
#[command(name = "rl_plots")]
#[command(about = "Learning curves and result charts from tensorboard logs", long_about = None)]
struct Cli {
    /// TOML file with chart settings.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Points on the common step axis of aggregated curves.
    #[arg(long, global = true)]
    sample_count: Option<usize>,

    /// More diagnostics on stderr (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mean ± std learning curves of several algorithms over their seeds.
    Compare {
        #[arg(long, default_value = files::LOG_DIR)]
        logdir: PathBuf,

        #[arg(short, long, default_value = files::COMPARE_OUTPUT)]
        output: PathBuf,

        /// LABEL=PREFIX, repeatable. Seed directories are <PREFIX><seed>*.
        #[arg(short, long = "group", default_values = ["DQN=q1_dqn_", "Double DQN=q1_doubledqn_"])]
        groups: Vec<Group>,

        #[arg(short, long, value_delimiter = ',', default_value = "1,2,3")]
        seeds: Vec<u32>,

        /// Scalar used as the step axis, or "step" for the event step.
        #[arg(long, default_value = STEPS_TAG)]
        x_tag: String,

        #[arg(long, default_value = TRAIN_RETURN_TAG)]
        y_tag: String,

        #[arg(short, long, default_value = "DQN vs Double DQN on LunarLander-v3")]
        title: String,

        #[arg(long, default_value = axes::TIMESTEPS)]
        x_label: String,

        #[arg(long, default_value = axes::EVAL_AVERAGE_RETURN)]
        y_label: String,

        /// Last step of the common axis. Defaults to where the shortest run ends.
        #[arg(long)]
        max_step: Option<f64>,
    },
    /// One line per experiment directory, labelled by experiment kind.
    Experiments {
        dir: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(short, long)]
        title: String,

        #[arg(short, long, value_enum, default_value_t = ExperimentKind::General)]
        kind: ExperimentKind,

        #[arg(long, default_value = EVAL_RETURN_TAG)]
        scalar: String,

        #[arg(long, default_value = axes::ITERATION)]
        x_label: String,

        #[arg(long, default_value = axes::AVERAGE_RETURN)]
        y_label: String,
    },
    /// Eval_AverageReturn of one or more experiments, with an optional target.
    Eval {
        #[arg(required = true)]
        dirs: Vec<PathBuf>,

        #[arg(short, long, num_args = 1..)]
        labels: Vec<String>,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Return the agent is expected to reach, drawn as a dashed line.
        #[arg(long)]
        target: Option<f64>,
    },
    /// Error-bar panels from a TOML results file.
    Errorbars {
        results: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },
    /// Scalar tags in an event file, or in the first event file of a directory.
    Inspect { path: PathBuf },
}

fn init_logging(verbose: u8) -> Result<()> {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow!(e))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let mut config = PlotConfig::load_or_default(cli.config.as_deref())
        .context("failed to load chart settings")?;
    if let Some(sample_count) = cli.sample_count {
        config.sample_count = sample_count;
    }
    debug!(?config, "chart settings");

    match cli.command {
        Commands::Compare {
            logdir,
            output,
            groups,
            seeds,
            x_tag,
            y_tag,
            title,
            x_label,
            y_label,
            max_step,
        } => {
            let steps = if x_tag == EVENT_STEP {
                StepSource::EventStep
            } else {
                StepSource::Scalar(x_tag)
            };
            compare::run(
                &CompareArgs {
                    logdir,
                    output,
                    groups,
                    seeds,
                    steps,
                    value_tag: y_tag,
                    title,
                    x_label,
                    y_label,
                    max_step,
                },
                &config,
            )?;
        }
        Commands::Experiments {
            dir,
            output,
            title,
            kind,
            scalar,
            x_label,
            y_label,
        } => {
            experiments::run(
                &ExperimentsArgs {
                    dir,
                    output,
                    title,
                    kind,
                    scalar,
                    x_label,
                    y_label,
                },
                &config,
            )?;
        }
        Commands::Eval {
            dirs,
            labels,
            title,
            output,
            target,
        } => {
            eval::run(
                &EvalArgs {
                    dirs,
                    labels,
                    title,
                    output,
                    target,
                },
                &config,
            )?;
        }
        Commands::Errorbars { results, output } => {
            errorbars::run(&ErrorBarsArgs { results, output }, &config)?;
        }
        Commands::Inspect { path } => inspect::run(&path)?,
    }

    println!("{}", "Done".green());
    Ok(())
}
