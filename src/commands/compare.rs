//! Several algorithms, several seeds each: one mean ± std learning curve per
//! algorithm.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use tracing::{info, warn};

use crate::aggregate::aggregate;
use crate::charts::{self, BandChart};
use crate::config::PlotConfig;
use crate::discovery::{find_event_file, find_experiment_dir};
use crate::event_log::ScalarLog;
use crate::types::{AggregatedCurve, RunSet};

/// `LABEL=PREFIX`: seeds live in directories named `<PREFIX><seed>*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub label: String,
    pub prefix: String,
}

impl FromStr for Group {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (label, prefix) = s
            .split_once('=')
            .ok_or_else(|| format!("expected LABEL=PREFIX, got '{s}'"))?;
        if label.trim().is_empty() || prefix.trim().is_empty() {
            return Err(format!("expected LABEL=PREFIX, got '{s}'"));
        }
        Ok(Group {
            label: label.trim().to_string(),
            prefix: prefix.trim().to_string(),
        })
    }
}

/// Where the step axis comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepSource {
    /// The step recorded with each event.
    EventStep,
    /// The values of another scalar, such as environment steps so far.
    Scalar(String),
}

#[derive(Debug, Clone)]
pub struct CompareArgs {
    pub logdir: PathBuf,
    pub output: PathBuf,
    pub groups: Vec<Group>,
    pub seeds: Vec<u32>,
    pub steps: StepSource,
    pub value_tag: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub max_step: Option<f64>,
}

/// Reads every seed of `group` that can be found. Missing directories, missing
/// tags and event files that are absent or unreadable are skipped with a warning.
pub fn load_group(
    logdir: &Path,
    group: &Group,
    seeds: &[u32],
    steps: &StepSource,
    value_tag: &str,
) -> Result<RunSet<u32>> {
    let mut runs = RunSet::new();

    for seed in seeds {
        let exp_name = format!("{}{seed}", group.prefix);
        let Some(exp_dir) = find_experiment_dir(logdir, &exp_name)? else {
            warn!("no directories found matching {}*", logdir.join(&exp_name).display());
            continue;
        };
        let Some(event_file) = find_event_file(&exp_dir)? else {
            warn!("no event files found in {}", exp_dir.display());
            continue;
        };

        info!("reading {exp_name} from {}", event_file.display());
        let run = ScalarLog::open(&event_file).and_then(|log| match steps {
            StepSource::EventStep => log.run(value_tag),
            StepSource::Scalar(step_tag) => log.paired_run(step_tag, value_tag),
        });
        match run {
            Ok(run) => {
                runs.insert(*seed, run);
            }
            Err(err) => warn!("skipping {exp_name}: {err}"),
        }
    }

    Ok(runs)
}

/// One aggregated curve per group that has data, in group order.
pub fn collect_curves(args: &CompareArgs, config: &PlotConfig) -> Result<Vec<(String, AggregatedCurve)>> {
    let mut curves = Vec::with_capacity(args.groups.len());

    for group in &args.groups {
        info!("processing {} results", group.label);
        let runs = load_group(&args.logdir, group, &args.seeds, &args.steps, &args.value_tag)?;
        let curve = aggregate(&runs, config.sample_count, args.max_step)
            .with_context(|| format!("failed to aggregate {}", group.label))?;
        match curve {
            Some(curve) => curves.push((group.label.clone(), curve)),
            None => warn!("no data for {}, leaving it out of the plot", group.label),
        }
    }

    if curves.is_empty() {
        bail!("no experiment data found in {}", args.logdir.display());
    }
    Ok(curves)
}

pub fn run(args: &CompareArgs, config: &PlotConfig) -> Result<()> {
    let curves = collect_curves(args, config)?;

    let chart = BandChart {
        title: &args.title,
        x_label: &args.x_label,
        y_label: &args.y_label,
        curves: curves.iter().map(|(label, curve)| (label.as_str(), curve)).collect(),
    };
    charts::render(&chart, &args.output, config)
        .map_err(|e| anyhow::anyhow!(e))
        .with_context(|| format!("failed to draw {}", args.output.display()))?;
    println!("{} {}", "Plot saved to:".green(), args.output.display());

    for (label, curve) in &curves {
        if let Some((mean, std)) = curve.last() {
            println!(
                "{} Final Return: {}",
                label.bold(),
                format!("{mean:.2} ± {std:.2}").cyan()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::event_log::testing::write_event_file;

    fn write_seed(root: &Path, dir: &str, points: &[(f32, f32)]) {
        let dir = root.join(dir);
        fs::create_dir_all(&dir).unwrap();
        let mut scalars = Vec::new();
        for (i, (steps, ret)) in points.iter().enumerate() {
            scalars.push((i as i64, "Train_EnvstepsSoFar", *steps));
            scalars.push((i as i64, "Train_AverageReturn", *ret));
        }
        write_event_file(&dir.join("events.out.tfevents.1.host"), &scalars);
    }

    fn args(logdir: &Path) -> CompareArgs {
        CompareArgs {
            logdir: logdir.to_path_buf(),
            output: logdir.join("plot.png"),
            groups: vec![
                "DQN=q1_dqn_".parse().unwrap(),
                "Double DQN=q1_doubledqn_".parse().unwrap(),
            ],
            seeds: crate::constants::SEEDS.to_vec(),
            steps: StepSource::Scalar("Train_EnvstepsSoFar".to_string()),
            value_tag: "Train_AverageReturn".to_string(),
            title: "DQN vs Double DQN".to_string(),
            x_label: "Timesteps".to_string(),
            y_label: "Average Return".to_string(),
            max_step: None,
        }
    }

    fn config(sample_count: usize) -> PlotConfig {
        PlotConfig {
            sample_count,
            ..PlotConfig::default()
        }
    }

    #[test]
    fn group_syntax() {
        let group: Group = "Double DQN = q1_doubledqn_".parse().unwrap();
        assert_eq!(group.label, "Double DQN");
        assert_eq!(group.prefix, "q1_doubledqn_");
        assert!("no_equals".parse::<Group>().is_err());
        assert!("=prefix".parse::<Group>().is_err());
    }

    #[test]
    fn aggregates_each_group_over_its_seeds() {
        let root = tempfile::tempdir().unwrap();
        write_seed(root.path(), "q1_dqn_1_LunarLander", &[(0., 10.), (10., 20.), (20., 30.)]);
        write_seed(root.path(), "q1_dqn_2_LunarLander", &[(0., 0.), (10., 10.), (20., 20.), (30., 40.)]);
        write_seed(root.path(), "q1_doubledqn_1_LunarLander", &[(0., 1.), (20., 3.)]);

        let curves = collect_curves(&args(root.path()), &config(3)).unwrap();

        assert_eq!(curves.len(), 2);
        let (label, dqn) = &curves[0];
        assert_eq!(label, "DQN");
        assert_eq!(dqn.steps(), &[0., 10., 20.]);
        assert_eq!(dqn.mean(), &[5., 15., 25.]);
        assert_eq!(dqn.std(), &[5., 5., 5.]);

        let (label, ddqn) = &curves[1];
        assert_eq!(label, "Double DQN");
        assert_eq!(ddqn.mean(), &[1., 2., 3.]);
        assert_eq!(ddqn.last(), Some((3., 0.)));
    }

    #[test]
    fn groups_without_data_are_left_out() {
        let root = tempfile::tempdir().unwrap();
        write_seed(root.path(), "q1_dqn_1", &[(0., 1.), (5., 2.)]);
        // a seed directory without an event file
        fs::create_dir(root.path().join("q1_doubledqn_1")).unwrap();

        let curves = collect_curves(&args(root.path()), &config(10)).unwrap();

        assert_eq!(curves.len(), 1);
        assert_eq!(curves[0].0, "DQN");
        assert_eq!(curves[0].1.len(), 10);
    }

    #[test]
    fn missing_tag_skips_the_seed() {
        let root = tempfile::tempdir().unwrap();
        write_seed(root.path(), "q1_dqn_1", &[(0., 1.), (5., 2.)]);
        let dir = root.path().join("q1_dqn_2");
        fs::create_dir(&dir).unwrap();
        write_event_file(&dir.join("events.out.tfevents.1.host"), &[(0, "Eval_AverageReturn", 3.)]);

        let group: Group = "DQN=q1_dqn_".parse().unwrap();
        let runs = load_group(
            root.path(),
            &group,
            &[1, 2],
            &StepSource::Scalar("Train_EnvstepsSoFar".to_string()),
            "Train_AverageReturn",
        )
        .unwrap();

        assert_eq!(runs.keys().copied().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn corrupt_seed_is_skipped() {
        let root = tempfile::tempdir().unwrap();
        write_seed(root.path(), "q1_dqn_1", &[(0., 1.), (10., 3.)]);
        let dir = root.path().join("q1_dqn_2");
        fs::create_dir(&dir).unwrap();
        let mut bytes = 8u64.to_le_bytes().to_vec();
        bytes.extend([0u8; 4]);
        bytes.extend([1u8; 12]);
        fs::write(dir.join("events.out.tfevents.1.host"), bytes).unwrap();

        let curves = collect_curves(&args(root.path()), &config(3)).unwrap();

        assert_eq!(curves.len(), 1);
        assert_eq!(curves[0].1.mean(), &[1., 2., 3.]);
    }

    #[test]
    fn event_steps_can_be_the_axis() {
        let root = tempfile::tempdir().unwrap();
        write_seed(root.path(), "q1_dqn_1", &[(100., 1.), (200., 2.)]);

        let group: Group = "DQN=q1_dqn_".parse().unwrap();
        let runs = load_group(root.path(), &group, &[1], &StepSource::EventStep, "Train_AverageReturn")
            .unwrap();

        assert_eq!(runs[&1].points(), &[(0., 1.), (1., 2.)]);
    }

    #[test]
    fn nothing_found_is_an_error() {
        let root = tempfile::tempdir().unwrap();
        let err = collect_curves(&args(root.path()), &config(10)).unwrap_err();
        assert!(err.to_string().contains("no experiment data found"));
    }
}
