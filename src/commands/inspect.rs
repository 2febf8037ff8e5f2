use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::discovery::find_event_file;
use crate::event_log::ScalarLog;

/// What one scalar tag in an event file looks like.
#[derive(Debug, Clone, PartialEq)]
pub struct TagSummary {
    pub tag: String,
    pub count: usize,
    pub first_step: i64,
    pub last_step: i64,
    pub last_value: f64,
    pub last_wall_time: Option<DateTime<Utc>>,
}

/// `path` itself when it is a file, otherwise the first event file inside it.
pub fn resolve(path: &Path) -> Result<PathBuf> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    find_event_file(path)?.ok_or_else(|| anyhow!("no event file found in {}", path.display()))
}

fn wall_time(seconds: f64) -> Option<DateTime<Utc>> {
    let secs = seconds.trunc() as i64;
    let nanos = ((seconds - seconds.trunc()) * 1e9) as u32;
    DateTime::from_timestamp(secs, nanos)
}

pub fn describe(log: &ScalarLog) -> Vec<TagSummary> {
    log.tags()
        .into_iter()
        .filter_map(|tag| {
            let events = log.scalars(tag)?;
            let (first, last) = (events.first()?, events.last()?);
            Some(TagSummary {
                tag: tag.to_string(),
                count: events.len(),
                first_step: first.step,
                last_step: last.step,
                last_value: last.value,
                last_wall_time: wall_time(last.wall_time),
            })
        })
        .collect()
}

pub fn run(path: &Path) -> Result<()> {
    let event_file = resolve(path)?;
    let log = ScalarLog::open(&event_file)?;
    let summaries = describe(&log);

    println!("{} ({} tags)", event_file.display().to_string().bold(), summaries.len());
    for summary in summaries {
        let written = summary
            .last_wall_time
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<32} {:>6} points  steps {}..={}  last {}  at {}",
            summary.tag.cyan(),
            summary.count,
            summary.first_step,
            summary.last_step,
            format!("{:.4}", summary.last_value).green(),
            written
        );
    }
    Ok(())
}
