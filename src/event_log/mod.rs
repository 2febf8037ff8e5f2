//! Reads scalar summaries out of tensorboard event files.

pub mod proto;
pub mod record;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use hashbrown::HashMap;
use prost::Message;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::Run;
use proto::Event;
use record::RecordReader;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarEvent {
    pub wall_time: f64,
    pub step: i64,
    pub value: f64,
}

/// Every scalar series in one event file, indexed by tag.
#[derive(Debug, Clone, Default)]
pub struct ScalarLog {
    scalars: HashMap<String, Vec<ScalarEvent>>,
    most_recent_step: Option<i64>,
}

impl ScalarLog {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let mut records = RecordReader::new(BufReader::new(file), path);
        let mut log = ScalarLog::default();

        while let Some(record) = records.next() {
            let record = record?;
            let event = Event::decode(record.as_slice()).map_err(|source| Error::Decode {
                path: path.to_path_buf(),
                index: records.index() - 1,
                source,
            })?;
            log.push(&event);
        }

        debug!(
            path = %path.display(),
            records = records.index(),
            tags = log.scalars.len(),
            "read event file"
        );
        Ok(log)
    }

    fn push(&mut self, event: &Event) {
        let most_recent_step = self.most_recent_step.replace(event.step);
        let Some(summary) = &event.summary else {
            return;
        };
        if most_recent_step.is_some_and(|recent| event.step < recent) {
            self.purge_from(event.step);
        }
        for value in &summary.value {
            let Some(scalar) = value.scalar() else {
                continue;
            };
            self.scalars
                .entry_ref(value.tag.as_str())
                .or_default()
                .push(ScalarEvent {
                    wall_time: event.wall_time,
                    step: event.step,
                    value: scalar,
                });
        }
    }

    /// A step going backwards means the run was restarted from a checkpoint:
    /// everything logged at or after that step by the earlier attempt is stale.
    fn purge_from(&mut self, step: i64) {
        let mut purged = 0;
        for events in self.scalars.values_mut() {
            let before = events.len();
            events.retain(|e| e.step < step);
            purged += before - events.len();
        }
        if purged > 0 {
            warn!(step, purged, "run restarted, dropping events from the earlier attempt");
        }
    }

    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.scalars.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    pub fn scalars(&self, tag: &str) -> Option<&[ScalarEvent]> {
        self.scalars.get(tag).map(Vec::as_slice)
    }

    /// The series for `tag` as (event step, value).
    pub fn run(&self, tag: &str) -> Result<Run> {
        let events = self.require(tag)?;
        Ok(events.iter().map(|e| (e.step as f64, e.value)).collect())
    }

    /// Uses the values logged under `x_tag` as the step axis for `y_tag`,
    /// pairing by position and dropping whatever the longer series has extra.
    pub fn paired_run(&self, x_tag: &str, y_tag: &str) -> Result<Run> {
        let xs: Vec<f64> = self.require(x_tag)?.iter().map(|e| e.value).collect();
        let ys: Vec<f64> = self.require(y_tag)?.iter().map(|e| e.value).collect();
        Ok(Run::from_columns(&xs, &ys))
    }

    fn require(&self, tag: &str) -> Result<&[ScalarEvent]> {
        self.scalars(tag).ok_or_else(|| Error::MissingTag {
            tag: tag.to_string(),
            available: self.tags().into_iter().map(str::to_string).collect(),
        })
    }
}
