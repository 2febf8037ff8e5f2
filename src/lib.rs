pub mod aggregate;
pub mod charts;
pub mod commands;
pub mod config;
pub mod constants;
pub mod discovery;
pub mod error;
pub mod event_log;
pub mod labels;
pub mod results;
pub mod types;

pub use aggregate::aggregate;
pub use error::{AggregateError, Error, Result};
pub use types::{AggregatedCurve, Run, RunSet};
