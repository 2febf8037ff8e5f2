pub mod files {
    pub use shared::paths::*;
}

pub use shared::defaults::*;

pub mod axes {
    pub const TIMESTEPS: &str = "Timesteps";
    pub const ITERATION: &str = "Iteration";
    pub const AVERAGE_RETURN: &str = "Average Return";
    pub const EVAL_RETURN: &str = "Eval Average Return";
    pub const EVAL_AVERAGE_RETURN: &str = "Average Evaluation Return";
}

/// Title used by `eval` when several experiments share one chart.
pub const EVAL_COMPARISON_TITLE: &str = "Eval Average Return Comparison";
