pub mod paths {
    pub const LOG_DIR: &str = "data/Part1_QLearning";
    pub const COMPARE_OUTPUT: &str = "plot/q1_dqn_vs_ddqn.png";
    pub const EVAL_OUTPUT_STEM: &str = "train_eval_comparison";
}

pub mod defaults {
    /// Event files written by tensorboard / tensorboardX all share this prefix.
    pub const EVENT_FILE_PREFIX: &str = "events.out.tfevents";

    pub const STEPS_TAG: &str = "Train_EnvstepsSoFar";
    pub const TRAIN_RETURN_TAG: &str = "Train_AverageReturn";
    pub const EVAL_RETURN_TAG: &str = "Eval_AverageReturn";

    /// Points on the common step axis of an aggregated curve.
    pub const SAMPLE_COUNT: usize = 1000;
    pub const SEEDS: [u32; 3] = [1, 2, 3];
}

pub mod theme;
