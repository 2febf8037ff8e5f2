use clap::ValueEnum;

/// How to turn an experiment directory name into a legend label.
///
/// Directory names follow the `<exp>_<options>_<env>_<timestamp>` convention of
/// the course logger, with hyperparameters as `b<batch>` and `r<rate>` parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExperimentKind {
    /// The directory name itself.
    #[default]
    General,
    /// Reward-to-go / advantage standardisation switches.
    CartPole,
    /// Batch size and learning rate.
    InvertedPendulum,
    LunarLander,
    /// Search runs by baseline / reward-to-go, optimal runs by hyperparameters.
    HalfCheetah,
    /// GAE lambda.
    Hopper,
}

/// `b<batch>` and `r<rate>` parts of a directory name.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Hyperparams<'a> {
    batch: &'a str,
    rate: &'a str,
}

fn numeric_after<'a>(part: &'a str, prefix: char) -> Option<&'a str> {
    let rest = part.strip_prefix(prefix)?;
    let digits = rest.chars().filter(|c| *c != '.');
    let mut any = false;
    for c in digits {
        if !c.is_ascii_digit() {
            return None;
        }
        any = true;
    }
    any.then_some(rest)
}

impl<'a> Hyperparams<'a> {
    /// Later parts win when a name repeats a prefix.
    fn parse(name: &'a str) -> Option<Self> {
        let mut batch = None;
        let mut rate = None;
        for part in name.split('_') {
            if let Some(b) = numeric_after(part, 'b') {
                batch = Some(b);
            } else if let Some(r) = numeric_after(part, 'r') {
                rate = Some(r);
            }
        }
        Some(Self {
            batch: batch?,
            rate: rate?,
        })
    }
}

impl ExperimentKind {
    pub fn label(self, name: &str) -> String {
        match self {
            ExperimentKind::General => name.to_string(),
            ExperimentKind::CartPole => {
                let label = if name.contains("no_rtg_dsa") {
                    "No RTG, DSA"
                } else if name.contains("rtg_dsa") {
                    "RTG, DSA"
                } else if name.contains("rtg_na") {
                    "RTG, No DSA"
                } else {
                    name
                };
                label.to_string()
            }
            ExperimentKind::InvertedPendulum => match Hyperparams::parse(name) {
                Some(h) => format!("Batch={}, LR={}", h.batch, h.rate),
                None => name.to_string(),
            },
            ExperimentKind::LunarLander => "LunarLander".to_string(),
            ExperimentKind::HalfCheetah => {
                let rtg = name.contains("rtg");
                let nn = name.contains("nnbaseline");
                if name.contains("search") {
                    let label = match (rtg, nn) {
                        (true, true) => "RTG + NN Baseline",
                        (true, false) => "RTG",
                        (false, true) => "NN Baseline",
                        (false, false) => "Baseline",
                    };
                    return label.to_string();
                }
                let Some(h) = Hyperparams::parse(name) else {
                    return name.to_string();
                };
                let suffix = match (rtg, nn) {
                    (true, true) => " + RTG + NN",
                    (true, false) => " + RTG",
                    (false, true) => " + NN",
                    (false, false) => "",
                };
                format!("Optimal (b={}, lr={}){suffix}", h.batch, h.rate)
            }
            ExperimentKind::Hopper => match name.rsplit("lambda").next() {
                Some(tail) if name.contains("lambda") => {
                    let value = tail.split('_').next().unwrap_or_default();
                    format!("λ = {value}")
                }
                _ => name.to_string(),
            },
        }
    }
}
