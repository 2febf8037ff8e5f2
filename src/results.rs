//! Hand-entered results (hyperparameter sweeps, DAgger iterations) that are
//! plotted as error bars rather than read from event logs.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResultsFile {
    /// Title over all panels.
    pub title: Option<String>,
    #[serde(rename = "panel")]
    pub panels: Vec<Panel>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Panel {
    pub title: String,
    #[serde(default)]
    pub x_label: String,
    #[serde(default)]
    pub y_label: String,
    #[serde(default)]
    pub x_scale: AxisScale,
    pub y_range: Option<(f64, f64)>,
    #[serde(default)]
    pub series: Vec<ErrorSeries>,
    #[serde(default, rename = "reference")]
    pub references: Vec<ReferenceLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisScale {
    #[default]
    Linear,
    Log,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorSeries {
    pub label: String,
    pub x: Vec<f64>,
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

/// A horizontal line such as an expert or behaviour-cloning baseline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceLine {
    pub label: String,
    pub value: f64,
    #[serde(default)]
    pub style: LineStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl ResultsFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let file: ResultsFile =
            toml::from_str(text).map_err(|e| Error::Results(e.message().to_string()))?;
        file.validate()?;
        Ok(file)
    }

    fn validate(&self) -> Result<()> {
        if self.panels.is_empty() {
            return Err(Error::Results("no [[panel]] entries".to_string()));
        }
        for panel in &self.panels {
            for series in &panel.series {
                if series.x.len() != series.mean.len() || series.x.len() != series.std.len() {
                    return Err(Error::Results(format!(
                        "series '{}' in panel '{}' has {} x values, {} means and {} stds",
                        series.label,
                        panel.title,
                        series.x.len(),
                        series.mean.len(),
                        series.std.len()
                    )));
                }
                if panel.x_scale == AxisScale::Log && series.x.iter().any(|x| *x <= 0.0) {
                    return Err(Error::Results(format!(
                        "series '{}' has non-positive x values on a log axis",
                        series.label
                    )));
                }
            }
            if let Some((lo, hi)) = panel.y_range {
                if lo >= hi {
                    return Err(Error::Results(format!(
                        "panel '{}' has an empty y range {lo}..{hi}",
                        panel.title
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAGGER: &str = r#"
        title = "DAgger Learning Curves"

        [[panel]]
        title = "Ant-v2"
        x_label = "DAgger Iterations"
        y_label = "Mean Return"
        y_range = [0, 5000]

        [[panel.series]]
        label = "DAgger"
        x = [0, 1, 2]
        mean = [2357.03, 4532.50, 4737.56]
        std = [1869.77, 169.10, 70.85]

        [[panel.reference]]
        label = "Expert"
        value = 4713.65
        style = "dashed"

        [[panel.reference]]
        label = "BC"
        value = 2357.03
        style = "dotted"
    "#;

    #[test]
    fn parses_panels_series_and_references() {
        let file = ResultsFile::parse(DAGGER).unwrap();

        assert_eq!(file.title.as_deref(), Some("DAgger Learning Curves"));
        let panel = &file.panels[0];
        assert_eq!(panel.x_scale, AxisScale::Linear);
        assert_eq!(panel.y_range, Some((0.0, 5000.0)));
        assert_eq!(panel.series[0].mean[1], 4532.50);
        assert_eq!(panel.references[1].style, LineStyle::Dotted);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let text = r#"
            [[panel]]
            title = "sweep"
            [[panel.series]]
            label = "bc"
            x = [1e-4, 5e-4]
            mean = [1.0]
            std = [0.1, 0.2]
        "#;
        let err = ResultsFile::parse(text).unwrap_err();
        assert!(err.to_string().contains("2 x values, 1 means"));
    }

    #[test]
    fn log_axis_needs_positive_x() {
        let text = r#"
            [[panel]]
            title = "sweep"
            x_scale = "log"
            [[panel.series]]
            label = "bc"
            x = [0.0, 1e-3]
            mean = [1.0, 2.0]
            std = [0.1, 0.2]
        "#;
        assert!(ResultsFile::parse(text).is_err());
    }

    #[test]
    fn needs_a_panel() {
        assert!(ResultsFile::parse("title = \"empty\"\npanel = []\n").is_err());
        assert!(ResultsFile::parse("title = \"empty\"\n").is_err());
    }
}
