pub mod band;
pub mod error_bar;
pub mod line;
mod utils;

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::{BitMapBackend, DrawingArea, DrawingBackend, IntoDrawingArea, SVGBackend};

use crate::config::{ChartStyle, PlotConfig};

pub use band::BandChart;
pub use error_bar::ErrorBarChart;
pub use line::LineChart;

pub type ChartResult<T = ()> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Something that can draw itself onto any plotters backend.
pub trait Chart {
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        config: &PlotConfig,
        style: &ChartStyle,
    ) -> ChartResult
    where
        DB::ErrorType: 'static;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> ChartResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("png") => Ok(OutputFormat::Png),
            Some("svg") => Ok(OutputFormat::Svg),
            _ => Err(format!(
                "cannot render {}: charts are written as .png or .svg",
                path.display()
            )
            .into()),
        }
    }
}

/// Draws `chart` to `path`, picking the backend from the file extension and
/// creating missing parent directories.
pub fn render(chart: &impl Chart, path: &Path, config: &PlotConfig) -> ChartResult {
    let format = OutputFormat::from_path(path)?;
    let style = config.style()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    match format {
        OutputFormat::Png => {
            let root = BitMapBackend::new(path, config.dimensions()).into_drawing_area();
            root.fill(&style.background)?;
            chart.draw(&root, config, &style)?;
            root.present()?;
        }
        OutputFormat::Svg => {
            let root = SVGBackend::new(path, config.dimensions()).into_drawing_area();
            root.fill(&style.background)?;
            chart.draw(&root, config, &style)?;
            root.present()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("a/b.png")).unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("b.SVG")).unwrap(), OutputFormat::Svg);
        assert!(OutputFormat::from_path(Path::new("plot.pdf")).is_err());
        assert!(OutputFormat::from_path(Path::new("plot")).is_err());
    }
}
