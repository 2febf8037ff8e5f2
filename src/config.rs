use std::path::Path;

use plotters::style::RGBColor;
use serde::Deserialize;
use shared::defaults::SAMPLE_COUNT;
use shared::theme::{plotters_colors::rgb, Flavour};

use crate::error::{Error, Result};

/// Chart settings, loadable from a TOML file. Every field is optional there.
///
/// ```toml
/// sample_count = 500
/// theme = "mocha"
/// palette = ["#1f77b4", "#ff7f0e"]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotConfig {
    pub sample_count: usize,
    pub width: u32,
    pub height: u32,
    pub theme: Flavour,
    /// Overrides the theme's series colours, as `#rrggbb`.
    pub palette: Option<Vec<String>>,
    pub line_width: u32,
    /// Opacity of the ± std band.
    pub band_alpha: f64,
    pub marker_size: u32,
    pub font: String,
    pub caption_size: u32,
    pub label_size: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            sample_count: SAMPLE_COUNT,
            width: 1600,
            height: 960,
            theme: Flavour::default(),
            palette: None,
            line_width: 2,
            band_alpha: 0.3,
            marker_size: 4,
            font: "sans-serif".to_string(),
            caption_size: 28,
            label_size: 18,
        }
    }
}

/// Colours resolved from a [`PlotConfig`].
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub background: RGBColor,
    pub text: RGBColor,
    pub axis: RGBColor,
    pub grid: RGBColor,
    pub reference: RGBColor,
    pub series: Vec<RGBColor>,
}

impl ChartStyle {
    pub fn series_color(&self, index: usize) -> RGBColor {
        self.series[index % self.series.len()]
    }
}

impl PlotConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        toml::from_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn style(&self) -> Result<ChartStyle> {
        let palette = self.theme.palette();
        let series = match &self.palette {
            Some(hex) if !hex.is_empty() => hex
                .iter()
                .map(|h| parse_hex_color(h))
                .collect::<Result<Vec<_>>>()?,
            _ => palette.accents.iter().copied().map(rgb).collect(),
        };

        Ok(ChartStyle {
            background: rgb(palette.base),
            text: rgb(palette.text),
            axis: rgb(palette.surface1),
            grid: rgb(palette.surface0),
            reference: rgb(palette.overlay0),
            series,
        })
    }
}

pub fn parse_hex_color(hex: &str) -> Result<RGBColor> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(Error::Colour(hex.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| Error::Colour(hex.to_string()))
    };
    Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_the_default() {
        let config: PlotConfig = toml::from_str("").unwrap();
        assert_eq!(config, PlotConfig::default());
        assert_eq!(config.sample_count, 1000);
    }

    #[test]
    fn partial_overrides() {
        let config: PlotConfig = toml::from_str(
            r##"
            sample_count = 250
            theme = "mocha"
            palette = ["#1f77b4", "ff7f0e"]
            "##,
        )
        .unwrap();

        assert_eq!(config.sample_count, 250);
        assert_eq!(config.theme, Flavour::Mocha);
        assert_eq!(config.width, PlotConfig::default().width);

        let style = config.style().unwrap();
        assert_eq!(style.series, vec![RGBColor(0x1f, 0x77, 0xb4), RGBColor(0xff, 0x7f, 0x0e)]);
        assert_eq!(style.series_color(3), RGBColor(0xff, 0x7f, 0x0e));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<PlotConfig>("samples = 3").is_err());
    }

    #[test]
    fn bad_colours() {
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#gg0000").is_err());
        assert!(parse_hex_color("#ééé").is_err());
        assert_eq!(parse_hex_color("#000000").unwrap(), RGBColor(0, 0, 0));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plots.toml");
        std::fs::write(&path, "band_alpha = 0.5\n").unwrap();

        let config = PlotConfig::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.band_alpha, 0.5);

        std::fs::write(&path, "band_alpha = \"high\"\n").unwrap();
        assert!(matches!(PlotConfig::load(&path), Err(Error::Config { .. })));
    }
}
