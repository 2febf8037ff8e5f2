use std::ops::Range;

use ordered_float::OrderedFloat;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::{ChartContext, DrawingBackend, IntoFont, SeriesLabelPosition, TextStyle};
use plotters::style::{Color, RGBColor};

use super::ChartResult;
use crate::config::{ChartStyle, PlotConfig};

pub type LinearChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

pub fn text_style<'a>(config: &'a PlotConfig, size: u32, color: &RGBColor) -> TextStyle<'a> {
    (config.font.as_str(), size).into_font().color(color)
}

/// Smallest and largest finite value.
pub fn extent(values: impl Iterator<Item = f64> + Clone) -> Option<(f64, f64)> {
    let finite = values.filter(|v| v.is_finite()).map(OrderedFloat);
    let min = finite.clone().min()?;
    let max = finite.max()?;
    Some((min.0, max.0))
}

/// Range with 5% headroom on both sides, never collapsing to a point.
pub fn padded(min: f64, max: f64) -> Range<f64> {
    let span = (max - min).max(0.01);
    (min - span * 0.05)..(max + span * 0.05)
}

/// Range exactly covering the data, widened by one unit if it is a single point.
pub fn exact(min: f64, max: f64) -> Range<f64> {
    if max > min {
        min..max
    } else {
        (min - 0.5)..(max + 0.5)
    }
}

pub fn scientific(v: &f64) -> String {
    if *v == 0.0 {
        "0".to_string()
    } else {
        format!("{v:.1e}")
    }
}

pub fn plain(v: &f64) -> String {
    format!("{v}")
}

pub struct Axes<'a> {
    pub x_desc: &'a str,
    pub y_desc: &'a str,
    pub x_format: fn(&f64) -> String,
}

pub fn draw_mesh<'a, DB: DrawingBackend + 'a>(
    chart: &mut LinearChart<'a, DB>,
    config: &PlotConfig,
    style: &ChartStyle,
    axes: Axes<'_>,
) -> ChartResult
where
    DB::ErrorType: 'static,
{
    chart
        .configure_mesh()
        .x_desc(axes.x_desc)
        .y_desc(axes.y_desc)
        .x_label_formatter(&axes.x_format)
        .label_style(text_style(config, config.label_size, &style.text))
        .axis_desc_style(text_style(config, config.label_size, &style.text))
        .axis_style(&style.axis)
        .bold_line_style(style.grid.mix(0.6))
        .light_line_style(style.grid.mix(0.3))
        .draw()?;
    Ok(())
}

pub fn draw_legend<'a, DB: DrawingBackend + 'a>(
    chart: &mut LinearChart<'a, DB>,
    config: &PlotConfig,
    style: &ChartStyle,
) -> ChartResult
where
    DB::ErrorType: 'static,
{
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(style.background.mix(0.9))
        .border_style(&style.axis)
        .label_font(text_style(config, config.label_size, &style.text))
        .draw()?;
    Ok(())
}

pub fn legend_rect(color: RGBColor) -> impl Fn((i32, i32)) -> plotters::element::Rectangle<(i32, i32)> {
    move |(x, y)| {
        plotters::element::Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.mix(0.8).filled())
    }
}
