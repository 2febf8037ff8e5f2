use std::ops::Range;

use plotters::coord::Shift;
use plotters::prelude::{ChartBuilder, Circle, DrawingArea, DrawingBackend, ErrorBar};
use plotters::series::{DashedLineSeries, LineSeries};
use plotters::style::{Color, ShapeStyle};

use super::utils::{self, Axes};
use super::{Chart, ChartResult};
use crate::config::{ChartStyle, PlotConfig};
use crate::results::{AxisScale, LineStyle, Panel, ResultsFile};

/// Side-by-side panels of mean ± std error bars with optional baselines.
pub struct ErrorBarChart<'a> {
    pub results: &'a ResultsFile,
}

/// Log axes are drawn on a linear axis over log10(x), labelled with the
/// original values.
fn to_axis(scale: AxisScale, x: f64) -> f64 {
    match scale {
        AxisScale::Linear => x,
        AxisScale::Log => x.log10(),
    }
}

fn log_label(v: &f64) -> String {
    format!("{:.0e}", 10f64.powf(*v))
}

fn panel_bounds(panel: &Panel) -> Option<(Range<f64>, Range<f64>)> {
    let xs = panel
        .series
        .iter()
        .flat_map(|s| s.x.iter().map(|x| to_axis(panel.x_scale, *x)));
    let (x_min, x_max) = utils::extent(xs)?;
    // room for the outermost error bars
    let x_range = utils::padded(x_min, x_max);

    let y_range = match panel.y_range {
        Some((lo, hi)) => lo..hi,
        None => {
            let bars = panel.series.iter().flat_map(|s| {
                s.mean
                    .iter()
                    .zip(&s.std)
                    .flat_map(|(m, sd)| [m - sd, m + sd])
            });
            let references = panel.references.iter().map(|r| r.value);
            let (y_min, y_max) = utils::extent(bars.chain(references))?;
            utils::padded(y_min, y_max)
        }
    };
    Some((x_range, y_range))
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    config: &PlotConfig,
    style: &ChartStyle,
) -> ChartResult
where
    DB::ErrorType: 'static,
{
    let Some((x_range, y_range)) = panel_bounds(panel) else {
        return Err(format!("panel '{}' has no data", panel.title).into());
    };
    let (x_start, x_end) = (x_range.start, x_range.end);

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, utils::text_style(config, config.caption_size, &style.text))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(x_range, y_range)?;

    utils::draw_mesh(
        &mut chart,
        config,
        style,
        Axes {
            x_desc: &panel.x_label,
            y_desc: &panel.y_label,
            x_format: match panel.x_scale {
                AxisScale::Linear => utils::plain,
                AxisScale::Log => log_label,
            },
        },
    )?;

    for (i, series) in panel.series.iter().enumerate() {
        let color = style.series_color(i);
        let line = ShapeStyle::from(&color).stroke_width(config.line_width);
        let points: Vec<(f64, f64)> = series
            .x
            .iter()
            .map(|x| to_axis(panel.x_scale, *x))
            .zip(series.mean.iter().copied())
            .collect();

        chart
            .draw_series(LineSeries::new(points.iter().copied(), line))?
            .label(series.label.as_str())
            .legend(utils::legend_rect(color));
        chart.draw_series(
            points
                .iter()
                .zip(&series.std)
                .map(|(&(x, mean), sd)| ErrorBar::new_vertical(x, mean - sd, mean, mean + sd, line, 10)),
        )?;
        chart.draw_series(
            points
                .iter()
                .map(|point| Circle::new(*point, config.marker_size * 2, color.filled())),
        )?;
    }

    for (j, reference) in panel.references.iter().enumerate() {
        let color = style.series_color(panel.series.len() + j);
        let line = ShapeStyle::from(&color).stroke_width(config.line_width);
        let ends = vec![(x_start, reference.value), (x_end, reference.value)];
        let anno = match reference.style {
            LineStyle::Solid => chart.draw_series(LineSeries::new(ends, line))?,
            LineStyle::Dashed => chart.draw_series(DashedLineSeries::new(ends, 12, 8, line))?,
            LineStyle::Dotted => chart.draw_series(DashedLineSeries::new(ends, 3, 6, line))?,
        };
        anno.label(reference.label.as_str())
            .legend(utils::legend_rect(color));
    }

    utils::draw_legend(&mut chart, config, style)?;
    Ok(())
}

impl Chart for ErrorBarChart<'_> {
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        config: &PlotConfig,
        style: &ChartStyle,
    ) -> ChartResult
    where
        DB::ErrorType: 'static,
    {
        let root = match &self.results.title {
            Some(title) => root.titled(
                title,
                utils::text_style(config, config.caption_size + 4, &style.text),
            )?,
            None => root.clone(),
        };

        let areas = root.split_evenly((1, self.results.panels.len()));
        for (area, panel) in areas.iter().zip(&self.results.panels) {
            draw_panel(area, panel, config, style)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SWEEP: &str = r#"
        [[panel]]
        title = "Behavioral Cloning Performance vs Learning Rate (Ant-v2)"
        x_scale = "log"
        [[panel.series]]
        label = "BC"
        x = [1e-4, 1e-3, 1e-2]
        mean = [-486.82, 400.57, 644.30]
        std = [895.43, 313.13, 58.98]
    "#;

    #[test]
    fn log_panels_bound_on_exponents() {
        let file = ResultsFile::parse(SWEEP).unwrap();

        let (x, y) = panel_bounds(&file.panels[0]).unwrap();

        // exponents -4..-2 padded by 5% of 2
        assert!((x.start - -4.1).abs() < 1e-9);
        assert!((x.end - -1.9).abs() < 1e-9);
        // lowest bar is -486.82 - 895.43, highest 644.30 + 58.98
        assert!(y.start < -1382.25 && y.end > 703.28);
    }

    #[test]
    fn fixed_y_range_wins() {
        let mut file = ResultsFile::parse(SWEEP).unwrap();
        file.panels[0].y_range = Some((0.0, 5000.0));

        let (_, y) = panel_bounds(&file.panels[0]).unwrap();

        assert_eq!(y, 0.0..5000.0);
    }

    #[test]
    fn log_labels_show_original_values() {
        assert_eq!(log_label(&-3.0), "1e-3");
        assert_eq!(to_axis(AxisScale::Log, 100.0), 2.0);
        assert_eq!(to_axis(AxisScale::Linear, 100.0), 100.0);
    }
}
