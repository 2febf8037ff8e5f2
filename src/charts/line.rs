use std::ops::Range;

use plotters::coord::Shift;
use plotters::prelude::{ChartBuilder, Circle, DrawingArea, DrawingBackend};
use plotters::series::{DashedLineSeries, LineSeries};
use plotters::style::{Color, ShapeStyle};

use super::utils::{self, Axes};
use super::{Chart, ChartResult};
use crate::config::{ChartStyle, PlotConfig};
use crate::types::Run;

/// Raw runs drawn as plain lines, one colour each.
pub struct LineChart<'a> {
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub series: Vec<(&'a str, &'a Run)>,
    pub markers: bool,
    /// Horizontal line marking the return an agent is expected to reach.
    pub target: Option<f64>,
}

impl LineChart<'_> {
    fn bounds(&self) -> Option<(Range<f64>, Range<f64>)> {
        let runs = || self.series.iter().map(|(_, run)| *run);
        let (x_min, x_max) = utils::extent(runs().flat_map(|r| r.steps()))?;
        let (y_min, y_max) = utils::extent(runs().flat_map(|r| r.values()).chain(self.target))?;
        Some((utils::exact(x_min, x_max), utils::padded(y_min, y_max)))
    }
}

impl Chart for LineChart<'_> {
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        config: &PlotConfig,
        style: &ChartStyle,
    ) -> ChartResult
    where
        DB::ErrorType: 'static,
    {
        let Some((x_range, y_range)) = self.bounds() else {
            return Err("no series has finite values to plot".into());
        };
        let (x_start, x_end) = (x_range.start, x_range.end);

        let mut chart = ChartBuilder::on(root)
            .caption(self.title, utils::text_style(config, config.caption_size, &style.text))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(90)
            .build_cartesian_2d(x_range, y_range)?;

        utils::draw_mesh(
            &mut chart,
            config,
            style,
            Axes {
                x_desc: self.x_label,
                y_desc: self.y_label,
                x_format: utils::plain,
            },
        )?;

        for (i, (label, run)) in self.series.iter().enumerate() {
            let color = style.series_color(i).mix(0.8);

            chart
                .draw_series(LineSeries::new(
                    run.points().iter().copied(),
                    ShapeStyle::from(&color).stroke_width(config.line_width),
                ))?
                .label(*label)
                .legend(utils::legend_rect(style.series_color(i)));

            if self.markers {
                chart.draw_series(
                    run.points()
                        .iter()
                        .map(|point| Circle::new(*point, config.marker_size, color.filled())),
                )?;
            }
        }

        if let Some(target) = self.target {
            let reference = style.reference;
            chart
                .draw_series(DashedLineSeries::new(
                    vec![(x_start, target), (x_end, target)],
                    12,
                    8,
                    ShapeStyle::from(&reference).stroke_width(config.line_width),
                ))?
                .label(format!("Target Return ({target})"))
                .legend(utils::legend_rect(reference));
        }

        utils::draw_legend(&mut chart, config, style)?;
        Ok(())
    }
}
