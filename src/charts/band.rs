use std::ops::Range;

use plotters::coord::Shift;
use plotters::prelude::{ChartBuilder, DrawingArea, DrawingBackend, Polygon};
use plotters::series::LineSeries;
use plotters::style::{Color, ShapeStyle};

use super::utils::{self, Axes};
use super::{Chart, ChartResult};
use crate::config::{ChartStyle, PlotConfig};
use crate::types::AggregatedCurve;

/// Mean lines with a shaded ± std band, one per aggregated curve.
pub struct BandChart<'a> {
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub curves: Vec<(&'a str, &'a AggregatedCurve)>,
}

impl BandChart<'_> {
    fn bounds(&self) -> Option<(Range<f64>, Range<f64>)> {
        let curves = || self.curves.iter().map(|(_, curve)| *curve);
        let (x_min, x_max) = utils::extent(curves().flat_map(|c| c.steps().iter().copied()))?;
        let (y_min, y_max) =
            utils::extent(curves().flat_map(|c| c.band().flat_map(|(_, lo, hi)| [lo, hi])))?;
        Some((utils::exact(x_min, x_max), utils::padded(y_min, y_max)))
    }
}

impl Chart for BandChart<'_> {
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
            return Err("no curve has finite values to plot".into());
        };

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
                x_format: utils::scientific,
            },
        )?;

        for (i, (label, curve)) in self.curves.iter().enumerate() {
            let color = style.series_color(i);

            let lower: Vec<(f64, f64)> = curve.band().map(|(x, lo, _)| (x, lo)).collect();
            let outline: Vec<(f64, f64)> = curve
                .band()
                .map(|(x, _, hi)| (x, hi))
                .chain(lower.into_iter().rev())
                .collect();
            chart.draw_series(std::iter::once(Polygon::new(
                outline,
                color.mix(config.band_alpha).filled(),
            )))?;

            chart
                .draw_series(LineSeries::new(
                    curve.steps().iter().copied().zip(curve.mean().iter().copied()),
                    ShapeStyle::from(&color).stroke_width(config.line_width),
                ))?
                .label(*label)
                .legend(utils::legend_rect(color));
        }

        utils::draw_legend(&mut chart, config, style)?;
        Ok(())
    }
}
