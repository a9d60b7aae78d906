//! Software rasteriser for statistics charts.
//!
//! Paints a [`SampledSeries`] into a [`ChartImage`]: background, dashed value
//! markers, time markers, the average line and finally the curve on top.

use fuel_config::DisplayConfig;
use fuel_core::{ChartImage, FuelError, Result, Rgba};
use fuel_sampling::SampledSeries;
use fuel_theme::Theme;

/// Dash pattern of the horizontal marker lines: on, off (pixels).
const DASH: (u32, u32) = (2, 2);

/// Pixel geometry of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartLayout {
    pub width:  u32,
    pub height: u32,
    /// Inset keeping the curve stroke off the image edges.
    pub margin: u32,
}

impl ChartLayout {
    /// Build a [`ChartLayout`] from the config file's `[display]` section.
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self {
            width:  config.chart_width,
            height: config.chart_height,
            margin: 4,
        }
    }

    fn check(&self) -> Result<()> {
        if self.width <= 2 * self.margin || self.height <= 2 * self.margin {
            return Err(FuelError::Render(format!(
                "{}x{} leaves no room inside a {}px margin",
                self.width, self.height, self.margin
            )));
        }
        Ok(())
    }

    /// Horizontal pixel of a normalised x.
    fn px(&self, x: f64) -> i64 {
        let usable = f64::from(self.width - 1 - 2 * self.margin);
        i64::from(self.margin) + (x.clamp(0.0, 1.0) * usable).round() as i64
    }

    /// Vertical pixel of a normalised y (0 = bottom).
    fn py(&self, y: f64) -> i64 {
        let usable = f64::from(self.height - 1 - 2 * self.margin);
        i64::from(self.height - 1 - self.margin) - (y.clamp(0.0, 1.0) * usable).round() as i64
    }
}

/// Rasterise `series` with `theme` colours.
pub fn render_chart(series: &SampledSeries, theme: &Theme, layout: ChartLayout) -> Result<ChartImage> {
    layout.check()?;
    let mut image = ChartImage::filled(layout.width, layout.height, theme.background);

    for marker in series.horizontal_markers.iter() {
        let y = layout.py(marker.position);
        for x in 0..i64::from(layout.width) {
            if (x as u32) % (DASH.0 + DASH.1) < DASH.0 {
                image.put(x, y, theme.grid);
            }
        }
    }

    for marker in series.vertical_markers.iter() {
        let x = layout.px(marker.position);
        for y in 0..i64::from(layout.height) {
            image.put(x, y, theme.grid);
        }
    }

    if let Some(avg) = series.average_position {
        let y = layout.py(avg);
        for x in 0..i64::from(layout.width) {
            image.put(x, y, theme.average);
        }
    }

    let points: Vec<(i64, i64)> = series.curve().map(|p| (layout.px(p.x), layout.py(p.y))).collect();
    for pair in points.windows(2) {
        line(&mut image, pair[0], pair[1], theme.curve, theme.line_width);
    }

    tracing::trace!(
        "Rendered {} points into {}x{}",
        points.len(),
        layout.width,
        layout.height
    );
    Ok(image)
}

/// Bresenham line with a square brush of `width` pixels.
fn line(image: &mut ChartImage, from: (i64, i64), to: (i64, i64), color: Rgba, width: u32) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    let lo = -(i64::from(width) - 1) / 2;
    let hi = lo + i64::from(width) - 1;

    loop {
        for ox in lo..=hi {
            for oy in lo..=hi {
                image.put(x + ox, y + oy, color);
            }
        }
        if (x, y) == to {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use fuel_core::StatisticKind;
    use fuel_sampling::{CurvePoint, LensSample, Marker, SamplePoint, Samples};

    fn series() -> SampledSeries {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let point = |x: f64, y: f64, d: i64| SamplePoint {
            curve: CurvePoint { x, y },
            lens: LensSample { start: t0, end: t0 + Duration::days(d), value: y },
        };
        SampledSeries {
            kind: StatisticKind::PriceAmount,
            unit: "€/l".into(),
            average: Some(0.5),
            average_position: Some(0.5),
            first: t0,
            last: t0 + Duration::days(20),
            points: Samples::try_from_vec(vec![point(0.0, 0.0, 0), point(1.0, 1.0, 20)]).unwrap(),
            horizontal_markers: Samples::try_from_vec(vec![Marker { position: 0.9, label: "x".into() }]).unwrap(),
            vertical_markers: Samples::try_from_vec(vec![Marker { position: 0.25, label: "Jan".into() }]).unwrap(),
        }
    }

    fn layout() -> ChartLayout {
        ChartLayout { width: 64, height: 48, margin: 4 }
    }

    #[test]
    fn draws_every_layer() {
        let theme = Theme::default();
        let img = render_chart(&series(), &theme, layout()).unwrap();

        assert_eq!((img.width(), img.height()), (64, 48));
        assert_eq!(img.pixel(0, 0), Some(theme.background));
        assert!(img.count(theme.curve) > 50);
        assert!(img.count(theme.grid) > 40);
        assert!(img.count(theme.average) > 0);
    }

    #[test]
    fn curve_runs_from_bottom_left_to_top_right() {
        let theme = Theme::default();
        let l = layout();
        let img = render_chart(&series(), &theme, l).unwrap();

        assert_eq!(img.pixel(l.margin, l.height - 1 - l.margin), Some(theme.curve));
        assert_eq!(img.pixel(l.width - 1 - l.margin, l.margin), Some(theme.curve));
    }

    #[test]
    fn degenerate_sizes_are_refused() {
        let err = render_chart(&series(), &Theme::default(), ChartLayout { width: 8, height: 100, margin: 4 });
        assert!(matches!(err, Err(FuelError::Render(_))));
    }

    #[test]
    fn layout_follows_config() {
        let cfg = DisplayConfig::default();
        let l = ChartLayout::from_config(&cfg);
        assert_eq!((l.width, l.height), (cfg.chart_width, cfg.chart_height));
    }
}
