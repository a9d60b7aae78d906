use chrono::{DateTime, Utc};
use fuel_core::{ChartImage, FuelError, Result, StatisticKind};

use crate::format::format_value;
use crate::samples::Samples;

/// Maximum number of curve points / lens entries per series.
pub const MAX_SAMPLES: usize = 128;
pub const MAX_HORIZONTAL_MARKERS: usize = 5;
pub const MAX_VERTICAL_MARKERS: usize = 3;

/// Curve point, both coordinates normalised to `[0, 1]` (y grows upwards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}

/// What the curve shows for one stretch of time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LensSample {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub value: f64,
}

impl LensSample {
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t <= self.end
    }
}

/// Axis marker: normalised position plus display label.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: f64,
    pub label: String,
}

/// One curve point together with the lens entry that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub curve: CurvePoint,
    pub lens: LensSample,
}

/// Everything a chart shows for one (car, month range, statistic kind).
#[derive(Debug, Clone, PartialEq)]
pub struct SampledSeries {
    pub kind: StatisticKind,
    /// Unit text appended to values, e.g. `"l/100km"` or `"€/l"`.
    pub unit: String,
    pub average: Option<f64>,
    /// Normalised height of the average line.
    pub average_position: Option<f64>,
    /// Time at the left edge of the chart.
    pub first: DateTime<Utc>,
    /// Time at the right edge of the chart.
    pub last: DateTime<Utc>,
    pub points: Samples<SamplePoint, MAX_SAMPLES>,
    pub horizontal_markers: Samples<Marker, MAX_HORIZONTAL_MARKERS>,
    pub vertical_markers: Samples<Marker, MAX_VERTICAL_MARKERS>,
}

impl SampledSeries {
    pub fn curve(&self) -> impl Iterator<Item = CurvePoint> + '_ {
        self.points.iter().map(|p| p.curve)
    }

    pub fn lens(&self) -> impl Iterator<Item = &LensSample> + '_ {
        self.points.iter().map(|p| &p.lens)
    }

    /// Value text in this series' unit and precision.
    pub fn format_value(&self, value: f64) -> String {
        format_value(value, self.kind.decimals(), &self.unit)
    }
}

/// Cached payload of a statistics page: the rendered image plus the samples it was drawn from.
///
/// Immutable once built; shared between cache and view.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingData {
    image: ChartImage,
    series: SampledSeries,
}

impl SamplingData {
    /// Pair an image with its series.  Empty series are refused.
    pub fn new(image: ChartImage, series: SampledSeries) -> Result<Self> {
        if series.points.is_empty() {
            return Err(FuelError::NoData);
        }
        Ok(Self { image, series })
    }

    pub fn image(&self) -> &ChartImage {
        &self.image
    }

    pub fn average(&self) -> Option<f64> {
        self.series.average
    }

    pub fn series(&self) -> &SampledSeries {
        &self.series
    }
}
