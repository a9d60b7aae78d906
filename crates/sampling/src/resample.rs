use chrono::{DateTime, Utc};
use fuel_core::{Car, FuelError, FuelEvent, Result, StatisticKind};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::format::{format_local_date, format_value};
use crate::record::{
    CurvePoint, LensSample, Marker, SamplePoint, SampledSeries, MAX_HORIZONTAL_MARKERS, MAX_SAMPLES,
};
use crate::samples::Samples;

/// Knobs that change what a resampled series looks like.
#[derive(Debug, Clone, PartialEq)]
pub struct ResampleOptions {
    /// Centred three-point moving average over the curve values.
    pub smoothing: bool,
    pub currency_symbol: String,
    /// `strftime` pattern for the time-axis markers.
    pub month_format: String,
}

impl Default for ResampleOptions {
    fn default() -> Self {
        Self {
            smoothing: false,
            currency_symbol: "€".to_string(),
            month_format: "%b %y".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct RawPoint {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    value: f64,
}

/// Turn a car's events (oldest first) into a bounded series for `kind`.
///
/// Fails with [`FuelError::NoData`] when fewer than two points result.
pub fn resample(
    kind: StatisticKind,
    car: &Car,
    events: &[FuelEvent],
    options: &ResampleOptions,
) -> Result<SampledSeries> {
    let (raw, average) = match kind {
        StatisticKind::AverageConsumption => consumption_points(car, events),
        StatisticKind::PriceAmount => price_amount_points(car, events),
        StatisticKind::PriceDistance => price_distance_points(car, events),
    };

    if raw.len() < 2 {
        return Err(FuelError::NoData);
    }

    let mut points = if raw.len() > MAX_SAMPLES { bin(&raw) } else { raw };
    if options.smoothing {
        smooth(&mut points);
    }

    let first = points[0].start;
    let last = points.iter().map(|p| p.end).max().unwrap_or(first);
    let span = (last - first).num_milliseconds().max(1) as f64;

    let (lo, hi) = value_range(&points);
    let norm = |v: f64| ((v - lo) / (hi - lo)).clamp(0.0, 1.0);

    let samples = points.iter().map(|p| SamplePoint {
        curve: CurvePoint {
            x: (p.end - first).num_milliseconds() as f64 / span,
            y: norm(p.value),
        },
        lens: LensSample { start: p.start, end: p.end, value: p.value },
    });

    let decimals = kind.decimals();
    let horizontal = (0..MAX_HORIZONTAL_MARKERS).map(|i| {
        let position = (i as f64 + 0.5) / MAX_HORIZONTAL_MARKERS as f64;
        Marker {
            position,
            label: format_value(lo + (hi - lo) * position, decimals, ""),
        }
    });

    let mut vertical: Vec<Marker> = Vec::new();
    for position in [0.0, 0.5, 1.0] {
        let t = first + chrono::Duration::milliseconds((span * position) as i64);
        let label = format_local_date(t, &options.month_format);
        if vertical.last().map(|m| &m.label) != Some(&label) {
            vertical.push(Marker { position, label });
        }
    }

    Ok(SampledSeries {
        kind,
        unit: unit_label(kind, car, &options.currency_symbol),
        average,
        average_position: average.map(norm),
        first,
        last,
        points: Samples::truncating(samples),
        horizontal_markers: Samples::truncating(horizontal),
        vertical_markers: Samples::truncating(vertical),
    })
}

fn unit_label(kind: StatisticKind, car: &Car, currency: &str) -> String {
    match kind {
        StatisticKind::AverageConsumption => car.consumption_unit.symbol().to_string(),
        StatisticKind::PriceAmount => format!("{currency}/{}", car.fuel_unit.symbol()),
        StatisticKind::PriceDistance => format!("{currency}/100{}", car.odometer_unit.symbol()),
    }
}

fn to_f64(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

/// One point per full fill-up, covering the stretch since the previous one.
fn consumption_points(car: &Car, events: &[FuelEvent]) -> (Vec<RawPoint>, Option<f64>) {
    let unit = car.consumption_unit;
    let mut points = Vec::new();
    let mut total_km = Decimal::ZERO;
    let mut total_l = Decimal::ZERO;
    let mut previous_full: Option<DateTime<Utc>> = None;

    for event in events.iter().filter(|e| e.filled_up) {
        let km = event.distance + event.inherited_distance;
        let liters = event.fuel_volume + event.inherited_fuel_volume;
        if km > Decimal::ZERO && liters > Decimal::ZERO {
            total_km += km;
            total_l += liters;
            points.push(RawPoint {
                start: previous_full.unwrap_or(event.timestamp),
                end: event.timestamp,
                value: to_f64(unit.consumption(km, liters)),
            });
        }
        previous_full = Some(event.timestamp);
    }

    let average = (total_km > Decimal::ZERO && total_l > Decimal::ZERO)
        .then(|| to_f64(unit.consumption(total_km, total_l)));
    (points, average)
}

/// One point per event: the price paid per unit of fuel.
fn price_amount_points(car: &Car, events: &[FuelEvent]) -> (Vec<RawPoint>, Option<f64>) {
    let unit = car.fuel_unit;
    let mut points = Vec::new();
    let mut total_cost = Decimal::ZERO;
    let mut total_l = Decimal::ZERO;

    for event in events.iter().filter(|e| e.fuel_volume > Decimal::ZERO) {
        total_cost += event.cost();
        total_l += event.fuel_volume;
        points.push(RawPoint {
            start: event.timestamp,
            end: event.timestamp,
            value: to_f64(unit.price_per_unit(event.price)),
        });
    }

    let volume = unit.from_liters(total_l);
    let average = (volume > Decimal::ZERO).then(|| to_f64(total_cost / volume));
    (points, average)
}

/// One point per full fill-up: money spent per 100 distance units.
fn price_distance_points(car: &Car, events: &[FuelEvent]) -> (Vec<RawPoint>, Option<f64>) {
    let unit = car.odometer_unit;
    let mut points = Vec::new();
    let mut total_cost = Decimal::ZERO;
    let mut total_distance = Decimal::ZERO;
    let mut previous_full: Option<DateTime<Utc>> = None;

    for event in events.iter().filter(|e| e.filled_up) {
        let cost = event.cost() + event.inherited_cost;
        let distance = unit.from_kilometers(event.distance + event.inherited_distance);
        if distance > Decimal::ZERO {
            total_cost += cost;
            total_distance += distance;
            points.push(RawPoint {
                start: previous_full.unwrap_or(event.timestamp),
                end: event.timestamp,
                value: to_f64(cost * Decimal::ONE_HUNDRED / distance),
            });
        }
        previous_full = Some(event.timestamp);
    }

    let average = (total_distance > Decimal::ZERO)
        .then(|| to_f64(total_cost * Decimal::ONE_HUNDRED / total_distance));
    (points, average)
}

/// Collapse `points` into at most [`MAX_SAMPLES`] equal-width time buckets.
fn bin(points: &[RawPoint]) -> Vec<RawPoint> {
    let first = points[0].end;
    let last = points[points.len() - 1].end;
    let span = (last - first).num_milliseconds().max(1) as f64;

    let mut buckets: Vec<Option<(RawPoint, f64, u32)>> = vec![None; MAX_SAMPLES];
    for p in points {
        let offset = (p.end - first).num_milliseconds() as f64 / span;
        let idx = ((offset * MAX_SAMPLES as f64) as usize).min(MAX_SAMPLES - 1);
        match buckets[idx].as_mut() {
            Some((acc, sum, n)) => {
                acc.start = acc.start.min(p.start);
                acc.end = acc.end.max(p.end);
                *sum += p.value;
                *n += 1;
            }
            None => buckets[idx] = Some((*p, p.value, 1)),
        }
    }

    buckets
        .into_iter()
        .flatten()
        .map(|(acc, sum, n)| RawPoint { value: sum / f64::from(n), ..acc })
        .collect()
}

fn smooth(points: &mut [RawPoint]) {
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    for (i, p) in points.iter_mut().enumerate() {
        let lo = i.saturating_sub(1);
        let hi = (i + 1).min(values.len() - 1);
        let window = &values[lo..=hi];
        p.value = window.iter().sum::<f64>() / window.len() as f64;
    }
}

/// Padded value range so the curve never touches the chart edges.
fn value_range(points: &[RawPoint]) -> (f64, f64) {
    let min = points.iter().map(|p| p.value).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.value).fold(f64::NEG_INFINITY, f64::max);
    let pad = if max > min { (max - min) * 0.1 } else { (max.abs() * 0.1).max(0.5) };
    (min - pad, max + pad)
}
