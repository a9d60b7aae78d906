//! Mapping touch positions to lens entries.
//!
//! A time inside one or more lens intervals selects the latest of them, so a
//! time sitting exactly on the boundary shared by two neighbouring intervals
//! belongs to the later one.  A time outside every interval selects the entry
//! with the nearest boundary; equal distances again favour the later entry.

use chrono::{DateTime, Duration, Utc};

use crate::record::{LensSample, SampledSeries};

impl SampledSeries {
    /// Time under a horizontal chart position in `[0, 1]` (clamped).
    pub fn time_at(&self, position: f64) -> DateTime<Utc> {
        let position = if position.is_nan() { 0.0 } else { position.clamp(0.0, 1.0) };
        let span = (self.last - self.first).num_milliseconds() as f64;
        self.first + Duration::milliseconds((span * position).round() as i64)
    }

    /// Index of the lens entry describing the curve at `t`.
    pub fn lens_index_at(&self, t: DateTime<Utc>) -> Option<usize> {
        lens_index(self.lens(), t)
    }

    pub fn lens_at_position(&self, position: f64) -> Option<&LensSample> {
        let idx = self.lens_index_at(self.time_at(position))?;
        self.points.get(idx).map(|p| &p.lens)
    }
}

fn lens_index<'a>(lens: impl Iterator<Item = &'a LensSample>, t: DateTime<Utc>) -> Option<usize> {
    let mut containing = None;
    let mut nearest: Option<(usize, Duration)> = None;

    for (i, sample) in lens.enumerate() {
        if sample.contains(t) {
            containing = Some(i);
            continue;
        }
        let distance = if t < sample.start { sample.start - t } else { t - sample.end };
        match nearest {
            Some((_, best)) if distance > best => {}
            _ => nearest = Some((i, distance)),
        }
    }

    containing.or(nearest.map(|(i, _)| i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CurvePoint, SamplePoint};
    use crate::samples::Samples;
    use chrono::TimeZone;
    use fuel_core::StatisticKind;

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap() + Duration::days(n)
    }

    fn series(intervals: &[(i64, i64, f64)]) -> SampledSeries {
        let points = intervals
            .iter()
            .map(|&(s, e, v)| SamplePoint {
                curve: CurvePoint { x: 0.0, y: 0.0 },
                lens: LensSample { start: day(s), end: day(e), value: v },
            })
            .collect();
        SampledSeries {
            kind: StatisticKind::AverageConsumption,
            unit: String::new(),
            average: None,
            average_position: None,
            first: day(intervals[0].0),
            last: day(intervals[intervals.len() - 1].1),
            points: Samples::try_from_vec(points).unwrap(),
            horizontal_markers: Samples::new(),
            vertical_markers: Samples::new(),
        }
    }

    #[test]
    fn time_inside_an_interval_selects_it() {
        let s = series(&[(0, 10, 1.0), (10, 20, 2.0), (20, 30, 3.0)]);
        assert_eq!(s.lens_index_at(day(15)), Some(1));
    }

    #[test]
    fn shared_boundary_prefers_the_later_interval() {
        let s = series(&[(0, 10, 1.0), (10, 20, 2.0), (20, 30, 3.0)]);
        assert_eq!(s.lens_index_at(day(10)), Some(1));
        assert_eq!(s.lens_index_at(day(20)), Some(2));
    }

    #[test]
    fn gaps_pick_the_nearest_entry() {
        let s = series(&[(0, 0, 1.0), (10, 10, 2.0), (20, 20, 3.0)]);
        assert_eq!(s.lens_index_at(day(3)), Some(0));
        assert_eq!(s.lens_index_at(day(7)), Some(1));
        // Equidistant: later wins.
        assert_eq!(s.lens_index_at(day(15)), Some(2));
    }

    #[test]
    fn positions_are_clamped() {
        let s = series(&[(0, 10, 1.0), (10, 20, 2.0)]);
        assert_eq!(s.time_at(-3.0), day(0));
        assert_eq!(s.time_at(7.0), day(20));
        assert_eq!(s.lens_at_position(0.25).map(|l| l.value), Some(1.0));
        assert_eq!(s.lens_at_position(1.0).map(|l| l.value), Some(2.0));
    }
}
