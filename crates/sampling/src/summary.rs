use chrono::{DateTime, Utc};
use fuel_core::{Car, FuelEvent};
use rust_decimal::Decimal;

/// Totals and ratios over a set of events, as shown on the textual statistics page.
///
/// Distances are kept in kilometers and volumes in liters; the ratio helpers
/// convert into the car's display units.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelSummary {
    pub first_date: DateTime<Utc>,
    pub last_date: DateTime<Utc>,
    pub total_cost: Decimal,
    pub total_distance: Decimal,
    pub total_fuel_volume: Decimal,
    pub fillups: usize,
    pub full_fillups: usize,
    /// Zero when the totals do not allow a consumption figure.
    pub average_consumption: Decimal,
    pub best_consumption: Option<Decimal>,
    pub worst_consumption: Option<Decimal>,
}

impl FuelSummary {
    /// Summarise `events`; `None` when there are none.
    pub fn compute(car: &Car, events: &[FuelEvent]) -> Option<Self> {
        let first = events.iter().map(|e| e.timestamp).min()?;
        let last = events.iter().map(|e| e.timestamp).max()?;

        let unit = car.consumption_unit;
        let mut summary = Self {
            first_date: first,
            last_date: last,
            total_cost: Decimal::ZERO,
            total_distance: Decimal::ZERO,
            total_fuel_volume: Decimal::ZERO,
            fillups: events.len(),
            full_fillups: 0,
            average_consumption: Decimal::ZERO,
            best_consumption: None,
            worst_consumption: None,
        };

        let better = |a: Decimal, b: Decimal| if unit.is_efficiency() { a.max(b) } else { a.min(b) };
        let worse = |a: Decimal, b: Decimal| if unit.is_efficiency() { a.min(b) } else { a.max(b) };

        for event in events {
            summary.total_cost += event.cost();
            summary.total_distance += event.distance;
            summary.total_fuel_volume += event.fuel_volume;

            if !event.filled_up {
                continue;
            }
            let consumption = unit.consumption(
                event.distance + event.inherited_distance,
                event.fuel_volume + event.inherited_fuel_volume,
            );
            summary.best_consumption = Some(summary.best_consumption.map_or(consumption, |b| better(b, consumption)));
            summary.worst_consumption = Some(summary.worst_consumption.map_or(consumption, |w| worse(w, consumption)));
            summary.full_fillups += 1;
        }

        summary.average_consumption = unit.consumption(summary.total_distance, summary.total_fuel_volume);
        Some(summary)
    }

    /// Calendar days between the first and the last event.
    pub fn days(&self) -> i64 {
        (self.last_date.date_naive() - self.first_date.date_naive()).num_days()
    }

    pub fn volume_per_event(&self, car: &Car) -> Option<Decimal> {
        per(car.fuel_unit.from_liters(self.total_fuel_volume), Decimal::from(self.fillups))
    }

    pub fn cost_per_distance(&self, car: &Car) -> Option<Decimal> {
        per(self.total_cost, car.odometer_unit.from_kilometers(self.total_distance))
    }

    pub fn cost_per_volume(&self, car: &Car) -> Option<Decimal> {
        per(self.total_cost, car.fuel_unit.from_liters(self.total_fuel_volume))
    }

    pub fn cost_per_day(&self) -> Option<Decimal> {
        per(self.total_cost, Decimal::from(self.days()))
    }

    pub fn cost_per_event(&self) -> Option<Decimal> {
        per(self.total_cost, Decimal::from(self.fillups))
    }

    pub fn distance_per_event(&self, car: &Car) -> Option<Decimal> {
        per(car.odometer_unit.from_kilometers(self.total_distance), Decimal::from(self.fillups))
    }

    pub fn distance_per_day(&self, car: &Car) -> Option<Decimal> {
        per(car.odometer_unit.from_kilometers(self.total_distance), Decimal::from(self.days()))
    }

    pub fn distance_per_money(&self, car: &Car) -> Option<Decimal> {
        per(car.odometer_unit.from_kilometers(self.total_distance), self.total_cost)
    }

    /// Label/value rows in display order; missing ratios show as `"-"`.
    pub fn rows(&self, car: &Car, currency: &str) -> Vec<(String, String)> {
        let dist = car.odometer_unit.symbol();
        let vol = car.fuel_unit.symbol();
        let cons = car.consumption_unit.symbol();
        let efficiency = car.consumption_unit.is_efficiency();

        let money = |d: Decimal| format!("{} {currency}", d.round_dp(2));
        let show = |v: Option<Decimal>, f: &dyn Fn(Decimal) -> String| v.map_or_else(|| "-".to_string(), f);

        vec![
            ("days".into(), self.days().to_string()),
            (
                if efficiency { "avg efficiency" } else { "avg consumption" }.into(),
                format!("{} {cons}", self.average_consumption.round_dp(2)),
            ),
            (
                if efficiency { "max efficiency" } else { "min consumption" }.into(),
                show(self.best_consumption, &|d: Decimal| format!("{} {cons}", d.round_dp(2))),
            ),
            (
                if efficiency { "min efficiency" } else { "max consumption" }.into(),
                show(self.worst_consumption, &|d: Decimal| format!("{} {cons}", d.round_dp(2))),
            ),
            ("total cost".into(), money(self.total_cost)),
            (
                "total distance".into(),
                format!("{} {dist}", car.odometer_unit.from_kilometers(self.total_distance).round_dp(0)),
            ),
            (
                "total volume".into(),
                format!("{} {vol}", car.fuel_unit.from_liters(self.total_fuel_volume).round_dp(2)),
            ),
            ("fill-ups".into(), self.fillups.to_string()),
            ("volume per fill-up".into(), show(self.volume_per_event(car), &|d: Decimal| format!("{} {vol}", d.round_dp(2)))),
            (
                format!("cost per {dist}"),
                show(self.cost_per_distance(car), &|d: Decimal| format!("{} {currency}/{dist}", d.round_dp(3))),
            ),
            (
                format!("cost per {vol}"),
                show(self.cost_per_volume(car), &|d: Decimal| format!("{} {currency}/{vol}", d.round_dp(3))),
            ),
            ("cost per day".into(), show(self.cost_per_day(), &money)),
            ("cost per fill-up".into(), show(self.cost_per_event(), &money)),
            (
                format!("{dist} per fill-up"),
                show(self.distance_per_event(car), &|d: Decimal| format!("{} {dist}", d.round_dp(1))),
            ),
            (format!("{dist} per day"), show(self.distance_per_day(car), &|d: Decimal| format!("{} {dist}", d.round_dp(1)))),
            (
                format!("{dist} per {currency}"),
                show(self.distance_per_money(car), &|d: Decimal| format!("{} {dist}", d.round_dp(2))),
            ),
        ]
    }
}

fn per(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    (denominator > Decimal::ZERO).then(|| numerator / denominator)
}
