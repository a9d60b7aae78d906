use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::units::{ConsumptionUnit, DistanceUnit, VolumeUnit};

/// Opaque handle of a car inside the fuel archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CarId(pub u32);

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "car#{}", self.0)
    }
}

/// A car together with the units its owner prefers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: CarId,
    pub name: String,
    pub number_plate: String,
    pub odometer_unit: DistanceUnit,
    pub fuel_unit: VolumeUnit,
    pub consumption_unit: ConsumptionUnit,
    /// Odometer reading in kilometers.
    pub odometer: Decimal,
    /// Sum of all event distances in kilometers.
    pub distance_total: Decimal,
    /// Sum of all event fuel volumes in liters.
    pub fuel_volume_total: Decimal,
}

impl Car {
    pub fn new(id: CarId, name: impl Into<String>, number_plate: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            number_plate: number_plate.into(),
            odometer_unit: DistanceUnit::Kilometer,
            fuel_unit: VolumeUnit::Liter,
            consumption_unit: ConsumptionUnit::LitersPer100Km,
            odometer: Decimal::ZERO,
            distance_total: Decimal::ZERO,
            fuel_volume_total: Decimal::ZERO,
        }
    }
}

/// One refuelling stop.  All quantities are stored in SI-ish units
/// (kilometers, liters, price per liter) regardless of the car's display units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelEvent {
    pub timestamp: DateTime<Utc>,
    /// Distance driven since the previous event.
    pub distance: Decimal,
    pub fuel_volume: Decimal,
    /// Price per liter.
    pub price: Decimal,
    /// `false` marks a partial fill-up whose numbers are carried to the next full one.
    pub filled_up: bool,
    pub inherited_distance: Decimal,
    pub inherited_fuel_volume: Decimal,
    pub inherited_cost: Decimal,
    pub comment: Option<String>,
}

impl FuelEvent {
    pub fn new(
        timestamp: DateTime<Utc>,
        distance: Decimal,
        fuel_volume: Decimal,
        price: Decimal,
        filled_up: bool,
    ) -> Self {
        Self {
            timestamp,
            distance,
            fuel_volume,
            price,
            filled_up,
            inherited_distance: Decimal::ZERO,
            inherited_fuel_volume: Decimal::ZERO,
            inherited_cost: Decimal::ZERO,
            comment: None,
        }
    }

    /// Money spent on this event alone.
    #[must_use]
    pub fn cost(&self) -> Decimal {
        self.fuel_volume * self.price
    }
}

/// Which derived metric a statistics page displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatisticKind {
    AverageConsumption,
    PriceAmount,
    PriceDistance,
}

impl StatisticKind {
    pub const ALL: [StatisticKind; 3] = [
        StatisticKind::AverageConsumption,
        StatisticKind::PriceAmount,
        StatisticKind::PriceDistance,
    ];

    /// Short identifier used in logs and on the command line.
    pub fn id(self) -> &'static str {
        match self {
            StatisticKind::AverageConsumption => "consumption",
            StatisticKind::PriceAmount => "price-amount",
            StatisticKind::PriceDistance => "price-distance",
        }
    }

    /// Position in [`StatisticKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            StatisticKind::AverageConsumption => 0,
            StatisticKind::PriceAmount => 1,
            StatisticKind::PriceDistance => 2,
        }
    }

    /// Number of decimal places used when labelling values of this kind.
    pub fn decimals(self) -> usize {
        match self {
            StatisticKind::AverageConsumption => 2,
            StatisticKind::PriceAmount => 3,
            StatisticKind::PriceDistance => 2,
        }
    }
}

impl fmt::Display for StatisticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn event_cost_is_volume_times_price() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let event = FuelEvent::new(ts, dec!(600), dec!(40), dec!(1.75), true);
        assert_eq!(event.cost(), dec!(70.00));
    }

    #[test]
    fn kinds_have_distinct_ids() {
        let ids: std::collections::HashSet<_> = StatisticKind::ALL.iter().map(|k| k.id()).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn index_matches_all() {
        for (i, kind) in StatisticKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }
}
