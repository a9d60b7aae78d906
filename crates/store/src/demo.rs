use chrono::{DateTime, Duration, Utc};
use fuel_core::{CarId, Result};
use rust_decimal::Decimal;

use crate::archive::{FuelStore, NewEvent};

/// Fill `car` with `count` plausible refuelling stops starting at `start`.
///
/// The series is deterministic: stops are 6–13 days apart, every seventh one
/// is a partial fill-up and prices drift slowly upwards.
pub fn add_demo_events(store: &mut FuelStore, car: CarId, start: DateTime<Utc>, count: usize) -> Result<()> {
    let mut state: u32 = 0x2545_f491;
    let mut next = move || {
        // xorshift32
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state
    };

    let mut timestamp = start;
    for i in 0..count {
        let r = next();
        let partial = i % 7 == 6;

        let km = Decimal::from(420 + (r % 260)) + Decimal::new(i64::from(r % 10), 1);
        let liters_per_100 = Decimal::new(520 + i64::from(r % 180), 2);
        let mut liters = (km * liters_per_100 / Decimal::ONE_HUNDRED).round_dp(2);
        if partial {
            liters = (liters / Decimal::TWO).round_dp(2);
        }
        let price = Decimal::new(1_459 + (i as i64 % 60) + i64::from(r % 40), 3);

        store.add_event(
            car,
            NewEvent {
                timestamp,
                distance: if partial { (km / Decimal::TWO).round_dp(1) } else { km },
                fuel_volume: liters,
                price,
                filled_up: !partial,
                comment: None,
            },
            false,
        )?;

        timestamp += Duration::days(6 + i64::from(r % 8)) + Duration::minutes(i64::from(r % 600));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use fuel_core::Car;

    #[test]
    fn demo_series_is_ordered_and_complete() {
        let mut store = FuelStore::new();
        let id = store.add_car(Car::new(CarId(0), "Demo", "D-1"));
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        add_demo_events(&mut store, id, start, 200).unwrap();

        let events = store.events(id).unwrap();
        assert_eq!(events.len(), 200);
        assert!(events.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        assert!(events.iter().any(|e| !e.filled_up));
        assert!(events.iter().all(|e| e.fuel_volume > Decimal::ZERO));
    }
}
