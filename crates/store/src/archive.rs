use chrono::{DateTime, Utc};
use fuel_core::{Car, CarId, FuelError, FuelEvent, Result};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::debug;

/// A refuelling stop as entered by the user, in the car's display units.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub timestamp: DateTime<Utc>,
    /// Distance in the car's odometer unit.
    pub distance: Decimal,
    /// Volume in the car's fuel unit.
    pub fuel_volume: Decimal,
    /// Price per unit of the car's fuel unit.
    pub price: Decimal,
    pub filled_up: bool,
    pub comment: Option<String>,
}

#[derive(Debug, Clone)]
struct CarRecord {
    car: Car,
    /// Sorted by timestamp, oldest first; timestamps are unique.
    events: Vec<FuelEvent>,
}

/// In-memory fuel archive.
///
/// Partial fill-ups carry their distance, volume and cost forward: every
/// event remembers what the partial events directly before it contributed
/// (`inherited_*`), so a full fill-up can report the consumption of the
/// whole stretch since the previous full fill-up.
#[derive(Debug, Clone, Default)]
pub struct FuelStore {
    cars: BTreeMap<CarId, CarRecord>,
    next_id: u32,
}

impl FuelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a car; `template.id` is ignored and a fresh id assigned.
    pub fn add_car(&mut self, template: Car) -> CarId {
        self.next_id += 1;
        let id = CarId(self.next_id);
        let car = Car { id, ..template };
        debug!("Added {id} ({})", car.name);
        self.cars.insert(id, CarRecord { car, events: Vec::new() });
        id
    }

    pub fn remove_car(&mut self, id: CarId) -> Result<Car> {
        self.cars
            .remove(&id)
            .map(|r| r.car)
            .ok_or(FuelError::UnknownCar(id))
    }

    pub fn car(&self, id: CarId) -> Result<&Car> {
        self.record(id).map(|r| &r.car)
    }

    pub fn cars(&self) -> impl Iterator<Item = &Car> {
        self.cars.values().map(|r| &r.car)
    }

    /// All events of a car, oldest first.
    pub fn events(&self, id: CarId) -> Result<&[FuelEvent]> {
        self.record(id).map(|r| r.events.as_slice())
    }

    /// Events at or after `cutoff`, oldest first.
    pub fn events_since(&self, id: CarId, cutoff: DateTime<Utc>) -> Result<&[FuelEvent]> {
        let events = self.events(id)?;
        let start = events.partition_point(|e| e.timestamp < cutoff);
        Ok(&events[start..])
    }

    pub fn latest_event_time(&self, id: CarId) -> Result<Option<DateTime<Utc>>> {
        Ok(self.events(id)?.last().map(|e| e.timestamp))
    }

    /// Insert a new event and update inherited values, totals and odometer.
    pub fn add_event(&mut self, id: CarId, input: NewEvent, force_odometer_update: bool) -> Result<()> {
        let record = self.record_mut(id)?;
        let car = &mut record.car;

        let liters = car.fuel_unit.to_liters(input.fuel_volume);
        let kilometers = car.odometer_unit.to_kilometers(input.distance);
        let price_per_liter = if liters.is_zero() {
            Decimal::ZERO
        } else {
            input.price * input.fuel_volume / liters
        };

        let pos = match record.events.binary_search_by(|e| e.timestamp.cmp(&input.timestamp)) {
            Ok(_) => {
                return Err(FuelError::Store(format!(
                    "{id} already has an event at {}",
                    input.timestamp
                )))
            }
            Err(pos) => pos,
        };

        // Inherit from an older partial fill-up.
        let mut event = FuelEvent::new(input.timestamp, kilometers, liters, price_per_liter, input.filled_up);
        event.comment = input.comment;
        if let Some(older) = pos.checked_sub(1).map(|i| &record.events[i]) {
            if !older.filled_up {
                event.inherited_cost = older.cost() + older.inherited_cost;
                event.inherited_distance = older.distance + older.inherited_distance;
                event.inherited_fuel_volume = older.fuel_volume + older.inherited_fuel_volume;
            }
        }

        // Younger events up to the next full fill-up see the new one.
        let mut force = force_odometer_update;
        if pos < record.events.len() {
            let (d_cost, d_distance, d_volume) = if event.filled_up {
                (-event.inherited_cost, -event.inherited_distance, -event.inherited_fuel_volume)
            } else {
                (event.cost(), event.distance, event.fuel_volume)
            };
            for younger in &mut record.events[pos..] {
                younger.inherited_cost = (younger.inherited_cost + d_cost).max(Decimal::ZERO);
                younger.inherited_distance = (younger.inherited_distance + d_distance).max(Decimal::ZERO);
                younger.inherited_fuel_volume =
                    (younger.inherited_fuel_volume + d_volume).max(Decimal::ZERO);
                if younger.filled_up {
                    break;
                }
            }
        } else {
            force = true;
        }

        if !force && car.odometer <= car.distance_total {
            force = true;
        }

        car.distance_total += kilometers;
        car.fuel_volume_total += liters;
        if force {
            car.odometer = (car.odometer + kilometers).max(car.distance_total);
        }

        record.events.insert(pos, event);
        Ok(())
    }

    /// Remove the event at `timestamp`, undoing its effect on younger events.
    pub fn remove_event(
        &mut self,
        id: CarId,
        timestamp: DateTime<Utc>,
        force_odometer_update: bool,
    ) -> Result<FuelEvent> {
        let record = self.record_mut(id)?;
        let pos = record
            .events
            .binary_search_by(|e| e.timestamp.cmp(&timestamp))
            .map_err(|_| FuelError::Store(format!("{id} has no event at {timestamp}")))?;
        let event = record.events.remove(pos);

        let mut force = force_odometer_update;
        if pos < record.events.len() {
            let younger = &mut record.events[pos..];
            if event.filled_up {
                // Hand our inherited values on to the next stretch.
                let carried = event.inherited_cost > Decimal::ZERO
                    || event.inherited_distance > Decimal::ZERO
                    || event.inherited_fuel_volume > Decimal::ZERO;
                if carried {
                    for y in younger {
                        y.inherited_cost += event.inherited_cost;
                        y.inherited_distance += event.inherited_distance;
                        y.inherited_fuel_volume += event.inherited_fuel_volume;
                        if y.filled_up {
                            break;
                        }
                    }
                }
            } else {
                for y in younger {
                    y.inherited_cost = (y.inherited_cost - event.cost()).max(Decimal::ZERO);
                    y.inherited_distance = (y.inherited_distance - event.distance).max(Decimal::ZERO);
                    y.inherited_fuel_volume =
                        (y.inherited_fuel_volume - event.fuel_volume).max(Decimal::ZERO);
                    if y.filled_up {
                        break;
                    }
                }
            }
        } else {
            force = true;
        }

        let car = &mut record.car;
        if !force && car.odometer <= car.distance_total {
            force = true;
        }

        car.distance_total = (car.distance_total - event.distance).max(Decimal::ZERO);
        car.fuel_volume_total = (car.fuel_volume_total - event.fuel_volume).max(Decimal::ZERO);
        if force {
            car.odometer = (car.odometer - event.distance).max(Decimal::ZERO);
        }

        Ok(event)
    }

    fn record(&self, id: CarId) -> Result<&CarRecord> {
        self.cars.get(&id).ok_or(FuelError::UnknownCar(id))
    }

    fn record_mut(&mut self, id: CarId) -> Result<&mut CarRecord> {
        self.cars.get_mut(&id).ok_or(FuelError::UnknownCar(id))
    }
}
