//! Fixtures shared by the unit tests of this crate.

use chrono::{TimeZone, Utc};
use fuel_core::{Car, CarId, FuelError, Result, StatisticKind};
use fuel_sampling::SamplingData;
use fuel_store::{add_demo_events, FuelStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::source::{ChartSettings, ComputeRequest, StatisticsSource, StoreSource};

/// Archive with two cars of 60 demo events each.
pub fn demo_store() -> (Arc<RwLock<FuelStore>>, CarId, CarId) {
    let mut store = FuelStore::new();
    let start = Utc.with_ymd_and_hms(2023, 1, 1, 8, 0, 0).unwrap();
    let golf = store.add_car(Car::new(CarId(0), "Golf", "B-XY 123"));
    let polo = store.add_car(Car::new(CarId(0), "Polo", "M-AB 42"));
    add_demo_events(&mut store, golf, start, 60).unwrap();
    add_demo_events(&mut store, polo, start, 60).unwrap();
    (Arc::new(RwLock::new(store)), golf, polo)
}

pub fn sample_data() -> SamplingData {
    let (store, golf, _) = demo_store();
    let settings = ChartSettings::default();
    StoreSource::new(store)
        .compute(&ComputeRequest {
            kind: StatisticKind::AverageConsumption,
            car: golf,
            months: 6,
            options: settings.options,
            theme: settings.theme,
            layout: settings.layout,
        })
        .unwrap()
}

/// Store-backed source that counts its invocations.
pub struct CountingSource {
    inner: StoreSource,
    calls: AtomicUsize,
}

impl CountingSource {
    pub fn new(store: Arc<RwLock<FuelStore>>) -> Self {
        Self { inner: StoreSource::new(store), calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl StatisticsSource for CountingSource {
    fn compute(&self, request: &ComputeRequest) -> Result<SamplingData> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.compute(request)
    }
}

pub struct FailingSource;

impl StatisticsSource for FailingSource {
    fn compute(&self, _request: &ComputeRequest) -> Result<SamplingData> {
        Err(FuelError::Compute("archive unavailable".into()))
    }
}
