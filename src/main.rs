//! fuelstats: statistics pages for a fuel log, driven headless.
//!
//! Builds a demo archive, then plays a short scripted session against the
//! statistics pages while the config file is watched for changes.
//!
//! Run with:  `RUST_LOG=debug fuelstats [path/to/fuelstats.toml]`

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use fuel_core::{Car, CarId, ConsumptionUnit, DistanceUnit, Message, StatisticKind, VolumeUnit, ZoomGesture};
use fuel_controller::{StatisticsPages, StoreSource};
use fuel_sampling::FuelSummary;
use rust_decimal::Decimal;
use fuel_store::{add_demo_events, FuelStore, NewEvent};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Pause between scripted inputs so computations can land in between.
const STEP: std::time::Duration = std::time::Duration::from_millis(150);

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("fuelstats v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(fuel_config::default_path);
    let config = fuel_config::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    let (store, cars) = demo_archive().context("building demo archive")?;
    log_summaries(&store, &cars, &config.display.currency_symbol)?;

    let source = Arc::new(StoreSource::new(Arc::clone(&store)));
    let (pages, completions) = StatisticsPages::new(source, &config);
    let pages = pages.with_config_path(&config_path);

    let (tx, rx) = mpsc::channel(32);
    let _watcher = fuel_config::ConfigWatcher::spawn(&config_path, tx.clone());
    spawn_memory_pressure(tx.clone());
    tokio::spawn(script(tx, store, cars));

    fuel_controller::run(pages, rx, completions, log_view).await;
    Ok(())
}

/// Two cars with a year and a half of history each.
fn demo_archive() -> Result<(Arc<RwLock<FuelStore>>, Vec<CarId>)> {
    let mut store = FuelStore::new();
    let start = Utc::now() - Duration::days(540);

    let golf = store.add_car(Car::new(CarId(0), "Golf", "B-FS 2024"));
    let mustang = store.add_car(Car {
        odometer_unit: DistanceUnit::StatuteMile,
        fuel_unit: VolumeUnit::GallonUs,
        consumption_unit: ConsumptionUnit::MilesPerGallonUs,
        ..Car::new(CarId(0), "Mustang", "FUEL-42")
    });

    add_demo_events(&mut store, golf, start, 70)?;
    add_demo_events(&mut store, mustang, start, 55)?;
    Ok((Arc::new(RwLock::new(store)), vec![golf, mustang]))
}

fn log_summaries(store: &RwLock<FuelStore>, cars: &[CarId], currency: &str) -> Result<()> {
    let store = store
        .read()
        .map_err(|_| anyhow::anyhow!("archive lock poisoned"))?;
    for &id in cars {
        let car = store.car(id)?;
        let Some(summary) = FuelSummary::compute(car, store.events(id)?) else {
            continue;
        };
        info!("── {} ({}) ──", car.name, car.number_plate);
        for (label, value) in summary.rows(car, currency) {
            info!("{label:>20}: {value}");
        }
    }
    Ok(())
}

/// A user flicking through the pages, logging one more fill-up halfway.
async fn script(tx: mpsc::Sender<Message>, store: Arc<RwLock<FuelStore>>, cars: Vec<CarId>) {
    let steps = [
        Message::CarSelected(cars.first().copied()),
        Message::Zoom(ZoomGesture::Began(0.25)),
        Message::Zoom(ZoomGesture::Changed(0.75)),
        Message::Zoom(ZoomGesture::Ended),
        Message::PageSelected(StatisticKind::PriceAmount),
        Message::CheckboxToggled,
        Message::MonthsChanged(12),
        Message::PageSelected(StatisticKind::PriceDistance),
        Message::CarSelected(cars.get(1).copied()),
        Message::PageSelected(StatisticKind::AverageConsumption),
        Message::MemoryPressure,
        Message::Shutdown,
    ];

    for (i, message) in steps.into_iter().enumerate() {
        tokio::time::sleep(STEP).await;
        if i == 7 {
            if let Some(&car) = cars.first() {
                match log_fill_up(&store, car) {
                    Ok(()) => {
                        if tx.send(Message::ArchiveChanged(car)).await.is_err() {
                            return;
                        }
                    }
                    Err(e) => warn!("Cannot add fill-up: {e:#}"),
                }
            }
        }
        if tx.send(message).await.is_err() {
            return;
        }
    }
}

fn log_fill_up(store: &RwLock<FuelStore>, car: CarId) -> Result<()> {
    let mut store = store
        .write()
        .map_err(|_| anyhow::anyhow!("archive lock poisoned"))?;
    let latest = store.latest_event_time(car)?.unwrap_or_else(Utc::now);
    store.add_event(
        car,
        NewEvent {
            timestamp: latest + Duration::days(3),
            distance: Decimal::from(512),
            fuel_volume: Decimal::new(3480, 2),
            price: Decimal::new(1749, 3),
            filled_up: true,
            comment: Some("scripted".into()),
        },
        false,
    )?;
    Ok(())
}

/// SIGUSR1 stands in for the platform's low-memory notification.
#[cfg(unix)]
fn spawn_memory_pressure(tx: mpsc::Sender<Message>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut usr1 = match signal(SignalKind::user_defined1()) {
            Ok(s) => s,
            Err(e) => {
                warn!("Cannot listen for SIGUSR1: {e}");
                return;
            }
        };
        while usr1.recv().await.is_some() {
            if tx.send(Message::MemoryPressure).await.is_err() {
                break;
            }
        }
    });
}

#[cfg(not(unix))]
fn spawn_memory_pressure(_tx: mpsc::Sender<Message>) {}

fn log_view(pages: &StatisticsPages) {
    let page = pages.visible();
    let view = page.view();
    info!(
        page = %page.kind(),
        phase = ?page.phase(),
        busy = view.activity,
        "{} | {} | {}",
        view.left_label,
        view.center_label,
        view.right_label
    );
}
