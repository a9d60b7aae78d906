use chrono::{DateTime, Months, Utc};
use fuel_config::StatsConfig;
use fuel_core::{CarId, FuelError, Result, StatisticKind};
use fuel_renderer::{render_chart, ChartLayout};
use fuel_sampling::{resample, ResampleOptions, SamplingData};
use fuel_store::FuelStore;
use fuel_theme::Theme;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Everything that shapes a chart apart from the archive contents.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSettings {
    pub options: ResampleOptions,
    pub theme: Theme,
    pub layout: ChartLayout,
    /// `strftime` pattern for the interval dates in the labels.
    pub date_format: String,
}

impl ChartSettings {
    pub fn from_config(config: &StatsConfig) -> Self {
        Self {
            options: ResampleOptions {
                smoothing: config.display.smoothing,
                currency_symbol: config.display.currency_symbol.clone(),
                month_format: config.display.month_format.clone(),
            },
            theme: Theme::from_config(&config.theme),
            layout: ChartLayout::from_config(&config.display),
            date_format: config.display.date_format.clone(),
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self::from_config(&StatsConfig::default())
    }
}

/// One unit of work handed to a [`StatisticsSource`].
#[derive(Debug, Clone, PartialEq)]
pub struct ComputeRequest {
    pub kind: StatisticKind,
    pub car: CarId,
    pub months: u32,
    pub options: ResampleOptions,
    pub theme: Theme,
    pub layout: ChartLayout,
}

/// Produces chart content.  Called off the controller's task, possibly
/// several times concurrently.
pub trait StatisticsSource: Send + Sync + 'static {
    fn compute(&self, request: &ComputeRequest) -> Result<SamplingData>;
}

/// [`StatisticsSource`] reading straight from a shared [`FuelStore`].
#[derive(Debug, Clone)]
pub struct StoreSource {
    store: Arc<RwLock<FuelStore>>,
}

impl StoreSource {
    pub fn new(store: Arc<RwLock<FuelStore>>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<RwLock<FuelStore>> {
        &self.store
    }
}

impl StatisticsSource for StoreSource {
    fn compute(&self, request: &ComputeRequest) -> Result<SamplingData> {
        let series = {
            let store = self
                .store
                .read()
                .map_err(|_| FuelError::Store("archive lock poisoned".into()))?;

            let car = store.car(request.car)?;
            let latest = store.latest_event_time(request.car)?.ok_or(FuelError::NoData)?;
            let cutoff = months_before(latest, request.months);
            let events = store.events_since(request.car, cutoff)?;

            debug!(
                "Resampling {} events of {} for {} ({} months)",
                events.len(),
                request.car,
                request.kind,
                request.months
            );
            resample(request.kind, car, events, &request.options)?
        };

        let image = render_chart(&series, &request.theme, request.layout)?;
        SamplingData::new(image, series)
    }
}

/// Start of a window of `months` calendar months ending at `latest`.
fn months_before(latest: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    latest
        .checked_sub_months(Months::new(months))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
