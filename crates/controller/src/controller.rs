//! One statistics page: cache, invalidation and the labels/image it shows.
//!
//! A controller is owned by a single task.  Computations run on the blocking
//! pool and come back as [`Completion`]s on a channel; the owner feeds them to
//! [`StatisticsController::handle_completion`].  A completion is committed only
//! if it was started under the current [`Generation`] and is still the request
//! on record for its key, so anything invalidated in between is dropped.

use fuel_core::{CarId, FuelError, Result, StatisticKind, ZoomGesture};
use fuel_sampling::{format_local_date, SamplingData};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cache::{CacheKey, ContentCache, Generation};
use crate::source::{ChartSettings, ComputeRequest, StatisticsSource};

/// Result of a background computation, tagged with what it was computed for.
#[derive(Debug)]
pub struct Completion {
    pub kind: StatisticKind,
    pub key: CacheKey,
    pub generation: Generation,
    pub result: Result<Arc<SamplingData>>,
}

/// Where the displayed entry currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayPhase {
    #[default]
    Uninitialized,
    /// Shown straight from the cache.
    CacheHit,
    /// Waiting for a computation.
    CacheMiss,
    /// Shown from a freshly committed computation.
    Computed,
    /// No car, or nothing to show for it.
    Empty,
}

/// What became of one finished computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Stored in the cache, and shown if it is the displayed entry.
    Computed,
    /// Started under an old generation or superseded; dropped unseen.
    Discarded,
    Failed,
}

/// What the host draws for this page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub activity: bool,
    pub left_label: String,
    pub center_label: String,
    pub right_label: String,
    pub content: Option<Arc<SamplingData>>,
}

impl ViewState {
    pub fn image(&self) -> Option<&fuel_core::ChartImage> {
        self.content.as_deref().map(SamplingData::image)
    }
}

/// Counters for what happened to lookups and computations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerStats {
    pub hits: u64,
    pub misses: u64,
    pub started: u64,
    pub committed: u64,
    pub discarded: u64,
    pub failed: u64,
    pub purged: u64,
}

pub struct StatisticsController {
    kind: StatisticKind,
    source: Arc<dyn StatisticsSource>,
    completions: mpsc::UnboundedSender<Completion>,
    settings: ChartSettings,

    cache: ContentCache,
    generation: Generation,
    /// Generation each outstanding request was started under.
    pending: HashMap<CacheKey, Generation>,

    selected_car: Option<CarId>,
    months: u32,
    active: bool,
    zooming: bool,

    phase: DisplayPhase,
    view: ViewState,
    stats: ControllerStats,
}

impl StatisticsController {
    pub fn new(
        kind: StatisticKind,
        source: Arc<dyn StatisticsSource>,
        completions: mpsc::UnboundedSender<Completion>,
        settings: ChartSettings,
        months: u32,
    ) -> Self {
        Self {
            kind,
            source,
            completions,
            settings,
            cache: ContentCache::new(),
            generation: Generation::default(),
            pending: HashMap::new(),
            selected_car: None,
            months: months.max(1),
            active: false,
            zooming: false,
            phase: DisplayPhase::Uninitialized,
            view: ViewState::default(),
            stats: ControllerStats::default(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn kind(&self) -> StatisticKind {
        self.kind
    }

    pub fn selected_car(&self) -> Option<CarId> {
        self.selected_car
    }

    pub fn displayed_months(&self) -> u32 {
        self.months
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_zooming(&self) -> bool {
        self.zooming
    }

    pub fn smoothing(&self) -> bool {
        self.settings.options.smoothing
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn phase(&self) -> DisplayPhase {
        self.phase
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn stats(&self) -> ControllerStats {
        self.stats
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    pub fn is_pending(&self, key: &CacheKey) -> bool {
        self.pending.contains_key(key)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Key of the entry the page should be showing, if a car is selected.
    pub fn displayed_key(&self) -> Option<CacheKey> {
        self.selected_car.map(|car| CacheKey { car, months: self.months })
    }

    // ── Inputs ────────────────────────────────────────────────────────────────

    /// Switch to another car (or none).  Content of the previous car goes.
    pub fn set_selected_car(&mut self, car: Option<CarId>) {
        if car == self.selected_car {
            return;
        }
        if let Some(previous) = self.selected_car {
            let dropped = self.cache.remove_car(previous);
            self.pending.retain(|key, _| key.car != previous);
            debug!("{}: dropped {dropped} cached entries of {previous}", self.kind);
        }
        self.selected_car = car;
        self.zooming = false;
        self.refresh();
    }

    pub fn set_displayed_months(&mut self, months: u32) {
        let months = months.max(1);
        if months == self.months {
            return;
        }
        self.months = months;
        self.zooming = false;
        self.refresh();
    }

    /// Page became visible (or hidden).  Hidden pages keep caching results
    /// but leave the view alone.
    pub fn set_active(&mut self, active: bool) {
        if active == self.active {
            return;
        }
        self.active = active;
        if active {
            self.refresh();
        } else {
            self.zooming = false;
            self.view.activity = false;
        }
    }

    /// Toggle curve smoothing.  Everything cached was drawn with the old
    /// setting, so the caches go too.
    pub fn checkbox_toggled(&mut self) {
        self.settings.options.smoothing = !self.settings.options.smoothing;
        info!("{}: smoothing {}", self.kind, if self.smoothing() { "on" } else { "off" });
        self.invalidate_caches();
    }

    /// Replace theme/layout/options and start over.
    pub fn apply_settings(&mut self, settings: ChartSettings) {
        if settings == self.settings {
            return;
        }
        self.settings = settings;
        self.invalidate_caches();
    }

    /// The archive changed for `car`.  Only the selected car has content
    /// here, so other cars need no action.
    pub fn archive_changed(&mut self, car: CarId) {
        if self.selected_car == Some(car) {
            info!("{}: archive of {car} changed", self.kind);
            self.invalidate_caches();
        }
    }

    /// Forget every cached entry and every computation in flight.
    pub fn invalidate_caches(&mut self) {
        self.generation = self.generation.next();
        self.cache.clear();
        self.pending.clear();
        self.zooming = false;
        debug!("{}: caches invalidated (generation {})", self.kind, self.generation.value());
        self.refresh();
    }

    /// Evict everything except the displayed entry and entries still being
    /// computed.  Returns the number of evicted entries.
    ///
    /// Requests are only started on a miss and leave `pending` when they
    /// commit, so a pending key has no cache entry yet.  Its result is
    /// inserted after any purge that happens while it runs.
    pub fn purge_discardable_cache_content(&mut self) -> usize {
        debug_assert!(self.pending.keys().all(|key| !self.cache.contains(key)));
        let displayed = self.displayed_key();
        let pending = &self.pending;
        let purged = self
            .cache
            .purge(|key| Some(*key) == displayed || pending.contains_key(key));
        self.stats.purged += purged as u64;
        if purged > 0 {
            debug!("{}: purged {purged} cache entries", self.kind);
        }
        purged
    }

    /// Lens interaction on the displayed chart.
    pub fn zoom(&mut self, gesture: ZoomGesture) {
        match gesture {
            ZoomGesture::Began(position) | ZoomGesture::Changed(position) => {
                if !self.active {
                    return;
                }
                if matches!(gesture, ZoomGesture::Changed(_)) && !self.zooming {
                    return;
                }
                let Some(data) = self.view.content.clone() else {
                    return;
                };
                let series = data.series();
                let Some(lens) = series.lens_at_position(position) else {
                    return;
                };
                self.zooming = true;
                self.view.left_label = format_local_date(lens.start, &self.settings.date_format);
                self.view.center_label = series.format_value(lens.value);
                self.view.right_label = format_local_date(lens.end, &self.settings.date_format);
            }
            ZoomGesture::Ended | ZoomGesture::Cancelled => {
                if !self.zooming {
                    return;
                }
                self.zooming = false;
                if let Some(data) = self.view.content.clone() {
                    self.show_summary(&data);
                }
            }
        }
    }

    /// Commit or drop a finished computation.
    pub fn handle_completion(&mut self, completion: Completion) -> CompletionOutcome {
        let Completion { kind, key, generation, result } = completion;
        debug_assert_eq!(kind, self.kind);

        if generation != self.generation || self.pending.get(&key) != Some(&generation) {
            self.stats.discarded += 1;
            debug!(
                "{}: discarded stale result for {} ({} months, generation {})",
                self.kind,
                key.car,
                key.months,
                generation.value()
            );
            return CompletionOutcome::Discarded;
        }
        self.pending.remove(&key);

        let shown = self.active && self.displayed_key() == Some(key);
        match result {
            Ok(data) => {
                self.stats.committed += 1;
                self.cache.insert(key, Arc::clone(&data));
                if shown {
                    self.phase = DisplayPhase::Computed;
                    self.show_content(data);
                }
                CompletionOutcome::Computed
            }
            Err(e) => {
                self.stats.failed += 1;
                match e {
                    FuelError::NoData => debug!("{}: nothing to show for {}", self.kind, key.car),
                    e => warn!("{}: computing {} failed: {e}", self.kind, key.car),
                }
                if shown {
                    self.phase = DisplayPhase::Empty;
                    self.show_empty("-");
                }
                CompletionOutcome::Failed
            }
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    /// Bring the view in line with the displayed key.
    fn refresh(&mut self) {
        if !self.active {
            return;
        }
        let Some(key) = self.displayed_key() else {
            self.phase = DisplayPhase::Empty;
            self.show_empty("");
            return;
        };

        if let Some(data) = self.cache.get(&key) {
            self.stats.hits += 1;
            self.phase = DisplayPhase::CacheHit;
            self.show_content(data);
        } else {
            self.stats.misses += 1;
            self.phase = DisplayPhase::CacheMiss;
            self.show_loading();
            self.request(key);
        }
    }

    /// Start computing `key` unless that already happens under this generation.
    fn request(&mut self, key: CacheKey) {
        if self.pending.get(&key) == Some(&self.generation) {
            return;
        }
        self.pending.insert(key, self.generation);
        self.stats.started += 1;

        let request = ComputeRequest {
            kind: self.kind,
            car: key.car,
            months: key.months,
            options: self.settings.options.clone(),
            theme: self.settings.theme.clone(),
            layout: self.settings.layout,
        };
        let source = Arc::clone(&self.source);
        let completions = self.completions.clone();
        let generation = self.generation;

        tokio::task::spawn_blocking(move || {
            let result = source.compute(&request).map(Arc::new);
            let completion = Completion { kind: request.kind, key, generation, result };
            // The owner may already be gone; nothing to deliver to then.
            let _ = completions.send(completion);
        });
    }

    fn show_content(&mut self, data: Arc<SamplingData>) {
        self.view.activity = false;
        self.show_summary(&data);
        self.view.content = Some(data);
    }

    /// Date range and average of the whole series.
    fn show_summary(&mut self, data: &SamplingData) {
        let series = data.series();
        self.view.left_label = format_local_date(series.first, &self.settings.date_format);
        self.view.right_label = format_local_date(series.last, &self.settings.date_format);
        self.view.center_label = data
            .average()
            .map_or_else(|| "-".to_string(), |avg| series.format_value(avg));
    }

    fn show_loading(&mut self) {
        self.view = ViewState { activity: true, ..ViewState::default() };
    }

    fn show_empty(&mut self, center: &str) {
        self.view = ViewState { center_label: center.to_string(), ..ViewState::default() };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{demo_store, CountingSource, FailingSource};

    type Rx = mpsc::UnboundedReceiver<Completion>;

    fn controller(source: Arc<dyn StatisticsSource>) -> (StatisticsController, Rx) {
        let (tx, rx) = mpsc::unbounded_channel();
        let ctrl = StatisticsController::new(
            StatisticKind::AverageConsumption,
            source,
            tx,
            ChartSettings::default(),
            6,
        );
        (ctrl, rx)
    }

    /// Hand the next `n` completions to `ctrl`, whatever order they finish in.
    async fn settle(ctrl: &mut StatisticsController, rx: &mut Rx, n: usize) {
        for _ in 0..n {
            let completion = rx.recv().await.unwrap();
            ctrl.handle_completion(completion);
        }
    }

    #[tokio::test]
    async fn miss_computes_then_hits_come_from_cache() {
        let (store, golf, _) = demo_store();
        let source = Arc::new(CountingSource::new(store));
        let (mut ctrl, mut rx) = controller(source.clone());

        ctrl.set_active(true);
        ctrl.set_selected_car(Some(golf));
        assert_eq!(ctrl.phase(), DisplayPhase::CacheMiss);
        assert!(ctrl.view().activity);
        assert!(ctrl.view().content.is_none());

        settle(&mut ctrl, &mut rx, 1).await;
        assert_eq!(ctrl.phase(), DisplayPhase::Computed);
        assert!(!ctrl.view().activity);
        assert!(ctrl.view().image().is_some());
        assert!(!ctrl.view().left_label.is_empty());
        assert!(ctrl.view().center_label.ends_with("l/100km"));

        ctrl.set_displayed_months(12);
        settle(&mut ctrl, &mut rx, 1).await;
        ctrl.set_displayed_months(6);

        assert_eq!(ctrl.phase(), DisplayPhase::CacheHit);
        assert_eq!(source.calls(), 2);
        assert_eq!(ctrl.cache().len(), 2);
        assert_eq!(ctrl.stats().hits, 1);
    }

    #[tokio::test]
    async fn results_started_before_invalidation_are_discarded() {
        let (store, golf, _) = demo_store();
        let (mut ctrl, mut rx) = controller(Arc::new(CountingSource::new(store)));
        ctrl.set_active(true);
        ctrl.set_selected_car(Some(golf));

        let stale = rx.recv().await.unwrap();
        ctrl.invalidate_caches();
        assert_eq!(ctrl.handle_completion(stale), CompletionOutcome::Discarded);

        assert_eq!(ctrl.stats().discarded, 1);
        assert!(ctrl.cache().is_empty());
        assert_eq!(ctrl.phase(), DisplayPhase::CacheMiss);
        assert!(ctrl.view().activity);

        let fresh = rx.recv().await.unwrap();
        assert_eq!(ctrl.handle_completion(fresh), CompletionOutcome::Computed);
        assert_eq!(ctrl.phase(), DisplayPhase::Computed);
        assert_eq!(ctrl.stats().committed, 1);
    }

    #[tokio::test]
    async fn checkbox_toggles_smoothing_and_recomputes() {
        let (store, golf, _) = demo_store();
        let source = Arc::new(CountingSource::new(store));
        let (mut ctrl, mut rx) = controller(source.clone());
        ctrl.set_active(true);
        ctrl.set_selected_car(Some(golf));
        settle(&mut ctrl, &mut rx, 1).await;
        let before = ctrl.view().content.clone().unwrap();
        let generation = ctrl.generation();

        ctrl.checkbox_toggled();
        assert!(ctrl.smoothing());
        assert!(ctrl.generation() > generation);
        assert!(ctrl.cache().is_empty());
        assert_eq!(ctrl.phase(), DisplayPhase::CacheMiss);

        settle(&mut ctrl, &mut rx, 1).await;
        let after = ctrl.view().content.clone().unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn purge_keeps_displayed_and_pending_entries() {
        let (store, golf, _) = demo_store();
        let (mut ctrl, mut rx) = controller(Arc::new(CountingSource::new(store)));
        ctrl.set_active(true);
        ctrl.set_selected_car(Some(golf));
        settle(&mut ctrl, &mut rx, 1).await;
        for months in [3, 12] {
            ctrl.set_displayed_months(months);
            settle(&mut ctrl, &mut rx, 1).await;
        }
        ctrl.set_displayed_months(6);
        assert_eq!(ctrl.cache().len(), 3);

        assert_eq!(ctrl.purge_discardable_cache_content(), 2);
        assert!(ctrl.cache().contains(&CacheKey { car: golf, months: 6 }));

        ctrl.set_displayed_months(24);
        let key = CacheKey { car: golf, months: 24 };
        assert!(ctrl.is_pending(&key));
        assert_eq!(ctrl.purge_discardable_cache_content(), 1);

        settle(&mut ctrl, &mut rx, 1).await;
        assert!(ctrl.cache().contains(&key));
        assert_eq!(ctrl.phase(), DisplayPhase::Computed);
        assert_eq!(ctrl.stats().purged, 3);
    }

    #[tokio::test]
    async fn purging_does_not_lose_a_request_in_flight() {
        let (store, golf, _) = demo_store();
        let source = Arc::new(CountingSource::new(store));
        let (mut ctrl, mut rx) = controller(source.clone());
        ctrl.set_active(true);
        ctrl.set_selected_car(Some(golf));
        settle(&mut ctrl, &mut rx, 1).await;

        // 12 months starts computing, then the user goes straight back.
        ctrl.set_displayed_months(12);
        ctrl.set_displayed_months(6);
        let in_flight = CacheKey { car: golf, months: 12 };
        assert_eq!(ctrl.phase(), DisplayPhase::CacheHit);
        assert!(ctrl.is_pending(&in_flight));

        assert_eq!(ctrl.purge_discardable_cache_content(), 0);
        assert!(ctrl.is_pending(&in_flight));

        let completion = rx.recv().await.unwrap();
        assert_eq!(completion.key, in_flight);
        assert_eq!(ctrl.handle_completion(completion), CompletionOutcome::Computed);
        assert!(ctrl.cache().contains(&in_flight));
        assert_eq!(ctrl.phase(), DisplayPhase::CacheHit);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn only_the_last_of_several_invalidations_commits() {
        let (store, golf, _) = demo_store();
        let source = Arc::new(CountingSource::new(store));
        let (mut ctrl, mut rx) = controller(source.clone());
        ctrl.set_active(true);
        ctrl.set_selected_car(Some(golf));
        ctrl.invalidate_caches();
        ctrl.invalidate_caches();
        assert_eq!(ctrl.generation().value(), 2);
        assert_eq!(ctrl.stats().started, 3);
        assert_eq!(ctrl.pending_count(), 1);

        let mut outcomes = Vec::new();
        for _ in 0..3 {
            let completion = rx.recv().await.unwrap();
            let generation = completion.generation;
            outcomes.push((generation, ctrl.handle_completion(completion)));
        }

        for (generation, outcome) in outcomes {
            let expected = if generation == ctrl.generation() {
                CompletionOutcome::Computed
            } else {
                CompletionOutcome::Discarded
            };
            assert_eq!(outcome, expected);
        }
        assert_eq!(ctrl.stats().discarded, 2);
        assert_eq!(ctrl.stats().committed, 1);
        assert_eq!(ctrl.cache().len(), 1);
        assert_eq!(ctrl.phase(), DisplayPhase::Computed);
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn archive_changes_of_other_cars_keep_the_cache() {
        let (store, golf, polo) = demo_store();
        let (mut ctrl, mut rx) = controller(Arc::new(CountingSource::new(store)));
        ctrl.set_active(true);
        ctrl.set_selected_car(Some(golf));
        settle(&mut ctrl, &mut rx, 1).await;

        ctrl.archive_changed(polo);
        assert_eq!(ctrl.generation().value(), 0);
        assert_eq!(ctrl.cache().len(), 1);

        ctrl.archive_changed(golf);
        assert_eq!(ctrl.generation().value(), 1);
        assert!(ctrl.cache().is_empty());
        assert_eq!(ctrl.phase(), DisplayPhase::CacheMiss);
    }

    #[tokio::test]
    async fn switching_cars_drops_the_previous_car() {
        let (store, golf, polo) = demo_store();
        let (mut ctrl, mut rx) = controller(Arc::new(CountingSource::new(store)));
        ctrl.set_active(true);
        ctrl.set_selected_car(Some(golf));
        settle(&mut ctrl, &mut rx, 1).await;

        ctrl.set_displayed_months(12);
        ctrl.set_selected_car(Some(polo));
        assert!(ctrl.cache().is_empty());
        assert_eq!(ctrl.pending_count(), 1);

        // The golf request for 12 months and the polo request, in any order.
        settle(&mut ctrl, &mut rx, 2).await;
        assert_eq!(ctrl.stats().discarded, 1);
        assert_eq!(ctrl.cache().len(), 1);
        assert!(ctrl.cache().contains(&CacheKey { car: polo, months: 12 }));

        ctrl.set_selected_car(None);
        assert!(ctrl.cache().is_empty());
        assert_eq!(ctrl.phase(), DisplayPhase::Empty);
        assert!(ctrl.view().content.is_none());
    }

    #[tokio::test]
    async fn inactive_pages_cache_without_touching_the_view() {
        let (store, golf, _) = demo_store();
        let (mut ctrl, mut rx) = controller(Arc::new(CountingSource::new(store)));
        ctrl.set_active(true);
        ctrl.set_selected_car(Some(golf));
        ctrl.set_active(false);
        assert!(!ctrl.view().activity);

        settle(&mut ctrl, &mut rx, 1).await;
        assert!(ctrl.view().content.is_none());
        assert_eq!(ctrl.cache().len(), 1);

        ctrl.set_active(true);
        assert_eq!(ctrl.phase(), DisplayPhase::CacheHit);
        assert!(ctrl.view().content.is_some());
    }

    #[tokio::test]
    async fn repeated_requests_for_one_key_are_coalesced() {
        let (store, golf, _) = demo_store();
        let source = Arc::new(CountingSource::new(store));
        let (mut ctrl, mut rx) = controller(source.clone());
        ctrl.set_active(true);
        ctrl.set_selected_car(Some(golf));
        ctrl.set_displayed_months(12);
        ctrl.set_displayed_months(6);
        assert_eq!(ctrl.stats().started, 2);

        settle(&mut ctrl, &mut rx, 2).await;
        assert_eq!(source.calls(), 2);
        assert_eq!(ctrl.stats().committed, 2);
        assert_eq!(ctrl.phase(), DisplayPhase::Computed);
    }

    #[tokio::test]
    async fn zoom_shows_the_lens_under_the_finger() {
        let (store, golf, _) = demo_store();
        let (mut ctrl, mut rx) = controller(Arc::new(CountingSource::new(store)));
        ctrl.set_active(true);
        ctrl.set_selected_car(Some(golf));
        settle(&mut ctrl, &mut rx, 1).await;
        let summary = ctrl.view().clone();

        // Changes without a preceding begin are ignored.
        ctrl.zoom(ZoomGesture::Changed(0.5));
        assert!(!ctrl.is_zooming());

        let data = summary.content.clone().unwrap();
        let lens = *data.series().lens_at_position(1.0).unwrap();
        ctrl.zoom(ZoomGesture::Began(0.2));
        ctrl.zoom(ZoomGesture::Changed(1.0));
        assert!(ctrl.is_zooming());
        assert!(Arc::ptr_eq(ctrl.view().content.as_ref().unwrap(), &data));
        assert_eq!(ctrl.view().left_label, format_local_date(lens.start, "%d.%m.%Y"));
        assert_eq!(ctrl.view().right_label, format_local_date(lens.end, "%d.%m.%Y"));
        assert_eq!(ctrl.view().center_label, data.series().format_value(lens.value));

        ctrl.zoom(ZoomGesture::Ended);
        assert!(!ctrl.is_zooming());
        assert_eq!(ctrl.view(), &summary);
    }

    #[tokio::test]
    async fn failures_leave_an_empty_page() {
        let (mut ctrl, mut rx) = controller(Arc::new(FailingSource));
        ctrl.set_active(true);
        ctrl.set_selected_car(Some(CarId(1)));
        settle(&mut ctrl, &mut rx, 1).await;

        assert_eq!(ctrl.phase(), DisplayPhase::Empty);
        assert_eq!(ctrl.view().center_label, "-");
        assert!(!ctrl.view().activity);
        assert!(ctrl.cache().is_empty());
        assert_eq!(ctrl.stats().failed, 1);
    }

    #[test]
    fn no_car_means_an_empty_page() {
        let (mut ctrl, _rx) = controller(Arc::new(FailingSource));
        assert_eq!(ctrl.phase(), DisplayPhase::Uninitialized);
        ctrl.set_active(true);
        assert_eq!(ctrl.phase(), DisplayPhase::Empty);
        assert_eq!(ctrl.pending_count(), 0);
    }
}
