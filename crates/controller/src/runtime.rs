//! The set of statistics pages and the event loop that drives them.

use fuel_config::StatsConfig;
use fuel_core::{Message, StatisticKind};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::controller::{Completion, CompletionOutcome, StatisticsController};
use crate::source::{ChartSettings, StatisticsSource};

/// One controller per [`StatisticKind`]; exactly one of them is visible.
pub struct StatisticsPages {
    pages: Vec<StatisticsController>,
    visible: StatisticKind,
    /// Re-read on [`Message::ConfigReloaded`].
    config_path: Option<PathBuf>,
}

impl StatisticsPages {
    /// Build all pages from `config`.  Completions of every page arrive on the
    /// returned receiver and belong in [`StatisticsPages::handle_completion`].
    pub fn new(
        source: Arc<dyn StatisticsSource>,
        config: &StatsConfig,
    ) -> (Self, mpsc::UnboundedReceiver<Completion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let settings = ChartSettings::from_config(config);

        let pages = StatisticKind::ALL
            .iter()
            .map(|&kind| {
                StatisticsController::new(
                    kind,
                    Arc::clone(&source),
                    tx.clone(),
                    settings.clone(),
                    config.display.months,
                )
            })
            .collect();

        let mut this = Self { pages, visible: config.display.page, config_path: None };
        this.page_mut(this.visible).set_active(true);
        (this, rx)
    }

    /// Reload settings from `path` whenever the config changes.
    pub fn with_config_path(mut self, path: impl AsRef<Path>) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn page(&self, kind: StatisticKind) -> &StatisticsController {
        &self.pages[kind.index()]
    }

    pub fn page_mut(&mut self, kind: StatisticKind) -> &mut StatisticsController {
        &mut self.pages[kind.index()]
    }

    pub fn visible(&self) -> &StatisticsController {
        self.page(self.visible)
    }

    pub fn pages(&self) -> impl Iterator<Item = &StatisticsController> {
        self.pages.iter()
    }

    /// Apply one message.  Returns `false` once the loop should stop.
    pub fn handle(&mut self, message: Message) -> bool {
        match message {
            Message::CarSelected(car) => {
                self.pages.iter_mut().for_each(|p| p.set_selected_car(car));
            }
            Message::MonthsChanged(months) => {
                self.pages.iter_mut().for_each(|p| p.set_displayed_months(months));
            }
            Message::PageSelected(kind) => {
                if kind != self.visible {
                    self.page_mut(self.visible).set_active(false);
                    self.visible = kind;
                    self.page_mut(kind).set_active(true);
                }
            }
            Message::CheckboxToggled => self.page_mut(self.visible).checkbox_toggled(),
            Message::Zoom(gesture) => self.page_mut(self.visible).zoom(gesture),
            Message::ArchiveChanged(car) => {
                self.pages.iter_mut().for_each(|p| p.archive_changed(car));
            }
            Message::MemoryPressure => {
                let purged: usize = self
                    .pages
                    .iter_mut()
                    .map(StatisticsController::purge_discardable_cache_content)
                    .sum();
                info!("Memory pressure: purged {purged} cached charts");
            }
            Message::ConfigReloaded => self.reload_config(),
            Message::Shutdown => return false,
        }
        true
    }

    fn reload_config(&mut self) {
        let Some(path) = &self.config_path else {
            debug!("No config path; ignoring reload");
            return;
        };
        match fuel_config::load(path) {
            Ok(config) => {
                info!("Config reloaded");
                self.apply_config(&config);
            }
            Err(e) => warn!("Config reload failed: {e}"),
        }
    }

    /// New theme/options for every page; every page recomputes lazily.
    pub fn apply_config(&mut self, config: &StatsConfig) {
        let settings = ChartSettings::from_config(config);
        for page in &mut self.pages {
            page.apply_settings(settings.clone());
        }
    }

    pub fn handle_completion(&mut self, completion: Completion) -> CompletionOutcome {
        self.page_mut(completion.kind).handle_completion(completion)
    }
}

/// Drive `pages` until [`Message::Shutdown`] arrives or every sender is gone.
///
/// `on_update` runs after each handled message or completion so the host can
/// redraw from [`StatisticsPages::visible`].
pub async fn run(
    mut pages: StatisticsPages,
    mut messages: mpsc::Receiver<Message>,
    mut completions: mpsc::UnboundedReceiver<Completion>,
    mut on_update: impl FnMut(&StatisticsPages),
) -> StatisticsPages {
    loop {
        tokio::select! {
            message = messages.recv() => {
                let Some(message) = message else { break };
                if !pages.handle(message) {
                    info!("Shutting down");
                    break;
                }
            }
            Some(completion) = completions.recv() => {
                pages.handle_completion(completion);
            }
        }
        on_update(&pages);
    }
    pages
}
