use crate::model::{CarId, StatisticKind};

/// All messages (events) the host can push into the statistics runtime.
///
/// Sources:
/// - Host navigation / page controller → `CarSelected`, `MonthsChanged`, `PageSelected`
/// - User interaction                  → `CheckboxToggled`, `Zoom`
/// - Fuel archive edits                 → `ArchiveChanged`
/// - Host environment                  → `MemoryPressure`
/// - Config watcher task               → `ConfigReloaded`
///
/// Completed computations travel on their own channel and never appear here.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // ── Host navigation ───────────────────────────────────────────────────────
    /// A different car was picked (None = no car selected).
    CarSelected(Option<CarId>),
    /// The displayed range changed (number of months).
    MonthsChanged(u32),
    /// The visible statistics page changed.
    PageSelected(StatisticKind),

    // ── User actions ──────────────────────────────────────────────────────────
    /// Display option checkbox on the visible page was tapped.
    CheckboxToggled,
    /// Long-press zoom gesture on the visible page.
    Zoom(ZoomGesture),

    // ── Archive ───────────────────────────────────────────────────────────────
    /// Events of this car were added, edited or removed.
    ArchiveChanged(CarId),

    // ── Host environment ──────────────────────────────────────────────────────
    /// The system asked us to give memory back.
    MemoryPressure,

    // ── Config ────────────────────────────────────────────────────────────────
    /// Config file changed on disk; triggers a live reload.
    ConfigReloaded,

    // ── Internal ──────────────────────────────────────────────────────────────
    /// Graceful shutdown requested.
    Shutdown,
}

/// Phases of a long-press gesture over the chart.
///
/// Positions are horizontal fractions of the chart width in `[0, 1]`;
/// out-of-range values are clamped by the consumer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomGesture {
    Began(f64),
    Changed(f64),
    Ended,
    Cancelled,
}
