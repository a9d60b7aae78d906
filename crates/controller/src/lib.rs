//! Statistics pages: per-kind controllers with a discardable content cache,
//! generation-checked background computation and the loop that drives them.

pub mod cache;
pub mod controller;
pub mod runtime;
pub mod source;

#[cfg(test)]
mod testing;

pub use cache::{CacheKey, ContentCache, Generation};
pub use controller::{
    Completion, CompletionOutcome, ControllerStats, DisplayPhase, StatisticsController, ViewState,
};
pub use runtime::{run, StatisticsPages};
pub use source::{ChartSettings, ComputeRequest, StatisticsSource, StoreSource};
