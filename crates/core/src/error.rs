use thiserror::Error;

/// Top-level error type used across the whole workspace.
#[derive(Debug, Error)]
pub enum FuelError {
    #[error("config error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("unknown car: {0}")]
    UnknownCar(crate::model::CarId),

    /// Not enough events in the requested range to draw anything.
    #[error("not enough data to display statistics")]
    NoData,

    #[error("capacity exceeded: {len} items for a buffer of {capacity}")]
    Capacity { len: usize, capacity: usize },

    #[error("render error: {0}")]
    Render(String),

    #[error("computation failed: {0}")]
    Compute(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = FuelError> = std::result::Result<T, E>;
