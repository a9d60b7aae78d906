pub mod error;
pub mod event;
pub mod image;
pub mod model;
pub mod units;

pub use error::{FuelError, Result};
pub use event::{Message, ZoomGesture};
pub use image::{ChartImage, Rgba};
pub use model::{Car, CarId, FuelEvent, StatisticKind};
pub use units::{ConsumptionUnit, DistanceUnit, VolumeUnit};
