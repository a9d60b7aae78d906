//! In-memory fuel event archive.

pub mod archive;
pub mod demo;

pub use archive::{FuelStore, NewEvent};
pub use demo::add_demo_events;
