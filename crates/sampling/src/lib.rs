//! Statistics samples: the bounded chart payload, the resampler that builds
//! it from fuel events, lens lookup for zooming, and summary figures.

pub mod format;
pub mod lens;
pub mod record;
pub mod resample;
pub mod samples;
pub mod summary;

pub use format::{format_date, format_local_date, format_value};
pub use record::{
    CurvePoint, LensSample, Marker, SamplePoint, SampledSeries, SamplingData, MAX_HORIZONTAL_MARKERS,
    MAX_SAMPLES, MAX_VERTICAL_MARKERS,
};
pub use resample::{resample, ResampleOptions};
pub use samples::Samples;
pub use summary::FuelSummary;
