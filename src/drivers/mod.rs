// Acquisition, persistence, derived signals and static plot export.
pub mod archive;
pub mod error;
pub mod frame;
pub mod histogram;
pub mod palette;
pub mod plot;
pub mod signals;
pub mod source;
pub use archive::SampleArchive;
pub use error::PadError;
pub use frame::Frame;
pub use histogram::{Histogram, MAX_BINS};
pub use palette::channel_palette;
pub use plot::{write_stacked_png, PlotStyle};
pub use signals::{Derived, Thresholds, DEFAULT_STRIDE};
pub use source::{acquire_from_serial, sample_count};
