//! Summary statistics used to describe matching quality

pub mod histogram;

pub use histogram::{Histogram, HistogramSummary};
