//! Seam detector locating the horizontal boundaries between stacked captures.
//!
//! Overview
//! - Builds a per-row color profile (sums, squares, row differences) and a
//!   per-row vertical edge strength from the luminance plane.
//! - Fuses row difference, local color boundary, edge strength and inverse
//!   row variance into one score per row and smooths it.
//! - Picks an adaptive threshold from the score's upper percentiles and keeps
//!   prominent local maxima above it.
//! - Refines every rough peak within a small window using a perceptual color
//!   distance, region consistency and edge strength; weak peaks are dropped.
//! - Merges seams closer than `min_gap` and enforces `min_slice` between
//!   consecutive cuts and the image edges.
//!
//! Modules
//! - [`params`] – configuration types used by the detector and CLI.
//! - `pipeline` – the [`SeamDetector`] implementation.
//! - `stats` – integer row statistics with prefix sums for region queries.
//! - `signals`, `peaks`, `refine`, `merge` – the individual stages.
//! - [`color`] – RGB and perceptual color distances.

pub mod color;
pub mod params;
mod merge;
mod peaks;
mod pipeline;
mod refine;
mod signals;
mod stats;

pub use params::{
    DetectorParams, FusionWeights, PeakParams, RefineParams, SignalParams, SpacingParams,
    ThresholdParams,
};
pub use peaks::{Contrast, Peak, Threshold};
pub use pipeline::{detect_seams, SeamDetector};
pub use refine::RefinedSeam;
pub use signals::RowSignals;
