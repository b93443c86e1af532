//! Edge processing utilities for horizontal boundaries.
//!
//! The detector only cares about edges that run across the image, so this
//! module computes the vertical derivative alone and reduces it to one
//! strength value per row.
//!
//! - Borders are handled by clamping indices (replicate).
//! - Kernels are normalised so Sobel and Scharr produce comparable scales.

pub mod grad;

pub use grad::{row_edge_strength, seam_edge_strength, vertical_gradient, VerticalKernel};
