#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod export;
pub mod image;
pub mod session;
pub mod types;

// Supporting modules used by the tools and advanced callers.
pub mod config;
pub mod edges;

// --- High-level re-exports -------------------------------------------------

// Detection entry points.
pub use crate::detector::{detect_seams, DetectorParams, SeamDetector};
pub use crate::types::Spacing;

// Editing and export.
pub use crate::export::{slice_image, Slice, SliceBounds};
pub use crate::session::{EditMode, EditSession, PointerAction, ShortSliceWarning};

// Errors and diagnostics.
pub use crate::diagnostics::DetectionReport;
pub use crate::error::{SplitError, SplitResult};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use seam_splitter::prelude::*;
/// use std::sync::Arc;
///
/// # fn main() -> SplitResult<()> {
/// let (w, h) = (320usize, 600usize);
/// let pixels = vec![255u8; w * h * 4];
/// let image = Arc::new(RasterImage::new(w, h, pixels)?);
///
/// let seams = detect_seams(image.as_view())?;
/// let mut session = EditSession::open(image.clone(), &seams);
/// session.add_seam(300);
/// let slices = slice_image(image.as_view(), &session.finalize())?;
/// println!("slices={}", slices.len());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{RasterImage, RgbaView};
    pub use crate::{
        detect_seams, slice_image, DetectorParams, EditMode, EditSession, SeamDetector,
        SplitResult,
    };
}
