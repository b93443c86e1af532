//! Operator review of detected seams before export.
//!
//! [`EditSession`] wraps one image and its seam list, exposing the gestures
//! of the edit overlay (add, select, drag, delete, re-detect) as method calls.
//! [`ShortSliceWarning`] describes bands that would come out below the
//! minimum slice height; it is advisory and never blocks finalization.

mod state;
mod warning;

pub use state::{EditMode, EditSession, PointerAction};
pub use warning::{ShortBand, ShortSliceWarning};
