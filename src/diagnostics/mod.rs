//! Diagnostics returned alongside detected seams.
//!
//! [`DetectionReport`] captures the intermediate signals, the threshold that
//! was chosen, rough and refined candidates, and per-stage timings. It is
//! serializable so the CLI tools can dump it as JSON.

pub mod report;
pub mod timing;

pub use report::{DetectionReport, RefineSample};
pub use timing::{StageTiming, TimingBreakdown};
