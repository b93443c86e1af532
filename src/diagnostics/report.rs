use super::timing::TimingBreakdown;
use crate::detector::{Peak, RefinedSeam, RowSignals, Threshold};
use crate::types::Spacing;
use serde::Serialize;

/// Everything the detector decided for one image, stage by stage.
///
/// `seams` is the final answer; the other fields explain how it was reached
/// and are meant for tooling and parameter tuning.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub width: usize,
    pub height: usize,
    pub spacing: Spacing,
    /// Present unless the image was too short to analyse.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signals: Option<RowSignals>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub smoothed: Vec<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<Threshold>,
    pub peaks: Vec<Peak>,
    /// Best probe per rough peak, including the ones that were dropped.
    pub refined: Vec<RefineSample>,
    pub merged: Vec<usize>,
    pub seams: Vec<usize>,
    pub timings: TimingBreakdown,
}

impl DetectionReport {
    pub(crate) fn empty(width: usize, height: usize, spacing: Spacing) -> Self {
        Self {
            width,
            height,
            spacing,
            signals: None,
            smoothed: Vec::new(),
            threshold: None,
            peaks: Vec::new(),
            refined: Vec::new(),
            merged: Vec::new(),
            seams: Vec::new(),
            timings: TimingBreakdown::default(),
        }
    }

    /// Number of refined candidates that passed the score cut-off.
    pub fn accepted_count(&self) -> usize {
        self.refined.iter().filter(|r| r.accepted).count()
    }
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineSample {
    #[serde(flatten)]
    pub seam: RefinedSeam,
    pub accepted: bool,
}
