//! Interactive seam editing state machine.
//!
//! The session owns the seam list of one open image and is its only writer.
//! A presentation layer forwards gestures as method calls and renders
//! [`EditSession::seams`], [`EditSession::mode`] and
//! [`EditSession::selected`].
//!
//! Drags are bracketed: select a seam, call [`EditSession::move_seam`] for
//! every pointer move, then [`EditSession::end_drag`]. Any other mutating
//! call commits a pending drag first.
use super::warning::{short_bands, ShortSliceWarning};
use crate::detector::SeamDetector;
use crate::error::{SplitError, SplitResult};
use crate::image::RasterImage;
use crate::types::Spacing;
use log::{debug, info};
use serde::Serialize;
use std::sync::Arc;

/// What a pointer press on the image means.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    /// Presses insert new seams.
    #[default]
    Add,
    /// Presses pick existing seams for dragging or deletion.
    Select,
}

/// Result of [`EditSession::pointer_down`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerAction {
    Added(usize),
    Selected(usize),
    Deselected,
    /// Add mode press on an existing seam row, or an image too short for seams.
    Ignored,
}

pub struct EditSession {
    image: Arc<RasterImage>,
    detector: SeamDetector,
    spacing: Spacing,
    seams: Vec<usize>,
    mode: EditMode,
    selected: Option<usize>,
    dragging: bool,
}

impl EditSession {
    /// Open a session with the default detector configuration.
    pub fn open(image: Arc<RasterImage>, candidates: &[usize]) -> Self {
        Self::open_with_detector(image, candidates, SeamDetector::default())
    }

    /// Open a session seeded with `candidates`. Values outside `(0, height)`
    /// are discarded; the rest are clamped into the editable range, sorted
    /// and de-duplicated.
    pub fn open_with_detector(
        image: Arc<RasterImage>,
        candidates: &[usize],
        detector: SeamDetector,
    ) -> Self {
        let spacing = detector.spacing_for(image.height());
        let seams = sanitize(candidates, image.height(), &spacing);
        let mode = if seams.is_empty() {
            EditMode::Add
        } else {
            EditMode::Select
        };
        debug!(
            "EditSession::open {}x{} seams={:?} mode={:?}",
            image.width(),
            image.height(),
            seams,
            mode
        );
        Self {
            image,
            detector,
            spacing,
            seams,
            mode,
            selected: None,
            dragging: false,
        }
    }

    pub fn image(&self) -> &Arc<RasterImage> {
        &self.image
    }

    pub fn seams(&self) -> &[usize] {
        &self.seams
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    pub fn set_mode(&mut self, mode: EditMode) {
        self.commit_drag();
        self.mode = mode;
    }

    /// Insert a seam at `raw_y` clamped into the editable range and select
    /// it. Returns its index, or `None` if that row already holds a seam.
    pub fn add_seam(&mut self, raw_y: i64) -> Option<usize> {
        self.commit_drag();
        let (lo, hi) = self.spacing.seam_range(self.image.height())?;
        let y = clamp_row(raw_y, lo, hi);
        match self.seams.binary_search(&y) {
            Ok(_) => {
                debug!("EditSession::add_seam row {y} already present");
                None
            }
            Err(pos) => {
                self.seams.insert(pos, y);
                self.selected = Some(pos);
                Some(pos)
            }
        }
    }

    pub fn select_seam(&mut self, index: usize) -> SplitResult<()> {
        self.check_index("select_seam", index)?;
        self.commit_drag();
        self.selected = Some(index);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.commit_drag();
        self.selected = None;
    }

    /// Drag the selected seam towards `raw_y` and return its new row.
    ///
    /// The seam stays at least `min_gap` away from its neighbours (or the
    /// image edges), so it can never cross another seam. When the neighbours
    /// are already too close the seam does not move.
    pub fn move_seam(&mut self, index: usize, raw_y: i64) -> SplitResult<usize> {
        self.check_index("move_seam", index)?;
        if self.selected != Some(index) {
            debug!(
                "EditSession::move_seam rejected: seam {index} not selected ({:?})",
                self.selected
            );
            return Err(SplitError::InvalidOperation(format!(
                "seam {index} must be selected before it can be moved"
            )));
        }
        let gap = self.edge_gap();
        let lo = match index.checked_sub(1) {
            Some(prev) => self.seams[prev] + gap,
            None => gap,
        };
        let hi = match self.seams.get(index + 1) {
            Some(&next) => next.saturating_sub(gap),
            None => self.image.height().saturating_sub(gap),
        };
        if lo <= hi {
            self.seams[index] = clamp_row(raw_y, lo, hi);
        }
        self.dragging = true;
        Ok(self.seams[index])
    }

    /// Commit a drag in progress. Returns the index of the dragged seam.
    pub fn end_drag(&mut self) -> Option<usize> {
        self.commit_drag();
        self.selected
    }

    /// Remove a seam. Clears the selection; an emptied list switches to
    /// [`EditMode::Add`]. Returns the removed row.
    pub fn delete_seam(&mut self, index: usize) -> SplitResult<usize> {
        self.check_index("delete_seam", index)?;
        self.commit_drag();
        let removed = self.seams.remove(index);
        self.selected = None;
        if self.seams.is_empty() {
            self.mode = EditMode::Add;
        }
        Ok(removed)
    }

    /// Keyboard delete: remove the selected seam, if any.
    pub fn delete_selected(&mut self) -> Option<usize> {
        let index = self.selected?;
        self.delete_seam(index).ok()
    }

    pub fn clear(&mut self) {
        self.seams.clear();
        self.selected = None;
        self.dragging = false;
        self.mode = EditMode::Add;
    }

    /// Replace all seams with a fresh detection pass over the session image.
    /// Returns the number of seams found.
    pub fn run_auto_detect(&mut self) -> SplitResult<usize> {
        let found = self.detector.detect(self.image.as_view())?;
        self.seams = sanitize(&found, self.image.height(), &self.spacing);
        self.selected = None;
        self.dragging = false;
        self.mode = if self.seams.is_empty() {
            EditMode::Add
        } else {
            EditMode::Select
        };
        info!("EditSession::run_auto_detect found {} seams", self.seams.len());
        Ok(self.seams.len())
    }

    /// Nearest seam within `tolerance` rows of `y` (upper one on ties).
    pub fn hit_test(&self, y: i64, tolerance: usize) -> Option<usize> {
        self.seams
            .iter()
            .enumerate()
            .map(|(i, &s)| (i, (s as i64 - y).unsigned_abs()))
            .filter(|&(_, d)| d <= tolerance as u64)
            .min_by_key(|&(i, d)| (d, i))
            .map(|(i, _)| i)
    }

    /// Interpret a pointer press according to the current mode.
    pub fn pointer_down(&mut self, y: i64, tolerance: usize) -> PointerAction {
        match self.mode {
            EditMode::Add => match self.add_seam(y) {
                Some(index) => PointerAction::Added(index),
                None => PointerAction::Ignored,
            },
            EditMode::Select => match self.hit_test(y, tolerance) {
                Some(index) => {
                    self.commit_drag();
                    self.selected = Some(index);
                    PointerAction::Selected(index)
                }
                None => {
                    self.clear_selection();
                    PointerAction::Deselected
                }
            },
        }
    }

    /// Bands that would come out shorter than `min_slice` if the image were
    /// cut now, including the first and last band.
    pub fn short_slice_warning(&self) -> Option<ShortSliceWarning> {
        let mut seams = self.seams.clone();
        normalize(&mut seams);
        let bands = short_bands(&seams, self.image.height(), self.spacing.min_slice);
        (!bands.is_empty()).then_some(ShortSliceWarning {
            min_slice: self.spacing.min_slice,
            bands,
        })
    }

    /// Consume the session and hand out the sorted seam list for export.
    ///
    /// Does not block on short bands; check [`Self::short_slice_warning`]
    /// and obtain confirmation first.
    pub fn finalize(mut self) -> Vec<usize> {
        self.commit_drag();
        info!("EditSession::finalize seams={:?}", self.seams);
        self.seams
    }

    pub fn cancel(self) {
        debug!("EditSession::cancel discarding {} seams", self.seams.len());
    }

    fn check_index(&self, op: &str, index: usize) -> SplitResult<()> {
        if index < self.seams.len() {
            return Ok(());
        }
        debug!(
            "EditSession::{op} rejected: index {index} out of range ({} seams)",
            self.seams.len()
        );
        Err(SplitError::InvalidOperation(format!(
            "{op}: seam index {index} out of range (0..{})",
            self.seams.len()
        )))
    }

    /// Minimum distance between a dragged seam and its neighbours or edges.
    fn edge_gap(&self) -> usize {
        self.spacing.min_gap.max(1)
    }

    fn commit_drag(&mut self) {
        if !self.dragging {
            return;
        }
        self.dragging = false;
        let value = self.selected.and_then(|i| self.seams.get(i).copied());
        normalize(&mut self.seams);
        self.selected = value.and_then(|v| self.seams.binary_search(&v).ok());
    }
}

fn normalize(seams: &mut Vec<usize>) {
    seams.sort_unstable();
    seams.dedup();
}

fn sanitize(candidates: &[usize], height: usize, spacing: &Spacing) -> Vec<usize> {
    let Some((lo, hi)) = spacing.seam_range(height) else {
        return Vec::new();
    };
    let mut seams: Vec<usize> = candidates
        .iter()
        .filter(|&&y| y > 0 && y < height)
        .map(|&y| y.clamp(lo, hi))
        .collect();
    normalize(&mut seams);
    seams
}

#[inline]
fn clamp_row(raw_y: i64, lo: usize, hi: usize) -> usize {
    raw_y.clamp(lo as i64, hi as i64) as usize
}
