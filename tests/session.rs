mod common;

use common::synthetic_image::solid_bands;
use seam_splitter::{
    detect_seams, slice_image, EditMode, EditSession, PointerAction, SplitError,
};
use std::sync::Arc;

fn three_band_session() -> EditSession {
    let _ = env_logger::builder().is_test(true).try_init();
    let image = Arc::new(solid_bands(
        400,
        &[(300, [30, 30, 30]), (300, [220, 220, 220]), (300, [30, 120, 200])],
    ));
    let seams = detect_seams(image.as_view()).unwrap();
    EditSession::open(image, &seams)
}

#[test]
fn detected_seams_open_in_select_mode() {
    let session = three_band_session();
    assert_eq!(session.seams(), &[300, 600]);
    assert_eq!(session.mode(), EditMode::Select);
    assert!(session.short_slice_warning().is_none());
}

#[test]
fn add_then_delete_restores_the_list() {
    let mut session = three_band_session();
    let before = session.seams().to_vec();
    let index = session.add_seam(450).expect("row is free");
    assert_eq!(session.seams(), &[300, 450, 600]);
    assert_eq!(session.delete_seam(index).unwrap(), 450);
    assert_eq!(session.seams(), before.as_slice());
}

#[test]
fn dragging_never_reorders_seams() {
    let mut session = three_band_session();
    session.add_seam(450);
    session.set_mode(EditMode::Select);
    assert_eq!(session.pointer_down(452, 5), PointerAction::Selected(1));

    let gap = session.spacing().min_gap;
    for target in [-100, 0, 290, 310, 450, 590, 610, 2000] {
        let y = session.move_seam(1, target).unwrap();
        assert!(y >= 300 + gap && y <= 600 - gap, "moved to {y}");
        let seams = session.seams();
        assert!(seams.windows(2).all(|w| w[0] < w[1]), "{seams:?}");
    }
    assert_eq!(session.end_drag(), Some(1));
}

#[test]
fn invalid_operations_leave_state_untouched() {
    let mut session = three_band_session();
    let err = session.move_seam(0, 10).unwrap_err();
    assert!(matches!(err, SplitError::InvalidOperation(_)));
    assert!(session.select_seam(7).is_err());
    assert!(session.delete_seam(2).is_err());
    assert_eq!(session.seams(), &[300, 600]);
    assert_eq!(session.selected(), None);
}

#[test]
fn rerun_detection_replaces_manual_edits() {
    let mut session = three_band_session();
    session.clear();
    assert_eq!(session.mode(), EditMode::Add);
    session.add_seam(100);
    session.add_seam(800);

    assert_eq!(session.run_auto_detect().unwrap(), 2);
    assert_eq!(session.seams(), &[300, 600]);
    assert_eq!(session.mode(), EditMode::Select);
    assert_eq!(session.selected(), None);
}

#[test]
fn short_bands_warn_but_still_export() {
    let mut session = three_band_session();
    session.add_seam(310);
    let warning = session.short_slice_warning().expect("10-row band");
    assert_eq!(warning.bands.len(), 1);
    assert_eq!(warning.bands[0].height(), 10);

    let image = session.image().clone();
    let seams = session.finalize();
    let slices = slice_image(image.as_view(), &seams).unwrap();
    assert_eq!(slices.len(), 4);
    assert_eq!(slices[1].height(), 10);
}

#[test]
fn finalized_seams_cover_the_whole_image() {
    let session = three_band_session();
    let image = session.image().clone();
    let seams = session.finalize();
    let slices = slice_image(image.as_view(), &seams).unwrap();
    assert_eq!(slices.first().map(|s| s.y_start), Some(0));
    assert_eq!(slices.last().map(|s| s.y_end), Some(900));
    assert!(slices.windows(2).all(|w| w[0].y_end == w[1].y_start));
}
