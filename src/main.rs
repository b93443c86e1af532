use seam_splitter::config::{load_config, RuntimeConfig};
use seam_splitter::image::io::{load_rgba_image, save_rgba_image, write_json_file};
use seam_splitter::{slice_image, DetectionReport, EditSession, SeamDetector, SliceBounds};
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let image = Arc::new(load_rgba_image(&config.input).map_err(|e| e.to_string())?);
    let detector = SeamDetector::new(config.detector.clone());

    let detection = if config.manual_seams.is_none() || config.output.report_json.is_some() {
        Some(
            detector
                .detect_with_report(image.as_view())
                .map_err(|e| e.to_string())?,
        )
    } else {
        None
    };
    let candidates = candidate_seams(&config, detection.as_ref());
    log::info!(
        "{}x{} image, {} candidate seams ({})",
        image.width(),
        image.height(),
        candidates.len(),
        if config.manual_seams.is_some() {
            "manual"
        } else {
            "detected"
        }
    );

    let session = EditSession::open_with_detector(image.clone(), &candidates, detector);
    if let Some(warning) = session.short_slice_warning() {
        for band in &warning.bands {
            log::warn!(
                "band {} [{}, {}) is {} rows, below the {}-row minimum",
                band.index,
                band.y_start,
                band.y_end,
                band.height(),
                warning.min_slice
            );
        }
        if !config.allow_short_slices {
            return Err(format!(
                "{} band(s) shorter than {} rows; set allow_short_slices to export anyway",
                warning.bands.len(),
                warning.min_slice
            ));
        }
    }
    let seams = session.finalize();

    let slices = slice_image(image.as_view(), &seams).map_err(|e| e.to_string())?;
    let mut written = Vec::with_capacity(slices.len());
    for (i, slice) in slices.iter().enumerate() {
        let path = config.output.slices_dir.join(format!("slice_{i:03}.png"));
        save_rgba_image(&slice.image, &path).map_err(|e| e.to_string())?;
        written.push(WrittenSlice {
            bounds: slice.bounds(),
            path,
        });
    }
    println!(
        "Saved {} slices to {}",
        written.len(),
        config.output.slices_dir.display()
    );

    if let Some(report_path) = &config.output.report_json {
        let summary = SplitSummary {
            seams,
            slices: written,
            detection,
        };
        write_json_file(report_path, &summary).map_err(|e| e.to_string())?;
        println!("Saved report to {}", report_path.display());
    }

    Ok(())
}

fn candidate_seams(config: &RuntimeConfig, detection: Option<&DetectionReport>) -> Vec<usize> {
    match (&config.manual_seams, detection) {
        (Some(manual), _) => manual.clone(),
        (None, Some(report)) => report.seams.clone(),
        (None, None) => Vec::new(),
    }
}

fn usage() -> String {
    "Usage: seam-splitter <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WrittenSlice {
    #[serde(flatten)]
    bounds: SliceBounds,
    path: PathBuf,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SplitSummary {
    seams: Vec<usize>,
    slices: Vec<WrittenSlice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    detection: Option<DetectionReport>,
}
