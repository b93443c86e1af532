use seam_splitter::image::io::load_rgba_image;
use seam_splitter::{DetectorParams, SeamDetector};
use std::env;
use std::fs;
use std::path::Path;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let image_path = args.next().ok_or_else(usage)?;
    let params = match args.next() {
        Some(path) => load_params(Path::new(&path))?,
        None => DetectorParams::default(),
    };

    let image = load_rgba_image(Path::new(&image_path)).map_err(|e| e.to_string())?;
    let report = SeamDetector::new(params)
        .detect_with_report(image.as_view())
        .map_err(|e| e.to_string())?;
    log::info!(
        "{}: {} seams ({} accepted of {} refined) in {:.2} ms",
        image_path,
        report.seams.len(),
        report.accepted_count(),
        report.refined.len(),
        report.timings.total_ms
    );

    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| format!("Failed to serialize report: {e}"))?;
    println!("{json}");
    Ok(())
}

fn load_params(path: &Path) -> Result<DetectorParams, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read params {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse params {}: {e}", path.display()))
}

fn usage() -> String {
    "Usage: seam_report <image> [detector_params.json]".to_string()
}
