use crate::detector::DetectorParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct RuntimeConfig {
    /// Stacked screenshot to split.
    pub input: PathBuf,
    pub output: OutputConfig,
    #[serde(default)]
    pub detector: DetectorParams,
    /// Seam rows to use instead of running detection.
    #[serde(default)]
    pub manual_seams: Option<Vec<usize>>,
    /// Export even when some bands fall below the minimum slice height.
    #[serde(default)]
    pub allow_short_slices: bool,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving `slice_000.png`, `slice_001.png`, ...
    pub slices_dir: PathBuf,
    /// When set, the detection report is written here as JSON.
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg: RuntimeConfig = serde_json::from_str(
            r#"{ "input": "stack.png", "output": { "slices_dir": "out" } }"#,
        )
        .unwrap();
        assert_eq!(cfg.input, PathBuf::from("stack.png"));
        assert!(cfg.output.report_json.is_none());
        assert!(cfg.manual_seams.is_none());
        assert!(!cfg.allow_short_slices);
        assert_eq!(cfg.detector.smoothing_radius, 3);
    }

    #[test]
    fn detector_overrides_are_partial() {
        let cfg: RuntimeConfig = serde_json::from_str(
            r#"{
                "input": "a.png",
                "output": { "slices_dir": "out", "report_json": "out/report.json" },
                "detector": { "refine": { "min_score": 45.0 } },
                "manual_seams": [120, 480],
                "allow_short_slices": true
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.detector.refine.min_score, 45.0);
        assert_eq!(cfg.detector.refine.search_radius, 8);
        assert_eq!(cfg.manual_seams, Some(vec![120, 480]));
        assert!(cfg.allow_short_slices);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_config(Path::new("/nonexistent/seams.json")).unwrap_err();
        assert!(err.contains("/nonexistent/seams.json"));
    }
}
