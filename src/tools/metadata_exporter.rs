//! 追蹤設定與統計的中繼資料匯出

use crate::tools::error::TrackError;
use crate::tools::sample_store::SampleStore;
use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// 一次追蹤工作階段的中繼資料
#[derive(Debug, Serialize)]
pub struct SessionMetadata {
    /// 追蹤座標，依插入順序
    pub coordinates: Vec<(u32, u32)>,
    pub frame_count: usize,
    pub pixel_count: usize,
    pub tolerance: f64,
    pub auto_track: bool,
}

impl SessionMetadata {
    #[must_use]
    pub fn from_store(store: &SampleStore, tolerance: f64, auto_track: bool) -> Self {
        Self {
            coordinates: store.coordinates().iter().map(|c| (c.x, c.y)).collect(),
            frame_count: store.frame_count(),
            pixel_count: store.pixel_count(),
            tolerance,
            auto_track,
        }
    }
}

/// 把工作階段中繼資料寫成 JSON
///
/// 儲存為空時回傳 `NoDataToExport`，不寫任何檔案
pub fn export_metadata(
    store: &SampleStore,
    tolerance: f64,
    auto_track: bool,
    output: &Path,
) -> Result<()> {
    if store.is_empty() {
        return Err(TrackError::NoDataToExport.into());
    }

    let metadata = SessionMetadata::from_store(store, tolerance, auto_track);
    let content = serde_json::to_string_pretty(&metadata).context("無法序列化中繼資料")?;

    fs::write(output, content)
        .with_context(|| format!("無法寫入中繼資料檔案: {}", output.display()))?;

    info!("已匯出中繼資料: {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::sample_store::{Coordinate, Rgb};
    use tempfile::TempDir;

    #[test]
    fn test_metadata_contents() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("metadata.json");

        let mut store = SampleStore::new();
        store.add_coordinate(4, 2);
        store.add_coordinate(1, 1);
        store
            .record(Coordinate::new(4, 2), Rgb::new(1.0, 2.0, 3.0))
            .unwrap();

        export_metadata(&store, 12.5, true, &output).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(parsed["coordinates"], serde_json::json!([[4, 2], [1, 1]]));
        assert_eq!(parsed["frame_count"], 1);
        assert_eq!(parsed["pixel_count"], 2);
        assert!((parsed["tolerance"].as_f64().unwrap() - 12.5).abs() < f64::EPSILON);
        assert_eq!(parsed["auto_track"], true);
    }

    #[test]
    fn test_metadata_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("metadata.json");

        let result = export_metadata(&SampleStore::new(), 10.0, false, &output);
        assert!(result.is_err());
        assert!(!output.exists());
    }
}
