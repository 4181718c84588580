//! 欄式資料包匯出
//!
//! 每個座標一組平行陣列（影格編號、各通道、距離、旗標），
//! 以可還原的 `x{X}_y{Y}` 標籤為 key，供後續 ML 流程使用

use crate::tools::change_classifier::classify_store;
use crate::tools::error::TrackError;
use crate::tools::sample_store::SampleStore;
use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// 單一座標的欄式資料
#[derive(Debug, Serialize)]
struct CoordinateColumns {
    frames: Vec<usize>,
    r: Vec<f64>,
    g: Vec<f64>,
    b: Vec<f64>,
    delta: Vec<f64>,
    changed: Vec<bool>,
}

/// 把儲存內容寫成欄式 JSON 資料包
///
/// 儲存為空時回傳 `NoDataToExport`，不寫任何檔案
pub fn export_bundle(store: &SampleStore, tolerance: f64, output: &Path) -> Result<()> {
    if store.is_empty() {
        return Err(TrackError::NoDataToExport.into());
    }

    let classified = classify_store(store, tolerance);

    // Map 保留插入順序，座標群組跟著儲存的註冊順序走
    let mut bundle: Map<String, Value> = Map::new();
    for (coord, points) in &classified {
        let Some(samples) = store.samples(coord) else {
            continue;
        };

        let mut columns = CoordinateColumns {
            frames: Vec::with_capacity(samples.len()),
            r: Vec::with_capacity(samples.len()),
            g: Vec::with_capacity(samples.len()),
            b: Vec::with_capacity(samples.len()),
            delta: Vec::with_capacity(samples.len()),
            changed: Vec::with_capacity(samples.len()),
        };

        for (frame_index, (sample, point)) in samples.iter().zip(points).enumerate() {
            columns.frames.push(frame_index);
            columns.r.push(sample.r);
            columns.g.push(sample.g);
            columns.b.push(sample.b);
            columns.delta.push(point.delta);
            columns.changed.push(point.changed);
        }

        let value = serde_json::to_value(&columns).context("無法序列化座標欄位")?;
        bundle.insert(coord.label(), value);
    }

    let content = serde_json::to_string_pretty(&bundle).context("無法序列化資料包")?;
    fs::write(output, content)
        .with_context(|| format!("無法寫入資料包檔案: {}", output.display()))?;

    info!("已匯出欄式資料包: {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::sample_store::{Coordinate, Rgb};
    use tempfile::TempDir;

    #[test]
    fn test_export_bundle_structure() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("bundle.json");

        let mut store = SampleStore::new();
        store.add_coordinate(3, 7);
        let coord = Coordinate::new(3, 7);
        store.record(coord, Rgb::new(100.0, 100.0, 100.0)).unwrap();
        store.record(coord, Rgb::new(150.0, 100.0, 100.0)).unwrap();

        export_bundle(&store, 10.0, &output).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();

        let columns = &parsed["x3_y7"];
        assert_eq!(columns["frames"], serde_json::json!([0, 1]));
        assert_eq!(columns["r"], serde_json::json!([100.0, 150.0]));
        assert_eq!(columns["changed"], serde_json::json!([false, true]));
        assert!((columns["delta"][1].as_f64().unwrap() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_export_bundle_keeps_insertion_order() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("bundle.json");

        // 字典序會把 x10_y1 排在 x2_y1 前面，插入順序相反
        let mut store = SampleStore::new();
        store.add_coordinate(2, 1);
        store.add_coordinate(10, 1);
        for coord in [Coordinate::new(2, 1), Coordinate::new(10, 1)] {
            store.record(coord, Rgb::new(0.0, 0.0, 0.0)).unwrap();
        }

        export_bundle(&store, 10.0, &output).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        let first = content.find("x2_y1").unwrap();
        let second = content.find("x10_y1").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_export_bundle_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("bundle.json");

        let result = export_bundle(&SampleStore::new(), 10.0, &output);
        assert!(result.is_err());
        assert!(!output.exists());
    }
}
