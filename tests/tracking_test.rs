//! 整合測試 - 影格序列追蹤、分類與匯出的完整流程

use std::fs;
use std::path::Path;

use pixel_tools::component::pixel_tracker::track_frame;
use pixel_tools::tools::{
    Coordinate, SampleStore, TrackError, classify_store, export_bundle, export_metadata,
    export_tracking_csv, load_frame, scan_sequence_frames,
};
use tempfile::TempDir;

fn default_extensions() -> Vec<String> {
    vec!["png".to_string()]
}

/// 建立一張單色 PNG 影格
fn write_frame(directory: &Path, index: u32, color: [u8; 3]) {
    let mut img = image::RgbImage::new(8, 8);
    for pixel in img.pixels_mut() {
        *pixel = image::Rgb(color);
    }
    img.save(directory.join(format!("beauty.{index:04}.png")))
        .unwrap();
}

/// 測試 1: 從磁碟掃描、載入到取樣的完整追蹤流程
#[test]
fn test_track_sequence_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let sequence_dir = temp_dir.path();

    // 三張影格：基準灰、亮一階、暗一階（對應容差 10 應為 否/是/是）
    write_frame(sequence_dir, 0, [100, 100, 100]);
    write_frame(sequence_dir, 1, [110, 110, 110]);
    write_frame(sequence_dir, 2, [90, 90, 90]);

    let frames = scan_sequence_frames(sequence_dir, &default_extensions()).unwrap();
    assert_eq!(frames.len(), 3);

    let mut store = SampleStore::new();
    store.add_coordinate(3, 3);
    // 超出 8x8 範圍的座標：每幀都該跳過
    store.add_coordinate(100, 100);

    for entry in &frames {
        let frame = load_frame(&entry.path).unwrap();
        let report = track_frame(&mut store, &frame).unwrap();
        assert_eq!(report.recorded, 1);
        assert_eq!(report.skipped, 1);
    }

    assert_eq!(store.frame_count(), 3);
    assert!(
        store
            .samples(&Coordinate::new(100, 100))
            .unwrap()
            .is_empty()
    );

    let classified = classify_store(&store, 10.0);
    let (coord, points) = &classified[0];
    assert_eq!(*coord, Coordinate::new(3, 3));
    assert!((points[0].delta).abs() < 1e-9);
    assert!((points[1].delta - 17.320_508).abs() < 1e-4);
    assert!((points[2].delta - 17.320_508).abs() < 1e-4);
    assert!(!points[0].changed);
    assert!(points[1].changed);
    assert!(points[2].changed);
}

/// 測試 2: 三種匯出格式都能寫出且內容一致
#[test]
fn test_export_all_formats() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path();

    let mut store = SampleStore::new();
    store.add_coordinate(5, 2);
    store.add_coordinate(0, 0);
    for coord in [Coordinate::new(5, 2), Coordinate::new(0, 0)] {
        store
            .record(coord, pixel_tools::tools::Rgb::new(10.0, 20.0, 30.0))
            .unwrap();
        store
            .record(coord, pixel_tools::tools::Rgb::new(60.0, 20.0, 30.0))
            .unwrap();
    }

    let csv_path = output_dir.join("tracking.csv");
    let bundle_path = output_dir.join("bundle.json");
    let metadata_path = output_dir.join("metadata.json");

    export_tracking_csv(&store, 10.0, &csv_path).unwrap();
    export_bundle(&store, 10.0, &bundle_path).unwrap();
    export_metadata(&store, 10.0, false, &metadata_path).unwrap();

    // CSV：座標依插入順序 (5,2) 在 (0,0) 前
    let csv = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[1].starts_with("0,5,2,"));
    assert!(lines[3].starts_with("0,0,0,"));

    // 資料包：兩個座標各有平行陣列
    let bundle: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&bundle_path).unwrap()).unwrap();
    assert_eq!(bundle["x5_y2"]["changed"], serde_json::json!([false, true]));
    assert_eq!(bundle["x0_y0"]["delta"][0], 0.0);

    // 中繼資料
    let metadata: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&metadata_path).unwrap()).unwrap();
    assert_eq!(metadata["pixel_count"], 2);
    assert_eq!(metadata["frame_count"], 2);
    assert_eq!(metadata["coordinates"][0], serde_json::json!([5, 2]));
}

/// 測試 3: 空儲存的匯出一律失敗且不留檔案
#[test]
fn test_empty_store_exports_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let store = SampleStore::new();

    let targets = [
        temp_dir.path().join("tracking.csv"),
        temp_dir.path().join("bundle.json"),
        temp_dir.path().join("metadata.json"),
    ];

    let results = [
        export_tracking_csv(&store, 10.0, &targets[0]),
        export_bundle(&store, 10.0, &targets[1]),
        export_metadata(&store, 10.0, false, &targets[2]),
    ];

    for (result, target) in results.into_iter().zip(&targets) {
        let error = result.unwrap_err();
        assert!(
            error
                .downcast_ref::<TrackError>()
                .is_some_and(|e| matches!(e, TrackError::NoDataToExport))
        );
        assert!(!target.exists());
    }
}

/// 測試 4: 重設後的儲存可以重新開始追蹤
#[test]
fn test_reset_and_retrack() {
    let temp_dir = TempDir::new().unwrap();
    write_frame(temp_dir.path(), 0, [1, 2, 3]);

    let frames = scan_sequence_frames(temp_dir.path(), &default_extensions()).unwrap();
    let frame = load_frame(&frames[0].path).unwrap();

    let mut store = SampleStore::new();
    store.add_coordinate(0, 0);
    track_frame(&mut store, &frame).unwrap();
    assert!(!store.is_empty());

    store.reset();
    assert!(store.is_empty());
    assert!(store.coordinates().is_empty());

    // 重設後舊座標視同未註冊
    let result = store.record(
        Coordinate::new(0, 0),
        pixel_tools::tools::Rgb::new(0.0, 0.0, 0.0),
    );
    assert!(matches!(
        result,
        Err(TrackError::UnknownCoordinate { .. })
    ));
}
