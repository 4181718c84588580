//! 整合測試 - 跨集合比對與結果匯出

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;

use pixel_tools::component::collection_comparator::{
    compare_collections, export_comparison_csv,
};
use pixel_tools::tools::{Coordinate, TrackError};
use tempfile::TempDir;

/// 建立 `{root}/{collection}/renders/beauty/beauty.0005.png`
fn write_collection_frame(root: &Path, collection: &str, color: [u8; 3]) -> PathBuf {
    let view_dir = root.join(collection).join("renders").join("beauty");
    fs::create_dir_all(&view_dir).unwrap();

    let path = view_dir.join("beauty.0005.png");
    let mut img = image::RgbImage::new(6, 6);
    for pixel in img.pixels_mut() {
        *pixel = image::Rgb(color);
    }
    img.save(&path).unwrap();
    path
}

fn no_shutdown() -> AtomicBool {
    AtomicBool::new(false)
}

/// 測試 1: 完整比對流程加 CSV 匯出
#[test]
fn test_compare_and_export_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    let reference_path = write_collection_frame(root, "sim_ref", [200, 0, 0]);
    write_collection_frame(root, "sim_same", [200, 0, 0]);
    write_collection_frame(root, "sim_shift", [150, 0, 0]);

    let coords = vec![Coordinate::new(2, 2)];
    let result =
        compare_collections(&reference_path, &coords, 5.0, "sim", &no_shutdown()).unwrap();

    assert_eq!(result.frame_index, 5);
    assert_eq!(result.siblings.len(), 2);

    // 相同顏色: delta 0 不標記；偏移顏色: delta 50 標記
    let shift = result
        .siblings
        .iter()
        .find(|s| s.collection == "sim_shift")
        .unwrap();
    assert!((shift.entries[0].delta - 50.0).abs() < 1e-9);
    assert!(shift.entries[0].changed);

    let same = result
        .siblings
        .iter()
        .find(|s| s.collection == "sim_same")
        .unwrap();
    assert!(same.entries[0].delta.abs() < 1e-9);
    assert!(!same.entries[0].changed);

    let output = root.join("comparison.csv");
    export_comparison_csv(&result, &output).unwrap();

    let content = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "collection,x,y,r,g,b,delta,changed");
    // 參考列群組固定在最前
    assert!(lines[1].starts_with("reference,2,2,200,0,0,0.0000,false"));
    assert!(content.contains("sim_shift,2,2,150,0,0,50.0000,true"));
}

/// 測試 2: 參考影格不存在 -> ReferenceNotFound，不產生結果
#[test]
fn test_reference_not_found_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir
        .path()
        .join("sim_ref/renders/beauty/beauty.0005.png");

    let coords = vec![Coordinate::new(0, 0)];
    let result = compare_collections(&missing, &coords, 5.0, "sim", &no_shutdown());

    assert!(matches!(result, Err(TrackError::ReferenceNotFound(_))));
}

/// 測試 3: 根目錄下沒有任何兄弟集合 -> NoSiblingsFound
#[test]
fn test_no_siblings_found_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let reference_path = write_collection_frame(temp_dir.path(), "sim_ref", [0, 0, 0]);
    // 不符合前綴的資料夾不算兄弟
    fs::create_dir_all(temp_dir.path().join("archive")).unwrap();

    let coords = vec![Coordinate::new(0, 0)];
    let result = compare_collections(&reference_path, &coords, 5.0, "sim", &no_shutdown());

    assert!(matches!(result, Err(TrackError::NoSiblingsFound(_))));
}

/// 測試 4: 兄弟集合存在但沒有目標影格 -> 零兄弟項目、參考項保留
#[test]
fn test_siblings_without_target_frame_yield_reference_only() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    let reference_path = write_collection_frame(root, "sim_ref", [10, 20, 30]);
    // 兩個兄弟集合都缺這一幀
    fs::create_dir_all(root.join("sim_empty_a/renders/beauty")).unwrap();
    fs::create_dir_all(root.join("sim_empty_b/renders/beauty")).unwrap();

    let coords = vec![Coordinate::new(1, 1)];
    let result =
        compare_collections(&reference_path, &coords, 5.0, "sim", &no_shutdown()).unwrap();

    assert!(result.siblings.is_empty());
    assert_eq!(result.skipped.len(), 2);
    assert_eq!(result.reference.len(), 1);
    let reference = &result.reference[0];
    assert!((reference.color.r - 10.0).abs() < f64::EPSILON);
}
