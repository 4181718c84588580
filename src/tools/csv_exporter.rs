//! 追蹤結果 CSV 匯出
//!
//! 一列對應一筆（座標, 影格）取樣，欄位順序固定：
//! 識別鍵、通道值、距離、變化旗標

use crate::tools::change_classifier::classify_store;
use crate::tools::error::TrackError;
use crate::tools::sample_store::SampleStore;
use anyhow::{Context, Result};
use log::info;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// 把儲存內容連同分類結果寫成 CSV
///
/// 座標依插入順序輸出；儲存為空時回傳 `NoDataToExport`，不寫任何檔案
pub fn export_tracking_csv(store: &SampleStore, tolerance: f64, output: &Path) -> Result<()> {
    if store.is_empty() {
        return Err(TrackError::NoDataToExport.into());
    }

    let classified = classify_store(store, tolerance);

    let mut content = String::from("frame,x,y,r,g,b,delta,changed\n");
    for (coord, points) in &classified {
        let Some(samples) = store.samples(coord) else {
            continue;
        };
        for (frame_index, (sample, point)) in samples.iter().zip(points).enumerate() {
            let _ = writeln!(
                content,
                "{},{},{},{},{},{},{:.4},{}",
                frame_index, coord.x, coord.y, sample.r, sample.g, sample.b, point.delta,
                point.changed
            );
        }
    }

    fs::write(output, content)
        .with_context(|| format!("無法寫入 CSV 檔案: {}", output.display()))?;

    info!("已匯出追蹤 CSV: {}", output.display());
    Ok(())
}
