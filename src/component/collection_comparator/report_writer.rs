//! 比對結果 CSV 匯出
//!
//! 參考列群組固定在最前（delta 為 0、旗標為 false，集合欄標為
//! `reference`），之後每個兄弟集合一個列群組

use super::comparator::ComparisonResult;
use crate::tools::TrackError;
use anyhow::{Context, Result};
use log::info;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// 把比對結果寫成 CSV
///
/// 結果不含任何參考觀測時回傳 `NoDataToExport`，不寫任何檔案
pub fn export_comparison_csv(result: &ComparisonResult, output: &Path) -> Result<()> {
    if result.reference.is_empty() {
        return Err(TrackError::NoDataToExport.into());
    }

    let mut content = String::from("collection,x,y,r,g,b,delta,changed\n");

    // 參考列群組：delta 固定 0、旗標固定 false
    for reference in &result.reference {
        let coord = reference.coordinate;
        let color = reference.color;
        let _ = writeln!(
            content,
            "reference,{},{},{},{},{},0.0000,false",
            coord.x, coord.y, color.r, color.g, color.b
        );
    }

    for sibling in &result.siblings {
        for entry in &sibling.entries {
            let _ = writeln!(
                content,
                "{},{},{},{},{},{},{:.4},{}",
                sibling.collection,
                entry.coordinate.x,
                entry.coordinate.y,
                entry.color.r,
                entry.color.g,
                entry.color.b,
                entry.delta,
                entry.changed
            );
        }
    }

    fs::write(output, content)
        .with_context(|| format!("無法寫入比對 CSV: {}", output.display()))?;

    info!("已匯出比對 CSV: {}", output.display());
    Ok(())
}
