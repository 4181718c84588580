//! 跨集合比對主模組
//!
//! 互動流程：輸入參考影格與追蹤座標，對所有兄弟集合的同一邏輯
//! 影格做比對，顯示摘要後可匯出 CSV

use super::comparator::{ComparisonResult, compare_collections};
use super::report_writer::export_comparison_csv;
use crate::config::Config;
use crate::tools::{Coordinate, validate_file_exists};
use anyhow::{Context, Result, bail};
use console::style;
use dialoguer::{Confirm, Input};
use log::warn;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// 跨集合比對器
pub struct CollectionComparator {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl CollectionComparator {
    pub fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style("=== 跨集合影格比對 ===").cyan().bold());
        println!(
            "{}",
            style(format!(
                "集合前綴: {:?}，容差: {}",
                self.config.settings.collection_prefix, self.config.settings.tolerance
            ))
            .dim()
        );

        let reference_path = self.prompt_reference_path()?;
        validate_file_exists(&reference_path)?;

        let coordinates = self.prompt_coordinates()?;

        println!("{}", style("比對兄弟集合中...").dim());

        let result = compare_collections(
            &reference_path,
            &coordinates,
            self.config.settings.tolerance,
            &self.config.settings.collection_prefix,
            &self.shutdown_signal,
        )
        .with_context(|| format!("比對失敗: {}", reference_path.display()))?;

        self.print_result(&result);

        if Confirm::new()
            .with_prompt("要匯出比對結果嗎？")
            .default(true)
            .interact()?
        {
            let output = reference_path
                .parent()
                .map_or_else(|| PathBuf::from("comparison.csv"), |p| p.join("comparison.csv"));

            match export_comparison_csv(&result, &output) {
                Ok(()) => println!(
                    "  {} {}",
                    style("已匯出").green(),
                    output.display()
                ),
                Err(e) => {
                    warn!("匯出比對結果失敗: {e}");
                    println!("  {} {e}", style("匯出失敗").yellow());
                }
            }
        }

        Ok(())
    }

    fn prompt_reference_path(&self) -> Result<PathBuf> {
        let path: String = Input::new()
            .with_prompt("請輸入參考影格路徑（…/集合/renders/視圖/視圖.0000.副檔名）")
            .interact_text()?;
        Ok(PathBuf::from(path.trim()))
    }

    fn prompt_coordinates(&self) -> Result<Vec<Coordinate>> {
        let input: String = Input::new()
            .with_prompt("請輸入比對座標（格式: x,y x,y ...）")
            .interact_text()?;

        let mut coordinates = Vec::new();
        for token in input.split([' ', ';']).filter(|t| !t.trim().is_empty()) {
            let parts: Vec<&str> = token.trim().split(',').collect();
            if parts.len() != 2 {
                bail!("座標格式錯誤: {token}（應為 x,y）");
            }
            let x: u32 = parts[0].trim().parse()?;
            let y: u32 = parts[1].trim().parse()?;
            coordinates.push(Coordinate::new(x, y));
        }

        if coordinates.is_empty() {
            bail!("至少需要一個比對座標");
        }

        Ok(coordinates)
    }

    fn print_result(&self, result: &ComparisonResult) {
        println!();
        println!("{}", style("=== 比對摘要 ===").cyan().bold());
        println!(
            "  參考: {} / {} / 影格 {:04}",
            result.reference_collection, result.view, result.frame_index
        );

        for reference in &result.reference {
            println!(
                "  {} 參考色 R={} G={} B={}",
                reference.coordinate, reference.color.r, reference.color.g, reference.color.b
            );
        }

        for sibling in &result.siblings {
            let changed = sibling.entries.iter().filter(|e| e.changed).count();
            println!(
                "  {}: {} 個座標，{} 個超過容差",
                sibling.collection,
                sibling.entries.len(),
                if changed > 0 {
                    style(changed).yellow()
                } else {
                    style(changed).green()
                }
            );
            for entry in &sibling.entries {
                println!(
                    "    {} delta={:.2} {}",
                    entry.coordinate,
                    entry.delta,
                    if entry.changed {
                        style("變化").yellow()
                    } else {
                        style("無變化").green()
                    }
                );
            }
        }

        if !result.skipped.is_empty() {
            println!(
                "  {}",
                style(format!("跳過 {} 個兄弟集合:", result.skipped.len())).yellow()
            );
            for skipped in &result.skipped {
                println!("    {}: {}", skipped.collection, skipped.reason);
            }
        }
    }
}
