//! 像素追蹤主模組
//!
//! 協調影格序列掃描、平行載入與循序取樣的整體流程，
//! 追蹤完成後可將結果匯出為 CSV、欄式資料包與中繼資料

use super::frame_sampler::{peek, track_frame};
use crate::config::Config;
use crate::config::save::{add_recent_path, save_settings};
use crate::tools::{
    Frame, FrameEntry, SampleStore, TrackError, export_bundle, export_metadata,
    export_tracking_csv, load_frame, scan_sequence_frames, validate_directory_exists,
};
use anyhow::{Context, Result, bail};
use console::style;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 像素追蹤器：對一條影格序列追蹤指定座標的顏色演變
pub struct PixelTracker {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

/// 追蹤批次的結果統計
#[derive(Debug, Default)]
struct TrackingSummary {
    frames_tracked: usize,
    frames_failed: usize,
    samples_skipped: usize,
}

impl PixelTracker {
    pub fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style("=== 像素顏色追蹤 ===").cyan().bold());

        let directory = self.prompt_directory()?;
        validate_directory_exists(&directory)?;
        self.remember_path(&directory);

        println!("{}", style("掃描影格序列中...").dim());
        let frames = scan_sequence_frames(&directory, &self.config.settings.frame_extensions)?;

        if frames.is_empty() {
            println!("{}", style("找不到任何序列影格").yellow());
            return Ok(());
        }

        println!(
            "{}",
            style(format!("找到 {} 張序列影格", frames.len())).green()
        );

        let coordinates = self.prompt_coordinates()?;

        let mut store = SampleStore::new();
        for (x, y) in &coordinates {
            store.add_coordinate(*x, *y);
        }

        // 懸停檢視：讀顏色但不記錄，不污染追蹤歷史
        while Confirm::new()
            .with_prompt("要先檢視單一影格的顏色嗎？")
            .default(false)
            .interact()?
        {
            self.inspect_frame(&frames, &store)?;
        }

        // auto_track 開啟時直接開始，否則先確認
        if !self.config.settings.auto_track
            && !Confirm::new()
                .with_prompt(format!("開始追蹤 {} 個座標？", store.pixel_count()))
                .default(true)
                .interact()?
        {
            println!("{}", style("追蹤已取消").yellow());
            return Ok(());
        }

        let summary = self.track_sequence(&frames, &mut store)?;

        if self.shutdown_signal.load(Ordering::SeqCst) {
            println!("{}", style("操作已取消").yellow());
            return Ok(());
        }

        self.print_summary(&store, &summary);

        if Confirm::new()
            .with_prompt("要匯出追蹤結果嗎？")
            .default(true)
            .interact()?
        {
            self.export_results(&store, &directory);
        }

        Ok(())
    }

    fn prompt_directory(&self) -> Result<PathBuf> {
        let mut prompt = Input::new().with_prompt("請輸入影格序列資料夾路徑");
        if let Some(recent) = self.config.settings.recent_paths.first() {
            prompt = prompt.default(recent.clone());
        }
        let path: String = prompt.interact_text()?;
        Ok(PathBuf::from(path.trim()))
    }

    /// 把用過的路徑記到最近清單，儲存失敗只警告
    fn remember_path(&self, directory: &Path) {
        let mut settings = self.config.settings.clone();
        add_recent_path(&mut settings, &directory.to_string_lossy());
        if let Err(e) = save_settings(&settings) {
            warn!("無法儲存最近路徑: {e}");
        }
    }

    fn prompt_coordinates(&self) -> Result<Vec<(u32, u32)>> {
        let input: String = Input::new()
            .with_prompt("請輸入追蹤座標（格式: x,y x,y ...）")
            .interact_text()?;
        parse_coordinate_list(&input)
    }

    /// 懸停檢視：挑一張影格與一個座標，只讀顏色不記錄
    fn inspect_frame(&self, frames: &[FrameEntry], store: &SampleStore) -> Result<()> {
        let frame_number: usize = Input::new()
            .with_prompt(format!("影格序號 (0-{})", frames.len() - 1))
            .interact_text()?;

        let Some(entry) = frames.get(frame_number) else {
            println!("{}", style("序號超出範圍").yellow());
            return Ok(());
        };

        let frame = load_frame(&entry.path)
            .with_context(|| format!("無法載入影格: {}", entry.path.display()))?;

        for coord in store.coordinates() {
            match peek(&frame, *coord) {
                Some(rgb) => println!(
                    "  {} -> R={} G={} B={}",
                    coord, rgb.r, rgb.g, rgb.b
                ),
                None => println!("  {} -> {}", coord, style("超出影格範圍").yellow()),
            }
        }

        Ok(())
    }

    /// 平行解碼、依影格順序循序記錄
    ///
    /// 取樣儲存不是執行緒安全的：解碼用 rayon 分散，記錄一律在
    /// 呼叫端執行緒按順序進行
    fn track_sequence(
        &self,
        frames: &[FrameEntry],
        store: &mut SampleStore,
    ) -> Result<TrackingSummary> {
        let progress_bar = ProgressBar::new(frames.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
                )
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );
        progress_bar.set_message("解碼影格中...");

        // par_iter + collect 保持與輸入相同的順序
        let decoded: Vec<Result<Frame, TrackError>> = frames
            .par_iter()
            .map(|entry| {
                if self.shutdown_signal.load(Ordering::SeqCst) {
                    return Err(TrackError::FrameLoadFailed {
                        path: entry.path.clone(),
                        reason: "操作已取消".to_string(),
                    });
                }
                let result = load_frame(&entry.path);
                progress_bar.inc(1);
                result
            })
            .collect();

        progress_bar.finish_with_message("解碼完成");

        let mut summary = TrackingSummary::default();
        for (entry, result) in frames.iter().zip(decoded) {
            if self.shutdown_signal.load(Ordering::SeqCst) {
                info!("收到中斷訊號，停止追蹤");
                break;
            }

            match result {
                Ok(frame) => {
                    let report = track_frame(store, &frame)?;
                    summary.frames_tracked += 1;
                    summary.samples_skipped += report.skipped;
                }
                Err(e) => {
                    // 批次中的單幀錯誤：記錄後跳過，不中止整批
                    warn!("影格載入失敗，跳過 {}: {e}", entry.path.display());
                    summary.frames_failed += 1;
                }
            }
        }

        Ok(summary)
    }

    fn print_summary(&self, store: &SampleStore, summary: &TrackingSummary) {
        println!();
        println!("{}", style("=== 追蹤摘要 ===").cyan().bold());
        println!("  追蹤影格: {} 張", summary.frames_tracked);
        if summary.frames_failed > 0 {
            println!(
                "  載入失敗: {} 張",
                style(summary.frames_failed).yellow()
            );
        }
        if summary.samples_skipped > 0 {
            println!(
                "  超出範圍跳過: {} 筆",
                style(summary.samples_skipped).yellow()
            );
        }

        let tolerance = self.config.settings.tolerance;
        for (coord, points) in crate::tools::classify_store(store, tolerance) {
            let changed = points.iter().filter(|p| p.changed).count();
            println!(
                "  {coord}: {} 筆取樣，{} 筆超過容差 {tolerance}",
                points.len(),
                if changed > 0 {
                    style(changed).yellow()
                } else {
                    style(changed).green()
                }
            );
        }

        info!(
            "追蹤完成 - 影格: {}, 失敗: {}, 跳過取樣: {}",
            summary.frames_tracked, summary.frames_failed, summary.samples_skipped
        );
    }

    /// 匯出三種格式；空儲存只警告不寫檔
    fn export_results(&self, store: &SampleStore, directory: &Path) {
        let settings = &self.config.settings;
        let exports: [(&str, Result<()>); 3] = [
            (
                "tracking.csv",
                export_tracking_csv(store, settings.tolerance, &directory.join("tracking.csv")),
            ),
            (
                "tracking_bundle.json",
                export_bundle(store, settings.tolerance, &directory.join("tracking_bundle.json")),
            ),
            (
                "tracking_metadata.json",
                export_metadata(
                    store,
                    settings.tolerance,
                    settings.auto_track,
                    &directory.join("tracking_metadata.json"),
                ),
            ),
        ];

        for (name, result) in exports {
            match result {
                Ok(()) => println!("  {} {}", style("已匯出").green(), name),
                Err(e) => {
                    warn!("匯出 {name} 失敗: {e}");
                    println!("  {} {name}: {e}", style("匯出失敗").yellow());
                }
            }
        }
    }
}

/// 解析 `x,y x,y ...` 格式的座標清單（分隔可用空白或分號）
fn parse_coordinate_list(input: &str) -> Result<Vec<(u32, u32)>> {
    let mut coordinates = Vec::new();

    for token in input.split([' ', ';']).filter(|t| !t.trim().is_empty()) {
        let parts: Vec<&str> = token.trim().split(',').collect();
        if parts.len() != 2 {
            bail!("座標格式錯誤: {token}（應為 x,y）");
        }
        let x: u32 = parts[0]
            .trim()
            .parse()
            .with_context(|| format!("無法解析 x 座標: {token}"))?;
        let y: u32 = parts[1]
            .trim()
            .parse()
            .with_context(|| format!("無法解析 y 座標: {token}"))?;
        coordinates.push((x, y));
    }

    if coordinates.is_empty() {
        bail!("至少需要一個追蹤座標");
    }

    Ok(coordinates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate_list() {
        let coords = parse_coordinate_list("10,20 30,40; 5,5").unwrap();
        assert_eq!(coords, vec![(10, 20), (30, 40), (5, 5)]);
    }

    #[test]
    fn test_parse_coordinate_list_rejects_malformed() {
        assert!(parse_coordinate_list("10").is_err());
        assert!(parse_coordinate_list("a,b").is_err());
        assert!(parse_coordinate_list("").is_err());
        assert!(parse_coordinate_list("1,2,3").is_err());
    }

    #[test]
    fn test_parse_coordinate_list_trims_whitespace() {
        let coords = parse_coordinate_list("  1 , 2   ").unwrap();
        assert_eq!(coords, vec![(1, 2)]);
    }
}
