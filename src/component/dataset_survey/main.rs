//! 資料集統計主模組

use super::surveyor::{SurveyStats, survey_dataset};
use crate::config::Config;
use crate::config::save::{add_recent_path, save_settings};
use crate::tools::validate_directory_exists;
use anyhow::Result;
use console::style;
use dialoguer::Input;
use log::warn;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// 資料集統計器：列出資料集內所有影格序列的分布
pub struct DatasetSurvey {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl DatasetSurvey {
    pub fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style("=== 資料集統計 ===").cyan().bold());

        let directory = self.prompt_directory()?;
        validate_directory_exists(&directory)?;

        {
            let mut settings = self.config.settings.clone();
            add_recent_path(&mut settings, &directory.to_string_lossy());
            if let Err(e) = save_settings(&settings) {
                warn!("無法儲存最近路徑: {e}");
            }
        }

        println!("{}", style("掃描資料集中...").dim());

        let stats = survey_dataset(
            &directory,
            &self.config.settings.frame_extensions,
            &self.shutdown_signal,
        )?;

        self.print_stats(&stats);

        Ok(())
    }

    fn prompt_directory(&self) -> Result<PathBuf> {
        let path: String = Input::new()
            .with_prompt("請輸入資料集根目錄路徑")
            .interact_text()?;
        Ok(PathBuf::from(path.trim()))
    }

    fn print_stats(&self, stats: &SurveyStats) {
        println!();
        println!("{}", style("=== 資料集統計結果 ===").cyan().bold());
        println!("  子資料夾: {} 個", stats.total_folders);
        println!("  序列: {} 條", stats.total_sequences);
        println!("  影格: {} 張", stats.total_frames);

        if !stats.sequence_types.is_empty() {
            println!("\n  序列類型:");
            let mut types: Vec<_> = stats.sequence_types.iter().collect();
            types.sort();
            for (ext, count) in types {
                println!("    .{ext}: {count} 條");
            }
        }

        if !stats.frame_counts.is_empty() {
            println!("\n  各資料夾影格數:");
            for (folder, count) in &stats.frame_counts {
                println!("    {folder}: {count} 張");
            }
        }

        if !stats.folder_sizes.is_empty() {
            println!("\n  資料夾大小:");
            for (folder, size) in &stats.folder_sizes {
                println!("    {folder}: {:.2} MB", *size as f64 / 1024.0 / 1024.0);
            }
        }

        if !stats.errors.is_empty() {
            println!(
                "\n  {}",
                style(format!("掃描中發生 {} 個錯誤:", stats.errors.len())).yellow()
            );
            for error in &stats.errors {
                println!("    {}", style(error).yellow());
            }
        }
    }
}
