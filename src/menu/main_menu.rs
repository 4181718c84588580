use crate::config::save::save_settings;
use crate::config::types::Config;
use crate::menu::handlers::{run_collection_comparator, run_dataset_survey, run_pixel_tracker};
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn show_main_menu(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<bool> {
    term.clear_screen()?;

    println!("{}", style("=== 像素追蹤與資料集工具 ===").cyan().bold());
    println!("{}", style("按 ESC 離開").dim());

    let options = vec![
        "像素顏色追蹤",
        "跨集合影格比對",
        "資料集統計",
        "設定",
        "離開",
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("請選擇功能")
        .items(&options)
        .default(0)
        .interact_on_opt(term)?;

    match selection {
        Some(0) => {
            run_pixel_tracker(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(1) => {
            run_collection_comparator(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(2) => {
            run_dataset_survey(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(3) => {
            show_settings_menu(term, config)?;
            Ok(true)
        }
        Some(4) => Ok(false),
        None => Ok(false), // ESC pressed - exit
        _ => unreachable!(),
    }
}

/// 設定選單
fn show_settings_menu(term: &Term, config: &mut Config) -> Result<()> {
    loop {
        term.clear_screen()?;

        println!("{}", style("=== 設定 ===").cyan().bold());
        println!("{}", style("按 ESC 返回").dim());

        let options = vec![
            format!("變化容差（目前: {}）", config.settings.tolerance),
            format!(
                "自動追蹤瀏覽影格（目前: {}）",
                if config.settings.auto_track { "開" } else { "關" }
            ),
            format!(
                "集合命名前綴（目前: {:?}）",
                config.settings.collection_prefix
            ),
            "返回".to_string(),
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("請選擇要修改的設定")
            .items(&options)
            .default(0)
            .interact_on_opt(term)?;

        match selection {
            Some(0) => edit_tolerance(config)?,
            Some(1) => toggle_auto_track(config)?,
            Some(2) => edit_collection_prefix(config)?,
            Some(3) | None => break, // ESC or back
            _ => unreachable!(),
        }
    }

    Ok(())
}

fn edit_tolerance(config: &mut Config) -> Result<()> {
    let tolerance: f64 = Input::new()
        .with_prompt("新的變化容差（嚴格大於才算變化）")
        .default(config.settings.tolerance)
        .validate_with(|value: &f64| {
            if *value >= 0.0 {
                Ok(())
            } else {
                Err("容差不可為負")
            }
        })
        .interact_text()?;

    if (tolerance - config.settings.tolerance).abs() > f64::EPSILON {
        config.settings.tolerance = tolerance;
        save_settings(&config.settings)?;
        println!("{} {}", style("已儲存").green(), tolerance);
        std::thread::sleep(std::time::Duration::from_secs(1));
    }

    Ok(())
}

fn toggle_auto_track(config: &mut Config) -> Result<()> {
    config.settings.auto_track = !config.settings.auto_track;
    save_settings(&config.settings)?;
    println!(
        "{} 自動追蹤: {}",
        style("已儲存").green(),
        if config.settings.auto_track { "開" } else { "關" }
    );
    std::thread::sleep(std::time::Duration::from_secs(1));
    Ok(())
}

fn edit_collection_prefix(config: &mut Config) -> Result<()> {
    let prefix: String = Input::new()
        .with_prompt("新的集合命名前綴")
        .default(config.settings.collection_prefix.clone())
        .interact_text()?;

    let prefix = prefix.trim().to_string();
    if !prefix.is_empty() && prefix != config.settings.collection_prefix {
        config.settings.collection_prefix = prefix.clone();
        save_settings(&config.settings)?;
        println!("{} {prefix:?}", style("已儲存").green());
        std::thread::sleep(std::time::Duration::from_secs(1));
    }

    Ok(())
}
