use crate::component::{CollectionComparator, DatasetSurvey, PixelTracker};
use crate::config::Config;
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn run_pixel_tracker(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &Config,
) -> Result<()> {
    let tracker = PixelTracker::new(config.clone(), Arc::clone(shutdown_signal));

    if let Err(e) = tracker.run() {
        eprintln!("{} {}", style("錯誤:").red().bold(), e);
    }

    pause(term)?;
    Ok(())
}

pub fn run_collection_comparator(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &Config,
) -> Result<()> {
    let comparator = CollectionComparator::new(config.clone(), Arc::clone(shutdown_signal));

    if let Err(e) = comparator.run() {
        eprintln!("{} {}", style("錯誤:").red().bold(), e);
    }

    pause(term)?;
    Ok(())
}

pub fn run_dataset_survey(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &Config,
) -> Result<()> {
    let survey = DatasetSurvey::new(config.clone(), Arc::clone(shutdown_signal));

    if let Err(e) = survey.run() {
        eprintln!("{} {}", style("錯誤:").red().bold(), e);
    }

    pause(term)?;
    Ok(())
}
