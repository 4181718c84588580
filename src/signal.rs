use log::info;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 設定 Ctrl-C 中斷旗標
///
/// 批次流程（追蹤、比對、掃描）在迴圈內檢查這個旗標以便安全停止
#[must_use]
pub fn setup_shutdown_signal() -> Arc<AtomicBool> {
    let shutdown_signal = Arc::new(AtomicBool::new(false));
    let signal_clone = Arc::clone(&shutdown_signal);

    ctrlc::set_handler(move || {
        signal_clone.store(true, Ordering::SeqCst);
        info!("收到中斷信號，正在安全關閉...");
        eprintln!("\n收到中斷信號，正在安全關閉...");
    })
    .expect("無法設定 Ctrl-C 處理器");

    shutdown_signal
}
