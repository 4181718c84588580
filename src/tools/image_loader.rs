//! 影格載入
//!
//! 引擎本身不做任何 I/O；這裡是外部協作者，負責把影像檔解碼成
//! 引擎看得懂的 `Frame`。通道值統一為 0–255 的 f64，引擎不再正規化

use crate::tools::error::TrackError;
use crate::tools::sample_store::Rgb;
use log::debug;
use std::path::Path;

/// 一張解碼完成的影格，row-major 排列
#[derive(Debug, Clone)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Frame {
    /// 從已解碼的像素建立影格；`pixels.len()` 必須等於 `width * height`
    #[must_use]
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgb>) -> Self {
        debug_assert_eq!(pixels.len(), (width as usize) * (height as usize));
        Self {
            width,
            height,
            pixels,
        }
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// 讀取指定座標的顏色；超出邊界回傳 `None` 而非錯誤
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        if x < self.width && y < self.height {
            let index = (y as usize) * (self.width as usize) + (x as usize);
            self.pixels.get(index).copied()
        } else {
            None
        }
    }
}

/// 載入並解碼一張影格（PNG/JPG/EXR 等由 image crate 支援的格式）
///
/// 載入失敗回傳 `FrameLoadFailed`：比對流程視為可跳過，
/// 單張追蹤流程視為中止
pub fn load_frame(path: &Path) -> Result<Frame, TrackError> {
    let decoded = image::open(path).map_err(|e| TrackError::FrameLoadFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let rgb = decoded.to_rgb8();
    let (width, height) = (rgb.width(), rgb.height());

    let pixels = rgb
        .pixels()
        .map(|p| Rgb::new(f64::from(p[0]), f64::from(p[1]), f64::from(p[2])))
        .collect();

    debug!("載入影格 {} ({}x{})", path.display(), width, height);

    Ok(Frame::from_pixels(width, height, pixels))
}
