//! 像素取樣儲存結構
//!
//! 以座標為 key 保存每個追蹤點的顏色序列，並用額外的插入順序列表
//! 保證回報與匯出順序穩定（HashMap 本身不保證順序）

use crate::tools::error::TrackError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 追蹤點座標，以值做身分（同座標重複註冊視為同一點）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: u32,
    pub y: u32,
}

impl Coordinate {
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// 匯出用的穩定標籤，例如 `x12_y34`，可從字串還原座標
    #[must_use]
    pub fn label(&self) -> String {
        format!("x{}_y{}", self.x, self.y)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 單次顏色觀測值
///
/// 通道值域由呼叫端決定（8-bit 載入器給 0–255），引擎不做正規化
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// 通道空間的歐氏距離
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        db.mul_add(db, dr.mul_add(dr, dg * dg)).sqrt()
    }
}

/// 取樣儲存：座標 -> 依影格順序的顏色序列
///
/// 容許各座標序列長度不一致（中途加入的座標取樣較少），
/// 所有演算法都必須防禦性地依實際長度存取
#[derive(Debug, Default, Clone)]
pub struct SampleStore {
    samples: HashMap<Coordinate, Vec<Rgb>>,
    /// 插入順序，決定回報與匯出順序
    order: Vec<Coordinate>,
}

impl SampleStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// 註冊追蹤座標；已存在則不動作（不視為錯誤）
    pub fn add_coordinate(&mut self, x: u32, y: u32) {
        let coord = Coordinate::new(x, y);
        if !self.samples.contains_key(&coord) {
            self.samples.insert(coord, Vec::new());
            self.order.push(coord);
        }
    }

    /// 將一筆取樣附加到指定座標的序列尾端
    ///
    /// 座標必須先經過 `add_coordinate` 註冊，否則回傳 `UnknownCoordinate`
    pub fn record(&mut self, coord: Coordinate, rgb: Rgb) -> Result<(), TrackError> {
        match self.samples.get_mut(&coord) {
            Some(sequence) => {
                sequence.push(rgb);
                Ok(())
            }
            None => Err(TrackError::UnknownCoordinate {
                x: coord.x,
                y: coord.y,
            }),
        }
    }

    /// 清空所有座標與取樣
    pub fn reset(&mut self) {
        self.samples.clear();
        self.order.clear();
    }

    /// 是否從未收到任何取樣（只註冊座標但沒有取樣也算空）
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.values().all(Vec::is_empty)
    }

    /// 依插入順序列出所有座標
    #[must_use]
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.order
    }

    /// 取得指定座標的取樣序列
    #[must_use]
    pub fn samples(&self, coord: &Coordinate) -> Option<&[Rgb]> {
        self.samples.get(coord).map(Vec::as_slice)
    }

    /// 追蹤座標數量
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.order.len()
    }

    /// 最長序列的長度（各座標可能不一致）
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.samples.values().map(Vec::len).max().unwrap_or(0)
    }
}
