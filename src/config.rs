//! 渲染配置
//!
//! 所有字段都有默认值；`--config` 指定的 JSON 文件只需写出要覆盖的字段。

use crate::error::{Result, VizError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 时间轴一格的宽度（像素）
pub const CELL_WIDTH: u32 = 20;
/// 一层调用栈的高度（像素）
pub const CELL_HEIGHT: u32 = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub cell_width: u32,
    pub cell_height: u32,
    pub palette: PaletteConfig,
    /// 标签字号；不填则与 `cell_height` 相同
    pub font_size: Option<u32>,
    pub label_fill: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub ncolors: i64,
    pub saturation: f64,
    pub value: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            cell_width: CELL_WIDTH,
            cell_height: CELL_HEIGHT,
            palette: PaletteConfig::default(),
            font_size: None,
            label_fill: "#000".to_string(),
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            ncolors: 5,
            saturation: 0.6,
            value: 0.7,
        }
    }
}

impl ViewerConfig {
    pub fn from_json(path: &Path, raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|source| VizError::InvalidConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(path, &raw)
    }

    pub fn font_size(&self) -> u32 {
        self.font_size.unwrap_or(self.cell_height)
    }
}
