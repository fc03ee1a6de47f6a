//! 时间轴渲染
//!
//! 两种布局都先生成与像素无关的 [`Drawing`]（以时间格/行为单位），再由 [`write_svg`] 缩放输出。

// 子模块声明
mod funccalls;
mod goroutines;
mod svg;

use crate::callstack::CallHistory;
use crate::color::ColorRule;
use crate::error::VizError;
use std::str::FromStr;

// 重新导出公共接口
pub use funccalls::layout_funccalls;
pub use goroutines::layout_goroutines;
pub use svg::{escape_xml, write_svg};

/// 布局类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// 每个 slot 一条横条
    Goroutines,
    /// 每次调用一个矩形，按栈深度纵向嵌套
    FuncCalls,
}

impl FromStr for LayoutKind {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "goroutines" => Ok(LayoutKind::Goroutines),
            "funccalls" => Ok(LayoutKind::FuncCalls),
            other => Err(VizError::UnknownLayout(other.to_string())),
        }
    }
}

/// 输出文件类型（目前只有 SVG）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputType {
    #[default]
    Svg,
}

impl FromStr for OutputType {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "svg" => Ok(OutputType::Svg),
            other => Err(VizError::UnsupportedOutputType(other.to_string())),
        }
    }
}

/// 一个带标签的矩形
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub slot: usize,
    /// 纵向位置（行）
    pub row: u64,
    /// 横向起点（逻辑时间）
    pub start: u64,
    pub width: u64,
    pub fill: String,
    pub label: String,
}

/// 布局结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Drawing {
    /// 画布宽度（逻辑时间，即 last time）
    pub width: u64,
    /// 画布高度（行数）
    pub height: u64,
    pub bars: Vec<Bar>,
}

pub fn layout(kind: LayoutKind, history: &CallHistory, color: &ColorRule) -> Drawing {
    match kind {
        LayoutKind::Goroutines => layout_goroutines(history, color),
        LayoutKind::FuncCalls => layout_funccalls(history, color),
    }
}
