//! 上色规则

use super::palette::generate_colors;
use crate::config::PaletteConfig;
use crate::error::{Result, VizError};
use crate::trace::Frame;
use std::str::FromStr;

/// 上色方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorRuleKind {
    /// 每个 slot（goroutine）一种颜色
    #[default]
    Goroutine,
    /// 按被调用函数的全名
    Function,
    /// 按函数全名中最后一个 `/` 之前（含）的包路径
    Module,
}

impl FromStr for ColorRuleKind {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "goroutine" => Ok(ColorRuleKind::Goroutine),
            "function" => Ok(ColorRuleKind::Function),
            "module" => Ok(ColorRuleKind::Module),
            other => Err(VizError::UnknownColorRule(other.to_string())),
        }
    }
}

/// 已生成调色板的上色规则
#[derive(Debug, Clone)]
pub struct ColorRule {
    kind: ColorRuleKind,
    colors: Vec<String>,
}

impl ColorRule {
    /// 调色板为空时无法取色，视为非法配置。
    pub fn new(kind: ColorRuleKind, palette: &PaletteConfig) -> Result<Self> {
        let colors = generate_colors(palette.ncolors, palette.saturation, palette.value)?;
        if colors.is_empty() {
            return Err(VizError::InvalidPalette(
                "palette must contain at least one color".to_string(),
            ));
        }
        Ok(Self { kind, colors })
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    /// 取 `slot` 上当前调用（被调用帧为 `callee`）的填充色
    pub fn get(&self, slot: usize, callee: &Frame) -> &str {
        let h = match self.kind {
            ColorRuleKind::Goroutine => slot as u64,
            ColorRuleKind::Function => hash_str(&callee.function),
            ColorRuleKind::Module => hash_str(module_of(&callee.function)),
        };
        &self.colors[(h % self.colors.len() as u64) as usize]
    }
}

/// `github.com/a/b.Func` -> `github.com/a/`；没有 `/` 时返回原串
pub fn module_of(function: &str) -> &str {
    match function.rfind('/') {
        Some(pos) => &function[..=pos],
        None => function,
    }
}

/// FNV-1a + splitmix64 收尾（替代 RandomState，保证每次运行颜色一致）
fn hash_str(s: &str) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in s.bytes() {
        h ^= b as u64;
        h = h.wrapping_mul(0x100000001b3);
    }
    mix64(h)
}

fn mix64(mut x: u64) -> u64 {
    // splitmix64
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
