//! 上色规则
//!
//! 调色板在配置阶段生成一次，之后按 slot / 函数 / 模块做确定性的 hash 取色。

mod palette;
mod rule;

pub use palette::generate_colors;
pub use rule::{module_of, ColorRule, ColorRuleKind};
