//! 栈帧
//!
//! 与 Go 端 `runtime.Frame` 的 JSON 字段名保持一致。

use serde::{Deserialize, Serialize};

/// 一个栈帧。`Func` 字段无法序列化，解码时直接忽略。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Frame {
    #[serde(rename = "PC")]
    pub pc: u64,
    #[serde(rename = "Function")]
    pub function: String,
    #[serde(rename = "File")]
    pub file: String,
    #[serde(rename = "Line")]
    pub line: u32,
    #[serde(rename = "Entry")]
    pub entry: u64,
}

impl Frame {
    /// 源文件的 base name（按 `/` 切分，日志里的路径总是 Go 风格）
    pub fn file_base_name(&self) -> &str {
        self.file.rsplit('/').next().unwrap_or(&self.file)
    }

    /// 渲染用标签：`pkg.func (file.go:42)`
    pub fn label(&self) -> String {
        format!("{} ({}:{})", self.function, self.file_base_name(), self.line)
    }
}
