//! 错误类型
//!
//! 整个流水线（解码 → 匹配 → 重建 → 渲染）共用一个错误枚举，任何错误都会终止本次运行。

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VizError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 某一行不是合法 JSON，或缺少必需字段
    #[error("malformed record at line {line}: {source}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// funcEnd 找不到对应的 funcStart（日志不一致）
    #[error("un-corresponding record: n={n}, gid={gid}, function={function}")]
    UnmatchedEnd { n: u64, gid: i64, function: String },

    /// 事件没有任何栈帧，无法确定被调用者
    #[error("empty stack: n={n}, gid={gid}")]
    EmptyStack { n: u64, gid: i64 },

    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    #[error("unknown layout: {0}")]
    UnknownLayout(String),

    #[error("unknown color rule: {0}")]
    UnknownColorRule(String),

    #[error("unsupported output type: {0}")]
    UnsupportedOutputType(String),

    #[error("invalid config {}: {source}", path.display())]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, VizError>;
