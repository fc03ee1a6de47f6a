//! 日志事件
//!
//! 一行日志对应一个事件。

use super::frame::Frame;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTag {
    #[serde(rename = "funcStart")]
    FuncStart,
    #[serde(rename = "funcEnd")]
    FuncEnd,
}

/// 单行日志的原始形态（只用于反序列化）
#[derive(Debug, Deserialize)]
pub(crate) struct RawRecord {
    pub tag: EventTag,
    pub gid: i64,
    pub frames: Vec<Frame>,
}

/// 解码后的事件。`frames[0]` 是被调用者，其余是调用链。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub tag: EventTag,
    /// 在非空行中的序号（从 0 开始），作为逻辑时间戳
    pub n: u64,
    pub gid: i64,
    pub frames: Vec<Frame>,
}

impl Event {
    pub fn callee(&self) -> Option<&Frame> {
        self.frames.first()
    }

    pub fn caller(&self) -> &[Frame] {
        self.frames.get(1..).unwrap_or(&[])
    }

    pub fn callee_name(&self) -> &str {
        self.callee().map(|f| f.function.as_str()).unwrap_or("")
    }

    /// 同一个 gid、同一条调用链、同名被调用者，视为同一次调用的开始/结束
    pub fn same_call(&self, other: &Event) -> bool {
        self.gid == other.gid
            && self.caller() == other.caller()
            && self.callee_name() == other.callee_name()
    }
}
