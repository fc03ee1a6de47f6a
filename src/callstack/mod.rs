//! 调用栈重建
//!
//! 按开始时间回放 [`Interval`](crate::trace::Interval)，在有限个显示槽（slot）上
//! 重建每个 goroutine 随时间变化的调用栈。

// 子模块声明
mod arena;
mod reconstruct;

// 重新导出公共接口
pub use arena::{SlotStack, StackArena, StackId};
pub use reconstruct::{build_callstack, CallHistory, Snapshot};
