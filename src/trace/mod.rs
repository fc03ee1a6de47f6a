//! 日志解码与区间匹配
//!
//! 此模块把逐行 JSON 日志解码为 [`Event`]，再把 funcStart/funcEnd 配对为 [`Interval`]。

// 子模块声明
mod decoder;
mod event;
mod frame;
mod interval;

// 重新导出公共接口
pub use decoder::EventReader;
pub use event::{Event, EventTag};
pub use frame::Frame;
pub use interval::{match_intervals, sort_by_start_time, Interval};
