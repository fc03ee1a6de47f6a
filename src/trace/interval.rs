//! 区间匹配
//!
//! 把 funcStart/funcEnd 事件配对成一次函数调用的生命周期。

use super::event::{Event, EventTag};
use super::frame::Frame;
use crate::error::{Result, VizError};
use tracing::{debug, info};

/// 一次函数调用：`[start_time, end_time)`。`end_time` 为 `None` 表示日志结束时仍未返回。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    pub callee: Frame,
    /// 调用链，从内到外
    pub caller: Vec<Frame>,
    pub start_time: u64,
    pub end_time: Option<u64>,
    pub gid: i64,
}

impl Interval {
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    /// 栈帧为空的事件无法成为一次调用
    fn from_start(start: Event, end_time: Option<u64>) -> Result<Self> {
        let mut frames = start.frames.into_iter();
        let callee = frames
            .next()
            .ok_or(VizError::EmptyStack { n: start.n, gid: start.gid })?;
        Ok(Interval {
            callee,
            caller: frames.collect(),
            start_time: start.n,
            end_time,
            gid: start.gid,
        })
    }
}

/// 按事件顺序配对。先产出已配对的区间（按匹配顺序），再产出未结束的调用（按开始顺序）。
///
/// 匹配严格要求 (gid, 调用链, 被调用函数名) 完全相同；找不到对应 funcStart 时返回
/// [`VizError::UnmatchedEnd`]。
#[tracing::instrument(skip(events))]
pub fn match_intervals<I>(events: I) -> Result<Vec<Interval>>
where
    I: IntoIterator<Item = Result<Event>>,
{
    let mut open: Vec<Event> = Vec::new();
    let mut out = Vec::new();
    let mut n_events = 0_u64;

    for ev in events {
        let ev = ev?;
        n_events += 1;
        match ev.tag {
            EventTag::FuncStart => {
                if ev.frames.is_empty() {
                    return Err(VizError::EmptyStack { n: ev.n, gid: ev.gid });
                }
                open.push(ev)
            }
            EventTag::FuncEnd => {
                let Some(pos) = open.iter().position(|s| s.same_call(&ev)) else {
                    return Err(VizError::UnmatchedEnd {
                        n: ev.n,
                        gid: ev.gid,
                        function: ev.callee_name().to_string(),
                    });
                };
                let start = open.remove(pos);
                debug!(gid = ev.gid, start = start.n, end = ev.n, "匹配到调用");
                out.push(Interval::from_start(start, Some(ev.n))?);
            }
        }
    }

    let matched = out.len();
    for s in open {
        out.push(Interval::from_start(s, None)?);
    }
    info!(
        events = n_events,
        matched,
        open = out.len() - matched,
        "区间匹配完成"
    );
    Ok(out)
}

/// 按开始时间稳定排序（开始时间相同的保持匹配器的产出顺序）
pub fn sort_by_start_time(mut intervals: Vec<Interval>) -> Vec<Interval> {
    intervals.sort_by_key(|f| f.start_time);
    intervals
}
