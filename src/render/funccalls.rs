//! funccalls 布局

use super::{Bar, Drawing};
use crate::callstack::{CallHistory, SlotStack, StackId};
use crate::color::ColorRule;
use std::collections::HashSet;
use tracing::debug;

/// 每次调用画一个矩形。
///
/// 纵向：slot 的基准偏移（之前所有 slot 的 `max_depth + 1` 之和）加上栈深度。
/// 未结束的调用先挂起，扫描完整个历史后以最后观察到的结束时间收尾。
pub fn layout_funccalls(history: &CallHistory, color: &ColorRule) -> Drawing {
    let offsets: Vec<u64> = history
        .max_depth
        .iter()
        .scan(0_u64, |acc, d| {
            let y = *acc;
            *acc += *d as u64 + 1;
            Some(y)
        })
        .collect();
    let height: u64 = history.max_depth.iter().map(|d| *d as u64 + 1).sum();

    let mut bars = Vec::new();
    let mut rendered: HashSet<(usize, u64)> = HashSet::new();
    let mut pending: Vec<(usize, StackId)> = Vec::new();
    let mut pending_keys: HashSet<(usize, u64)> = HashSet::new();
    let mut last_time: Option<u64> = None;

    for snap in &history.snapshots {
        for (i, id) in snap.iter().enumerate() {
            let Some(id) = *id else { continue };
            let gr = history.node(id);
            let key = (i, gr.start_time);
            if rendered.contains(&key) {
                continue;
            }
            let Some(end) = gr.end_time else {
                if pending_keys.insert(key) {
                    pending.push((i, id));
                }
                continue;
            };
            last_time = Some(last_time.map_or(end, |t| t.max(end)));
            bars.push(call_bar(history, color, i, offsets[i], gr, end));
            rendered.insert(key);
        }
    }

    let last_time = last_time
        .or_else(|| history.max_start_time().map(|t| t + 1))
        .unwrap_or(0);
    debug!(closed = bars.len(), open = pending.len(), last_time, "funccalls 布局完成");

    for (i, id) in pending {
        bars.push(call_bar(history, color, i, offsets[i], history.node(id), last_time));
    }

    Drawing {
        width: last_time,
        height,
        bars,
    }
}

fn call_bar(
    history: &CallHistory,
    color: &ColorRule,
    slot: usize,
    offset: u64,
    gr: &SlotStack,
    end: u64,
) -> Bar {
    let callee = gr.callee(&history.intervals);
    Bar {
        slot,
        row: offset + gr.depth as u64,
        start: gr.start_time,
        width: end.saturating_sub(gr.start_time),
        fill: color.get(slot, callee).to_string(),
        label: callee.label(),
    }
}
