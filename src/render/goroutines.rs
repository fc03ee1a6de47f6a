//! goroutines 布局

use super::{Bar, Drawing};
use crate::callstack::{CallHistory, SlotStack};
use crate::color::ColorRule;
use tracing::debug;

/// 每个 slot 画一条横条，取该 slot 在历史中第一次出现的占用者。
///
/// 同一个 slot 后来被再次占用时，后续的占用者不会出现在这个布局里。
pub fn layout_goroutines(history: &CallHistory, color: &ColorRule) -> Drawing {
    let nslots = history.slots();
    let firsts: Vec<(usize, &SlotStack)> = (0..nslots)
        .filter_map(|i| {
            history
                .snapshots
                .iter()
                .find_map(|snap| snap.get(i).copied().flatten())
                .map(|id| (i, history.node(id)))
        })
        .collect();

    let last_time = firsts
        .iter()
        .filter_map(|(_, gr)| gr.end_time)
        .max()
        .or_else(|| firsts.iter().map(|(_, gr)| gr.start_time + 1).max())
        .unwrap_or(0);

    let bars = firsts
        .into_iter()
        .map(|(i, gr)| {
            let end = gr.end_time.unwrap_or(last_time);
            let callee = gr.callee(&history.intervals);
            Bar {
                slot: i,
                row: i as u64,
                start: gr.start_time,
                width: end.saturating_sub(gr.start_time),
                fill: color.get(i, callee).to_string(),
                label: callee.label(),
            }
        })
        .collect::<Vec<_>>();

    debug!(bars = bars.len(), last_time, "goroutines 布局完成");
    Drawing {
        width: last_time,
        height: nslots as u64,
        bars,
    }
}
