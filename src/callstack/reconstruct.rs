//! 重建算法
//!
//! 单遍回放：每处理一个区间，记录一次所有 slot 的快照。
//! gid 相同即认为是当前 goroutine 发起的调用，这只是可视化用的近似，不是严格的因果关系。

use super::arena::{SlotStack, StackArena, StackId};
use crate::trace::Interval;
use std::collections::HashMap;
use tracing::{debug, info, trace};

/// 某一时刻所有 slot 的占用情况
pub type Snapshot = Vec<Option<StackId>>;

/// 重建结果：渲染层唯一需要的输入
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CallHistory {
    pub intervals: Vec<Interval>,
    pub arena: StackArena,
    /// 每处理一个区间追加一个快照
    pub snapshots: Vec<Snapshot>,
    /// 每个 slot 观察到的最大栈深度
    pub max_depth: Vec<usize>,
}

impl CallHistory {
    pub fn node(&self, id: StackId) -> &SlotStack {
        self.arena.get(id)
    }

    pub fn slots(&self) -> usize {
        self.snapshots.last().map_or(0, Vec::len)
    }

    /// 所有开始时间中的最大值
    pub fn max_start_time(&self) -> Option<u64> {
        self.intervals.iter().map(|f| f.start_time).max()
    }
}

/// 输入必须已按开始时间排序（见 [`sort_by_start_time`](crate::trace::sort_by_start_time)）。
#[tracing::instrument(skip(intervals), fields(intervals = intervals.len()))]
pub fn build_callstack(intervals: Vec<Interval>) -> CallHistory {
    let mut arena = StackArena::default();
    let mut snapshots = Vec::with_capacity(intervals.len());
    let mut max_depth: Vec<usize> = Vec::new();

    let mut gidmap: HashMap<i64, usize> = HashMap::new();
    let mut slots: Snapshot = Vec::new();
    let mut depth: Vec<usize> = Vec::new();

    for (idx, f) in intervals.iter().enumerate() {
        let mut placed = false;
        for i in 0..slots.len() {
            // 已经结束的调用强制出栈
            while let Some(top) = slots[i] {
                let node = arena.get(top);
                match node.end_time {
                    Some(end) if end < f.start_time => {
                        trace!(slot = i, gid = node.gid, end, at = f.start_time, "强制出栈");
                        slots[i] = arena.ret(top);
                        depth[i] = depth[i].saturating_sub(1);
                    }
                    _ => break,
                }
            }
            let Some(top) = slots[i] else { continue };

            if arena.get(top).gid == f.gid {
                slots[i] = Some(arena.call(top, idx, f));
                depth[i] += 1;
                max_depth[i] = max_depth[i].max(depth[i]);
                trace!(slot = i, gid = f.gid, depth = depth[i], "调用");
                placed = true;
                break;
            }
        }

        if !placed {
            let root = arena.root(idx, f);
            if let Some(&i) = gidmap.get(&f.gid) {
                debug!(slot = i, gid = f.gid, "复用 goroutine 的 slot");
                slots[i] = Some(root);
                depth[i] = 1;
            } else {
                let i = slots.len();
                debug!(slot = i, gid = f.gid, "分配新 slot");
                slots.push(Some(root));
                depth.push(1);
                max_depth.push(1);
                gidmap.insert(f.gid, i);
            }
        }

        snapshots.push(slots.clone());
    }

    info!(
        slots = slots.len(),
        steps = snapshots.len(),
        nodes = arena.len(),
        "调用栈重建完成"
    );

    CallHistory {
        intervals,
        arena,
        snapshots,
        max_depth,
    }
}
