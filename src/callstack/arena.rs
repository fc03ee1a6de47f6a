//! 持久化调用栈
//!
//! 每次 push/pop 都产生一个新的栈节点（或回到父节点），旧节点永不修改，
//! 因此历史中的任意快照都保持有效。

use crate::trace::{Frame, Interval};

/// 栈节点标识符（arena 下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StackId(pub usize);

/// 占据一个 slot 的调用栈顶：当前正在执行的调用，以及指向调用者的链接。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotStack {
    /// 在 `CallHistory::intervals` 中的下标
    pub interval: usize,
    pub start_time: u64,
    pub end_time: Option<u64>,
    pub parent: Option<StackId>,
    pub gid: i64,
    /// 调用者链接数（最外层为 0）
    pub depth: usize,
}

/// 只增不改的节点池
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StackArena {
    nodes: Vec<SlotStack>,
}

impl StackArena {
    pub fn get(&self, id: StackId) -> &SlotStack {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 以 `f` 为最外层调用新建一个栈
    pub fn root(&mut self, idx: usize, f: &Interval) -> StackId {
        self.alloc(idx, f, None, 0)
    }

    /// 在 `caller` 之上调用 `f`，返回新的栈顶；`caller` 本身不变。
    pub fn call(&mut self, caller: StackId, idx: usize, f: &Interval) -> StackId {
        let parent = self.get(caller);
        debug_assert_eq!(parent.gid, f.gid, "not matched gid (goroutine id)");
        let depth = parent.depth + 1;
        self.alloc(idx, f, Some(caller), depth)
    }

    /// 栈顶函数返回，得到调用者；全部返回后为 `None`。
    pub fn ret(&self, id: StackId) -> Option<StackId> {
        self.get(id).parent
    }

    fn alloc(&mut self, idx: usize, f: &Interval, parent: Option<StackId>, depth: usize) -> StackId {
        let id = StackId(self.nodes.len());
        self.nodes.push(SlotStack {
            interval: idx,
            start_time: f.start_time,
            end_time: f.end_time,
            parent,
            gid: f.gid,
            depth,
        });
        id
    }
}

impl SlotStack {
    /// 该栈顶对应的被调用帧
    pub fn callee<'a>(&self, intervals: &'a [Interval]) -> &'a Frame {
        &intervals[self.interval].callee
    }
}
