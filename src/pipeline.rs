//! 端到端流水线：解码 → 匹配 → 排序 → 重建 → 渲染

use crate::callstack::{build_callstack, CallHistory};
use crate::color::{ColorRule, ColorRuleKind};
use crate::config::ViewerConfig;
use crate::error::Result;
use crate::render::{self, Drawing, LayoutKind, OutputType};
use crate::trace::{match_intervals, sort_by_start_time, EventReader};
use std::io::{BufRead, Write};
use tracing::info;

/// 一次渲染所需的全部选择
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub output_type: OutputType,
    pub color_rule: ColorRuleKind,
    pub layout: LayoutKind,
    pub config: ViewerConfig,
}

impl RenderOptions {
    pub fn new(layout: LayoutKind) -> Self {
        Self {
            output_type: OutputType::Svg,
            color_rule: ColorRuleKind::Goroutine,
            layout,
            config: ViewerConfig::default(),
        }
    }
}

/// 运行统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceSummary {
    pub events: u64,
    pub intervals: usize,
    pub open_intervals: usize,
    pub slots: usize,
    pub max_depth_total: usize,
    pub last_time: u64,
}

impl TraceSummary {
    fn new(events: u64, history: &CallHistory, drawing: &Drawing) -> Self {
        Self {
            events,
            intervals: history.intervals.len(),
            open_intervals: history.intervals.iter().filter(|f| f.is_open()).count(),
            slots: history.max_depth.len(),
            max_depth_total: history.max_depth.iter().sum(),
            last_time: drawing.width,
        }
    }
}

/// 读取整份日志并重建调用栈历史
pub fn reconstruct<R: BufRead>(input: R) -> Result<(u64, CallHistory)> {
    let mut events = 0_u64;
    let intervals = match_intervals(EventReader::new(input).inspect(|ev| {
        if ev.is_ok() {
            events += 1;
        }
    }))?;
    Ok((events, build_callstack(sort_by_start_time(intervals))))
}

#[tracing::instrument(skip_all, fields(layout = ?opts.layout, color_rule = ?opts.color_rule))]
pub fn render_trace<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    opts: &RenderOptions,
) -> Result<TraceSummary> {
    // 先构造调色板，参数非法时不必读日志
    let color = ColorRule::new(opts.color_rule, &opts.config.palette)?;
    let (events, history) = reconstruct(input)?;
    let drawing = render::layout(opts.layout, &history, &color);

    match opts.output_type {
        OutputType::Svg => render::write_svg(&drawing, &opts.config, output)?,
    }

    let summary = TraceSummary::new(events, &history, &drawing);
    info!(?summary, "渲染完成");
    Ok(summary)
}
