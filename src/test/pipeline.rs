use super::fixtures::{line, nested_log};
use crate::color::ColorRuleKind;
use crate::config::{PaletteConfig, ViewerConfig};
use crate::error::VizError;
use crate::pipeline::{reconstruct, render_trace, RenderOptions, TraceSummary};
use crate::render::LayoutKind;
use std::io::Cursor;

fn render(raw: &str, opts: &RenderOptions) -> Result<(TraceSummary, String), VizError> {
    let mut out = Vec::new();
    let summary = render_trace(Cursor::new(raw.to_string()), &mut out, opts)?;
    Ok((summary, String::from_utf8(out).expect("utf8")))
}

#[test]
fn nested_log_reconstructs_one_slot_with_depth_two() {
    let (events, h) = reconstruct(Cursor::new(nested_log())).expect("reconstruct");
    assert_eq!(events, 4);
    assert_eq!(h.intervals.len(), 2);
    assert_eq!(h.max_depth, vec![2]);
}

#[test]
fn nested_log_goroutines_layout() {
    let (summary, svg) =
        render(&nested_log(), &RenderOptions::new(LayoutKind::Goroutines)).expect("render");

    assert_eq!(
        summary,
        TraceSummary {
            events: 4,
            intervals: 2,
            open_intervals: 0,
            slots: 1,
            max_depth_total: 2,
            last_time: 3,
        }
    );
    assert_eq!(svg.matches("<rect").count(), 1);
    assert!(svg.contains(r#"viewBox="0 0 60 20""#));
    assert!(svg.contains(r#"width="60" height="20""#));
    assert!(svg.contains("main.f (main.go:1)"));
}

#[test]
fn nested_log_funccalls_layout() {
    let mut opts = RenderOptions::new(LayoutKind::FuncCalls);
    opts.color_rule = ColorRuleKind::Function;
    let (_, svg) = render(&nested_log(), &opts).expect("render");

    assert_eq!(svg.matches("<rect").count(), 2);
    assert!(svg.contains(r#"viewBox="0 0 60 60""#));
    assert!(svg.contains(r#"<rect x="0" y="0" width="60" height="20""#));
    assert!(svg.contains(r#"<rect x="20" y="20" width="20" height="20""#));
    assert!(svg.contains("main.g (main.go:2)"));
}

#[test]
fn unmatched_end_fails_the_run() {
    let raw = [
        line("funcStart", 1, &[("main.f", 1)]),
        line("funcEnd", 2, &[("main.f", 1)]),
    ]
    .join("\n");
    let res = render(&raw, &RenderOptions::new(LayoutKind::Goroutines));
    assert!(matches!(res, Err(VizError::UnmatchedEnd { gid: 2, .. })));
}

#[test]
fn invalid_palette_fails_before_reading_input() {
    let mut opts = RenderOptions::new(LayoutKind::Goroutines);
    opts.config = ViewerConfig {
        palette: PaletteConfig {
            ncolors: 5,
            saturation: 0.9,
            value: 0.5,
        },
        ..ViewerConfig::default()
    };
    let res = render("not json", &opts);
    assert!(matches!(res, Err(VizError::InvalidPalette(_))));
}

#[test]
fn empty_input_renders_empty_document() {
    let (summary, svg) =
        render("\n", &RenderOptions::new(LayoutKind::FuncCalls)).expect("render");
    assert_eq!(summary, TraceSummary::default());
    assert!(svg.contains(r#"viewBox="0 0 0 0""#));
    assert!(!svg.contains("<rect"));
}
