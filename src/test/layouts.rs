use super::fixtures::interval;
use crate::callstack::build_callstack;
use crate::color::{ColorRule, ColorRuleKind};
use crate::config::{PaletteConfig, ViewerConfig};
use crate::error::VizError;
use crate::render::{
    escape_xml, layout_funccalls, layout_goroutines, write_svg, Bar, Drawing, LayoutKind,
    OutputType,
};

fn slot_colors() -> ColorRule {
    ColorRule::new(ColorRuleKind::Goroutine, &PaletteConfig::default()).expect("rule")
}

fn nested_history() -> crate::callstack::CallHistory {
    build_callstack(vec![
        interval(1, &[("main.f", 1)], 0, Some(3)),
        interval(1, &[("main.g", 2), ("main.f", 1)], 1, Some(2)),
    ])
}

#[test]
fn goroutines_layout_draws_one_bar_per_slot() {
    let d = layout_goroutines(&nested_history(), &slot_colors());

    assert_eq!((d.width, d.height), (3, 1));
    assert_eq!(d.bars.len(), 1);
    let bar = &d.bars[0];
    assert_eq!((bar.row, bar.start, bar.width), (0, 0, 3));
    assert_eq!(bar.label, "main.f (main.go:1)");
}

#[test]
fn goroutines_layout_extends_open_calls_to_last_time() {
    let h = build_callstack(vec![
        interval(1, &[("main.main", 1)], 0, None),
        interval(2, &[("main.worker", 7)], 1, Some(5)),
    ]);
    let d = layout_goroutines(&h, &slot_colors());

    assert_eq!((d.width, d.height), (5, 2));
    assert_eq!((d.bars[0].start, d.bars[0].width), (0, 5));
    assert_eq!((d.bars[1].row, d.bars[1].start, d.bars[1].width), (1, 1, 4));
}

#[test]
fn goroutines_layout_only_draws_first_occupant_of_reused_slot() {
    let h = build_callstack(vec![
        interval(1, &[("main.a", 1)], 0, Some(1)),
        interval(1, &[("main.b", 2)], 2, Some(6)),
    ]);
    let d = layout_goroutines(&h, &slot_colors());

    assert_eq!(d.bars.len(), 1);
    assert_eq!(d.bars[0].label, "main.a (main.go:1)");
    assert_eq!(d.width, 1);
}

#[test]
fn funccalls_layout_nests_by_depth() {
    let d = layout_funccalls(&nested_history(), &slot_colors());

    assert_eq!((d.width, d.height), (3, 3));
    let rows: Vec<(u64, u64, u64)> = d.bars.iter().map(|b| (b.row, b.start, b.width)).collect();
    assert_eq!(rows, vec![(0, 0, 3), (1, 1, 1)]);
}

#[test]
fn funccalls_layout_offsets_slots_by_max_depth() {
    let h = build_callstack(vec![
        interval(1, &[("main.f", 1)], 0, Some(4)),
        interval(1, &[("main.g", 2), ("main.f", 1)], 1, Some(2)),
        interval(2, &[("main.w", 9)], 3, Some(5)),
    ]);
    let d = layout_funccalls(&h, &slot_colors());

    // slot 0: max_depth 2 -> 3 行；slot 1 从第 3 行开始
    assert_eq!(d.height, 3 + 2);
    let w = d.bars.iter().find(|b| b.slot == 1).expect("slot 1 bar");
    assert_eq!((w.row, w.start, w.width), (3, 3, 2));
}

#[test]
fn funccalls_layout_draws_each_call_once() {
    let h = build_callstack(vec![
        interval(1, &[("main.f", 1)], 0, Some(9)),
        interval(1, &[("main.g", 2), ("main.f", 1)], 1, Some(2)),
        interval(1, &[("main.h", 3), ("main.f", 1)], 3, Some(4)),
        interval(1, &[("main.k", 4), ("main.f", 1)], 5, Some(6)),
    ]);
    let d = layout_funccalls(&h, &slot_colors());

    assert_eq!(d.bars.len(), 4);
    let mut starts: Vec<u64> = d.bars.iter().map(|b| b.start).collect();
    starts.sort_unstable();
    assert_eq!(starts, vec![0, 1, 3, 5]);
}

#[test]
fn funccalls_layout_defers_open_calls_until_last_end() {
    let h = build_callstack(vec![
        interval(1, &[("main.main", 1)], 0, None),
        interval(1, &[("main.run", 2), ("main.main", 1)], 1, Some(4)),
        interval(2, &[("main.worker", 7)], 2, Some(6)),
    ]);
    let d = layout_funccalls(&h, &slot_colors());

    assert_eq!(d.width, 6);
    let last = d.bars.last().expect("bars");
    assert_eq!(last.label, "main.main (main.go:1)");
    assert_eq!((last.row, last.start, last.width), (0, 0, 6));
    assert_eq!(d.bars.len(), 3);
}

#[test]
fn funccalls_layout_without_any_end_uses_last_start() {
    let h = build_callstack(vec![
        interval(1, &[("main.main", 1)], 0, None),
        interval(2, &[("main.worker", 7)], 4, None),
    ]);
    let d = layout_funccalls(&h, &slot_colors());

    assert_eq!(d.width, 5);
    let widths: Vec<u64> = d.bars.iter().map(|b| b.width).collect();
    assert_eq!(widths, vec![5, 1]);
}

#[test]
fn layouts_on_empty_history_are_empty() {
    let h = build_callstack(Vec::new());
    for d in [layout_goroutines(&h, &slot_colors()), layout_funccalls(&h, &slot_colors())] {
        assert_eq!(d, Drawing::default());
    }
}

#[test]
fn svg_scales_cells_and_escapes_labels() {
    let d = Drawing {
        width: 3,
        height: 2,
        bars: vec![Bar {
            slot: 0,
            row: 1,
            start: 1,
            width: 2,
            fill: "#b21919".to_string(),
            label: "main.(*T).<lambda> (a&b.go:4)".to_string(),
        }],
    };
    let mut out = Vec::new();
    write_svg(&d, &ViewerConfig::default(), &mut out).expect("write");
    let svg = String::from_utf8(out).expect("utf8");

    assert!(svg.contains(r#"viewBox="0 0 60 40""#));
    assert!(svg.contains(r##"<rect x="20" y="20" width="40" height="20" fill="#b21919"/>"##));
    assert!(svg.contains(r##"<text x="20" y="40" font-size="20" fill="#000">"##));
    assert!(svg.contains("main.(*T).&lt;lambda&gt; (a&amp;b.go:4)"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn escape_xml_handles_quotes() {
    assert_eq!(escape_xml(r#"a"b'c"#), "a&quot;b&apos;c");
}

#[test]
fn layout_and_output_type_parse_cli_names() {
    assert_eq!("goroutines".parse::<LayoutKind>().expect("parse"), LayoutKind::Goroutines);
    assert_eq!("funccalls".parse::<LayoutKind>().expect("parse"), LayoutKind::FuncCalls);
    assert!(matches!("flame".parse::<LayoutKind>(), Err(VizError::UnknownLayout(_))));
    assert_eq!("svg".parse::<OutputType>().expect("parse"), OutputType::Svg);
    assert!(matches!(
        "png".parse::<OutputType>(),
        Err(VizError::UnsupportedOutputType(_))
    ));
}
