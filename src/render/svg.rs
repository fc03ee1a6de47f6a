//! SVG 输出
//!
//! 直接拼接文本，矩形之后紧跟其标签。

use super::Drawing;
use crate::config::ViewerConfig;
use crate::error::Result;
use std::io::Write;

pub fn write_svg<W: Write>(drawing: &Drawing, cfg: &ViewerConfig, out: &mut W) -> Result<()> {
    let cw = cfg.cell_width as u64;
    let ch = cfg.cell_height as u64;
    let font_size = cfg.font_size();
    let label_fill = escape_xml(&cfg.label_fill);

    writeln!(out, r#"<?xml version="1.0" encoding="utf-8" ?>"#)?;
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" baseProfile="full" width="100%" height="100%" viewBox="0 0 {} {}">"#,
        drawing.width * cw,
        drawing.height * ch
    )?;
    for bar in &drawing.bars {
        let x = bar.start * cw;
        let y = bar.row * ch;
        writeln!(
            out,
            r#"  <rect x="{x}" y="{y}" width="{}" height="{ch}" fill="{}"/>"#,
            bar.width * cw,
            escape_xml(&bar.fill)
        )?;
        writeln!(
            out,
            r#"  <text x="{x}" y="{}" font-size="{font_size}" fill="{label_fill}">{}</text>"#,
            y + ch,
            escape_xml(&bar.label)
        )?;
    }
    writeln!(out, "</svg>")?;
    out.flush()?;
    Ok(())
}

pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
