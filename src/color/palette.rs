//! HSV 调色板

use crate::error::{Result, VizError};

/// 在 HSV 色相环上等间隔取 `ncolors` 个颜色，返回 `#rrggbb` 字符串。
///
/// 使用圆锥模型（chroma 取 `s`），因此必须满足 `0 <= s <= v <= 1`。
pub fn generate_colors(ncolors: i64, s: f64, v: f64) -> Result<Vec<String>> {
    if ncolors < 0 {
        return Err(VizError::InvalidPalette(format!(
            "ncolors must be not less than 0. but ncolors={ncolors}"
        )));
    }
    if !(0.0..=1.0).contains(&s) || !(0.0..=1.0).contains(&v) {
        return Err(VizError::InvalidPalette(format!(
            "s and v must be in [0, 1]. s={s}, v={v}"
        )));
    }
    if s > v {
        return Err(VizError::InvalidPalette(format!(
            "s <= v is not satisfied. s={s}, v={v}"
        )));
    }

    Ok((0..ncolors)
        .map(|i| {
            let (r, g, b) = hsv2rgb(i as f64 / ncolors as f64, s, v);
            format!("#{r:02x}{g:02x}{b:02x}")
        })
        .collect())
}

/// `h` 取值 [0, 1)；各分量截断为整数
fn hsv2rgb(h: f64, s: f64, v: f64) -> (u8, u8, u8) {
    let hh = 360.0 * h / 60.0;
    let c = s;
    let x = c * (1.0 - ((hh % 2.0) - 1.0).abs());
    let (r, g, b) = match hh as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = v - c;
    let to_u8 = |t: f64| (255.0 * (m + t)) as u8;
    (to_u8(r), to_u8(g), to_u8(b))
}
