//! vpx / maxvpx / minvpx / cvpx 单位转换

use once_cell::sync::Lazy;
use phf::phf_map;
use regex::{Captures, Regex};
use std::borrow::Cow;
use vpx_core::number::{format_number, format_rounded, parse_number};
use vpx_core::{UnitKind, UnitSettings};

use crate::OnConvert;

/// `<number><suffix>vpx`，数字允许负号和小数，整数部分可省略（`.5vpx`）
static UNIT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(-?(?:\d+(?:\.\d+)?|\.\d+))(max|min|c)?vpx")
        .expect("invalid vpx unit pattern")
});

/// 后缀（小写）→ 单位种类
static SUFFIXES: phf::Map<&'static str, UnitKind> = phf_map! {
    "" => UnitKind::Vpx,
    "max" => UnitKind::MaxVpx,
    "min" => UnitKind::MinVpx,
    "c" => UnitKind::ClampVpx,
};

/// 后缀对应的单位种类（不区分大小写），未知后缀返回 None
pub fn unit_kind(suffix: &str) -> Option<UnitKind> {
    SUFFIXES.get(suffix.to_ascii_lowercase().as_str()).copied()
}

/// 转换单个 `<number><suffix>vpx` 片段
///
/// 规则：
/// 1. `|value| <= min_pixel_value` 时直接输出 `<value>px`（任何后缀，含 0）
/// 2. 否则 `vw = value / viewport_width * 100`，按 `unit_precision` 舍入
/// 3. 按后缀包装，负值时交换 max/min（或 clamp 上下限），
///    保证"不低于 / 不超过字面像素值"的语义对负 margin 同样成立
///
/// 数字无法解析或视口宽度为 0 时返回 None，调用方保留原文。
///
/// # 示例
///
/// ```
/// use vpx_convert::convert_token;
/// use vpx_core::UnitSettings;
///
/// let settings = UnitSettings::default();
/// assert_eq!(convert_token("36", "", &settings).as_deref(), Some("9.6vw"));
/// assert_eq!(convert_token("-20", "max", &settings).as_deref(), Some("min(-5.33333vw, -20px)"));
/// ```
pub fn convert_token(number_text: &str, suffix: &str, settings: &UnitSettings) -> Option<String> {
    let kind = unit_kind(suffix)?;
    let pixels = parse_number(number_text)?;
    convert_pixels(pixels, kind, settings)
}

fn convert_pixels(pixels: f64, kind: UnitKind, s: &UnitSettings) -> Option<String> {
    if pixels.abs() <= s.min_pixel_value {
        return Some(format!("{}px", format_number(pixels)));
    }

    let vw = pixels / s.viewport_width * 100.0;
    if !vw.is_finite() {
        return None;
    }

    let precision = s.unit_precision;
    let vw = format_rounded(vw, precision);
    let px = |ratio: f64| format_rounded(pixels * ratio, precision);
    let negative = pixels < 0.0;

    let result = match kind {
        UnitKind::Vpx => format!("{}vw", vw),
        UnitKind::MaxVpx => {
            let op = if negative { "min" } else { "max" };
            format!("{}({}vw, {}px)", op, vw, px(s.max_ratio))
        }
        UnitKind::MinVpx => {
            let op = if negative { "max" } else { "min" };
            format!("{}({}vw, {}px)", op, vw, px(s.min_ratio))
        }
        UnitKind::ClampVpx => {
            let (lower, upper) = if negative {
                (s.clamp_max_ratio, s.clamp_min_ratio)
            } else {
                (s.clamp_min_ratio, s.clamp_max_ratio)
            };
            format!("clamp({}px, {}vw, {}px)", px(lower), vw, px(upper))
        }
        UnitKind::Linear => return None,
    };

    Some(result)
}

/// 替换文本中所有 vpx 单位片段
///
/// 转换失败的片段保留原文；每次成功替换回调一次 `on_convert`。
pub fn convert_units<'t>(
    text: &'t str,
    settings: &UnitSettings,
    on_convert: &mut OnConvert<'_>,
) -> Cow<'t, str> {
    UNIT_PATTERN.replace_all(text, |caps: &Captures| {
        let original = &caps[0];
        let suffix = caps.get(2).map_or("", |m| m.as_str());
        match unit_kind(suffix).zip(convert_token(&caps[1], suffix, settings)) {
            Some((kind, converted)) => {
                on_convert(kind, original, &converted);
                converted
            }
            None => original.to_string(),
        }
    })
}
