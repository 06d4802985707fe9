//! linear-vpx() 线性插值转换

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;
use vpx_core::number::{format_rounded, parse_number};
use vpx_core::{UnitKind, UnitSettings};

use crate::OnConvert;

/// `linear-vpx(min, max)` 或 `linear-vpx(min, max, minWidth, maxWidth)`，参数间允许任意空白
static LINEAR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)linear-vpx\(\s*(-?(?:\d+(?:\.\d+)?|\.\d+))\s*,\s*(-?(?:\d+(?:\.\d+)?|\.\d+))\s*(?:,\s*(-?(?:\d+(?:\.\d+)?|\.\d+))\s*,\s*(-?(?:\d+(?:\.\d+)?|\.\d+)))?\s*\)",
    )
    .expect("invalid linear-vpx pattern")
});

/// 生成线性插值表达式
///
/// 表达式在 `min_width` 处取 `min_value`，在 `max_width` 处取 `max_value`：
///
/// ```text
/// calc(<min>px + <max - min> * (100vw - <minWidth>px) / <maxWidth - minWidth>)
/// ```
///
/// `auto_clamp_linear` 开启时再包一层 `clamp(<min>px, ..., <max>px)`，避免超出区间外推。
/// 宽度缺省时取配置中的 `linear_min_width` / `linear_max_width`。
/// `min_width >= max_width` 时输出警告并返回 None（调用方保留原文）。
pub fn convert_interpolation(
    min_value: f64,
    max_value: f64,
    min_width: Option<f64>,
    max_width: Option<f64>,
    settings: &UnitSettings,
) -> Option<String> {
    let min_width = min_width.unwrap_or(settings.linear_min_width);
    let max_width = max_width.unwrap_or(settings.linear_max_width);

    if !(min_width < max_width) {
        tracing::warn!(
            min_width,
            max_width,
            "linear-vpx: min width must be less than max width, call left unchanged"
        );
        return None;
    }

    let p = settings.unit_precision;
    let min_px = format_rounded(min_value, p);
    let max_px = format_rounded(max_value, p);
    let slope = format_rounded(max_value - min_value, p);
    let start = format_rounded(min_width, p);
    let span = format_rounded(max_width - min_width, p);

    let calc = format!(
        "calc({}px + {} * (100vw - {}px) / {})",
        min_px, slope, start, span
    );

    if settings.auto_clamp_linear {
        Some(format!("clamp({}px, {}, {}px)", min_px, calc, max_px))
    } else {
        Some(calc)
    }
}

/// 替换文本中所有 linear-vpx() 调用
pub fn convert_linear<'t>(
    text: &'t str,
    settings: &UnitSettings,
    on_convert: &mut OnConvert<'_>,
) -> Cow<'t, str> {
    LINEAR_PATTERN.replace_all(text, |caps: &Captures| {
        let original = &caps[0];
        let number = |i: usize| caps.get(i).and_then(|m| parse_number(m.as_str()));

        let converted = match (number(1), number(2)) {
            (Some(min), Some(max)) => convert_interpolation(min, max, number(3), number(4), settings),
            _ => None,
        };

        match converted {
            Some(converted) => {
                on_convert(UnitKind::Linear, original, &converted);
                converted
            }
            None => original.to_string(),
        }
    })
}
