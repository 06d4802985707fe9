pub mod blacklist;
pub mod linear;
pub mod media;
pub mod unit;

// Re-export main types
pub use blacklist::{is_exempt, Node};
pub use linear::{convert_interpolation, convert_linear};
pub use media::{normalize_condition, resolve, EffectiveConfig, MatchScore, MatchedQuery};
pub use unit::{convert_token, convert_units, unit_kind};

use vpx_core::{UnitKind, UnitSettings};

/// 替换回调：(种类, 原文, 结果)
pub type OnConvert<'f> = dyn FnMut(UnitKind, &str, &str) + 'f;

/// 值中是否含有 vpx 标记（不区分大小写）
pub fn contains_marker(value: &str) -> bool {
    value
        .as_bytes()
        .windows(3)
        .any(|w| w.eq_ignore_ascii_case(b"vpx"))
}

/// 转换一个声明值：先处理 linear-vpx()，再处理其余 vpx 单位
///
/// 不含标记的值原样返回。每次替换都会回调 `on_convert`。
pub fn convert_value(value: &str, settings: &UnitSettings, on_convert: &mut OnConvert<'_>) -> String {
    if !contains_marker(value) {
        return value.to_string();
    }

    let linear = convert_linear(value, settings, on_convert);
    let units = convert_units(&linear, settings, on_convert);
    units.into_owned()
}
