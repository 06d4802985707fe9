//! 数值舍入与格式化
//!
//! 输出必须逐字节稳定：同一个数在任何遍历方式下都打印成同样的文本。

/// 解析数字文本，非有限值（溢出、NaN）返回 None
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 定点舍入到 `precision` 位小数
///
/// 在 f64 的精确十进制展开上做"四舍五入、远离零"，
/// 因此 `2.5 → 3`、`-2.5 → -3`，而 `1.005`（实际略小于 1.005）→ `1`（precision = 2）。
pub fn round_to(value: f64, precision: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let precision = precision as usize;
    // 多取 40 位，足以判断舍入位之后的真实取值
    let exact = format!("{:.*}", precision + 40, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(precision))
        .collect();
    if frac_part.as_bytes().get(precision).is_some_and(|d| *d >= b'5') {
        increment(&mut digits);
    }

    let split = digits.len() - precision;
    let mut text = String::with_capacity(digits.len() + 2);
    if value.is_sign_negative() {
        text.push('-');
    }
    text.extend(digits[..split].iter().map(|&d| d as char));
    if precision > 0 {
        text.push('.');
        text.extend(digits[split..].iter().map(|&d| d as char));
    }

    text.parse().unwrap_or(value)
}

/// 十进制数字串加一（逐位进位）
fn increment(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

/// 以最短形式打印数值：无多余的尾随零，`-0` 打印为 `0`
///
/// `|value| >= 1e21` 或 `< 1e-6` 时改用指数形式，与 JS 的数字打印一致
/// （`1e+21`、`2.5e-7`）。
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude < 1e21 && magnitude >= 1e-6 {
        return format!("{}", value);
    }

    let text = format!("{:e}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => text,
    }
}

/// `round_to` + `format_number`
pub fn format_rounded(value: f64, precision: u32) -> String {
    format_number(round_to(value, precision))
}
