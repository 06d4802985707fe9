use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// 未命中任何媒体查询覆盖时的条件标签
pub const DEFAULT_CONDITION: &str = "default";

/// 转换种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// `36vpx` → `9.6vw`
    #[serde(rename = "vpx")]
    Vpx,
    /// `36maxvpx` → `max(9.6vw, 36px)`
    #[serde(rename = "maxvpx")]
    MaxVpx,
    /// `36minvpx` → `min(9.6vw, 36px)`
    #[serde(rename = "minvpx")]
    MinVpx,
    /// `36cvpx` → `clamp(36px, 9.6vw, 36px)`
    #[serde(rename = "cvpx")]
    ClampVpx,
    /// `linear-vpx(a, b, c, d)` → `calc(...)`
    #[serde(rename = "linear-vpx")]
    Linear,
}

impl UnitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitKind::Vpx => "vpx",
            UnitKind::MaxVpx => "maxvpx",
            UnitKind::MinVpx => "minvpx",
            UnitKind::ClampVpx => "cvpx",
            UnitKind::Linear => "linear-vpx",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 转换日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// 不输出
    Silent,
    /// 按文件和媒体查询汇总数量
    #[default]
    Info,
    /// 逐条输出每次替换
    Verbose,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "silent" => Ok(LogLevel::Silent),
            "info" => Ok(LogLevel::Info),
            "verbose" => Ok(LogLevel::Verbose),
            other => Err(ConfigError::InvalidLogLevel(other.to_string())),
        }
    }
}

/// 一次替换的记录，仅用于诊断输出
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRecord {
    /// 来源文件标识
    pub file: String,
    /// 所属选择器（声明不在规则内时为空）
    pub selector: String,
    /// 属性名（如 "font-size"、"--gap"）
    pub property: String,
    pub kind: UnitKind,
    /// 原始片段（如 "36maxvpx"）
    pub original: String,
    /// 转换结果（如 "max(9.6vw, 36px)"）
    pub converted: String,
    /// 命中的媒体查询配置键，未命中为 "default"
    pub media_query: String,
    /// 实际使用的视口宽度
    pub viewport_width: f64,
}
