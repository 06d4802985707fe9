use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::blacklist::{Blacklist, BlacklistEntry};
use crate::error::ConfigError;
use crate::types::LogLevel;

/// 用户配置（所有字段可选，字段名与 JS 侧一致）
///
/// 经 [`Config::resolve`] 校验并补齐默认值后才可使用。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// 设计稿视口宽度，默认 375
    pub viewport_width: Option<f64>,
    /// 输出小数位数，默认 5；必须为非负整数
    pub unit_precision: Option<f64>,
    /// 绝对值不超过该值时直接输出 px，默认 1
    pub min_pixel_value: Option<f64>,
    /// maxvpx 的像素倍数，默认 1
    pub max_ratio: Option<f64>,
    /// minvpx 的像素倍数，默认 1
    pub min_ratio: Option<f64>,
    /// cvpx 下限倍数，未设置时取 min_ratio
    pub clamp_min_ratio: Option<f64>,
    /// cvpx 上限倍数，未设置时取 max_ratio
    pub clamp_max_ratio: Option<f64>,
    /// linear-vpx 默认起始视口宽度，默认 1200
    pub linear_min_width: Option<f64>,
    /// linear-vpx 默认结束视口宽度，默认 1920
    pub linear_max_width: Option<f64>,
    /// linear-vpx 是否包一层 clamp()，默认 true
    pub auto_clamp_linear: Option<bool>,
    pub selector_black_list: Vec<BlacklistEntry>,
    pub variable_black_list: Vec<BlacklistEntry>,
    /// 是否记录转换明细
    pub log_conversions: bool,
    /// 'silent' | 'info' | 'verbose'，默认 'info'
    pub log_level: Option<String>,
    /// 媒体查询条件 -> 覆盖配置（保持声明顺序）
    pub media_queries: IndexMap<String, MediaQueryOptions>,
}

impl Options {
    /// 从 JSON 加载（字段与 JS 侧配置对象一致）
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))
    }
}

/// 媒体查询覆盖配置（用户输入形式），只允许覆盖数值类字段
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaQueryOptions {
    pub viewport_width: Option<f64>,
    pub unit_precision: Option<f64>,
    pub min_pixel_value: Option<f64>,
    pub max_ratio: Option<f64>,
    pub min_ratio: Option<f64>,
    pub clamp_min_ratio: Option<f64>,
    pub clamp_max_ratio: Option<f64>,
    pub linear_min_width: Option<f64>,
    pub linear_max_width: Option<f64>,
    pub auto_clamp_linear: Option<bool>,
}

/// 校验后的媒体查询覆盖配置
///
/// clamp 倍数总是已解析：未设置时先取本覆盖的 min/max_ratio，再取基础配置的。
#[derive(Debug, Clone, PartialEq)]
pub struct MediaQueryOverride {
    pub viewport_width: Option<f64>,
    pub unit_precision: Option<u32>,
    pub min_pixel_value: Option<f64>,
    pub max_ratio: Option<f64>,
    pub min_ratio: Option<f64>,
    pub clamp_min_ratio: f64,
    pub clamp_max_ratio: f64,
    pub linear_min_width: Option<f64>,
    pub linear_max_width: Option<f64>,
    pub auto_clamp_linear: Option<bool>,
}

/// 参与数值计算的完整配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitSettings {
    pub viewport_width: f64,
    pub unit_precision: u32,
    pub min_pixel_value: f64,
    pub max_ratio: f64,
    pub min_ratio: f64,
    pub clamp_min_ratio: f64,
    pub clamp_max_ratio: f64,
    pub linear_min_width: f64,
    pub linear_max_width: f64,
    pub auto_clamp_linear: bool,
}

impl Default for UnitSettings {
    fn default() -> Self {
        Self {
            viewport_width: 375.0,
            unit_precision: 5,
            min_pixel_value: 1.0,
            max_ratio: 1.0,
            min_ratio: 1.0,
            clamp_min_ratio: 1.0,
            clamp_max_ratio: 1.0,
            linear_min_width: 1200.0,
            linear_max_width: 1920.0,
            auto_clamp_linear: true,
        }
    }
}

impl UnitSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.viewport_width > 0.0) || !self.viewport_width.is_finite() {
            return Err(ConfigError::InvalidViewportWidth(self.viewport_width));
        }
        if !(self.min_pixel_value >= 0.0) {
            return Err(ConfigError::NegativeMinPixelValue(self.min_pixel_value));
        }
        if !(self.linear_min_width < self.linear_max_width) {
            return Err(ConfigError::InvalidLinearRange {
                min: self.linear_min_width,
                max: self.linear_max_width,
            });
        }
        Ok(())
    }
}

/// 校验后的不可变配置，每次宿主调用构建一次
#[derive(Debug, Clone)]
pub struct Config {
    pub settings: UnitSettings,
    pub selector_black_list: Blacklist,
    pub variable_black_list: Blacklist,
    pub log_conversions: bool,
    pub log_level: LogLevel,
    pub media_queries: IndexMap<String, MediaQueryOverride>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings: UnitSettings::default(),
            selector_black_list: Blacklist::default(),
            variable_black_list: Blacklist::default(),
            log_conversions: false,
            log_level: LogLevel::default(),
            media_queries: IndexMap::new(),
        }
    }
}

impl Config {
    /// 补齐默认值并校验
    ///
    /// 任何越界或格式错误都直接返回 [`ConfigError`]，不做自动修正。
    pub fn resolve(options: Options) -> Result<Self, ConfigError> {
        let defaults = UnitSettings::default();
        let min_ratio = options.min_ratio.unwrap_or(defaults.min_ratio);
        let max_ratio = options.max_ratio.unwrap_or(defaults.max_ratio);

        let settings = UnitSettings {
            viewport_width: options.viewport_width.unwrap_or(defaults.viewport_width),
            unit_precision: match options.unit_precision {
                Some(p) => precision(p)?,
                None => defaults.unit_precision,
            },
            min_pixel_value: options.min_pixel_value.unwrap_or(defaults.min_pixel_value),
            max_ratio,
            min_ratio,
            clamp_min_ratio: options.clamp_min_ratio.unwrap_or(min_ratio),
            clamp_max_ratio: options.clamp_max_ratio.unwrap_or(max_ratio),
            linear_min_width: options.linear_min_width.unwrap_or(defaults.linear_min_width),
            linear_max_width: options.linear_max_width.unwrap_or(defaults.linear_max_width),
            auto_clamp_linear: options.auto_clamp_linear.unwrap_or(defaults.auto_clamp_linear),
        };
        settings.validate()?;

        let log_level = match options.log_level.as_deref() {
            Some(level) => level.parse()?,
            None => LogLevel::default(),
        };

        let mut media_queries = IndexMap::with_capacity(options.media_queries.len());
        for (query, mq) in options.media_queries {
            let resolved = resolve_override(&mq, &settings)
                .and_then(|o| settings.merged(&o).validate().map(|_| o))
                .map_err(|e| ConfigError::InvalidMediaQuery {
                    query: query.clone(),
                    source: Box::new(e),
                })?;
            media_queries.insert(query, resolved);
        }

        Ok(Self {
            settings,
            selector_black_list: Blacklist::compile(&options.selector_black_list)?,
            variable_black_list: Blacklist::compile(&options.variable_black_list)?,
            log_conversions: options.log_conversions,
            log_level,
            media_queries,
        })
    }
}

impl TryFrom<Options> for Config {
    type Error = ConfigError;

    fn try_from(options: Options) -> Result<Self, Self::Error> {
        Config::resolve(options)
    }
}

fn resolve_override(
    mq: &MediaQueryOptions,
    base: &UnitSettings,
) -> Result<MediaQueryOverride, ConfigError> {
    Ok(MediaQueryOverride {
        viewport_width: mq.viewport_width,
        unit_precision: mq.unit_precision.map(precision).transpose()?,
        min_pixel_value: mq.min_pixel_value,
        max_ratio: mq.max_ratio,
        min_ratio: mq.min_ratio,
        clamp_min_ratio: mq
            .clamp_min_ratio
            .or(mq.min_ratio)
            .unwrap_or(base.min_ratio),
        clamp_max_ratio: mq
            .clamp_max_ratio
            .or(mq.max_ratio)
            .unwrap_or(base.max_ratio),
        linear_min_width: mq.linear_min_width,
        linear_max_width: mq.linear_max_width,
        auto_clamp_linear: mq.auto_clamp_linear,
    })
}

/// 小数位数必须是 0..=100 的整数
fn precision(value: f64) -> Result<u32, ConfigError> {
    if value.is_finite() && value.fract() == 0.0 && (0.0..=100.0).contains(&value) {
        Ok(value as u32)
    } else {
        Err(ConfigError::InvalidUnitPrecision(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::resolve(Options::default()).unwrap();
        assert_eq!(config.settings, UnitSettings::default());
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(!config.log_conversions);
        assert!(config.selector_black_list.is_empty());
        assert!(config.media_queries.is_empty());
    }

    #[test]
    fn test_clamp_ratios_follow_min_max() {
        let config = Config::resolve(Options {
            min_ratio: Some(0.5),
            max_ratio: Some(2.0),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(config.settings.clamp_min_ratio, 0.5);
        assert_eq!(config.settings.clamp_max_ratio, 2.0);
    }

    #[test]
    fn test_explicit_clamp_ratio_wins() {
        let config = Config::resolve(Options {
            min_ratio: Some(0.5),
            clamp_min_ratio: Some(0.3),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(config.settings.clamp_min_ratio, 0.3);
        assert_eq!(config.settings.clamp_max_ratio, 1.0);
    }

    #[test]
    fn test_rejects_zero_viewport() {
        let err = Config::resolve(Options {
            viewport_width: Some(0.0),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidViewportWidth(0.0));
    }

    #[test]
    fn test_rejects_fractional_precision() {
        let err = Config::resolve(Options {
            unit_precision: Some(2.5),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidUnitPrecision(2.5));
    }

    #[test]
    fn test_rejects_negative_precision() {
        let err = Config::resolve(Options {
            unit_precision: Some(-1.0),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidUnitPrecision(-1.0));
    }

    #[test]
    fn test_rejects_negative_min_pixel_value() {
        let err = Config::resolve(Options {
            min_pixel_value: Some(-1.0),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::NegativeMinPixelValue(-1.0));
    }

    #[test]
    fn test_rejects_inverted_linear_range() {
        let err = Config::resolve(Options {
            linear_min_width: Some(1920.0),
            linear_max_width: Some(1920.0),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidLinearRange {
                min: 1920.0,
                max: 1920.0
            }
        );
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let err = Config::resolve(Options {
            log_level: Some("debug".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidLogLevel("debug".to_string()));
    }

    #[test]
    fn test_override_clamp_falls_back_to_own_ratio() {
        let mut media_queries = IndexMap::new();
        media_queries.insert(
            "(min-width: 768px)".to_string(),
            MediaQueryOptions {
                min_ratio: Some(0.8),
                ..Default::default()
            },
        );
        let config = Config::resolve(Options {
            min_ratio: Some(0.5),
            max_ratio: Some(2.0),
            clamp_max_ratio: Some(4.0),
            media_queries,
            ..Default::default()
        })
        .unwrap();

        let mq = &config.media_queries["(min-width: 768px)"];
        assert_eq!(mq.clamp_min_ratio, 0.8);
        // 覆盖未设置 max_ratio 时取基础配置的 max_ratio，而非基础配置的 clamp_max_ratio
        assert_eq!(mq.clamp_max_ratio, 2.0);
    }

    #[test]
    fn test_override_is_validated_after_merge() {
        let mut media_queries = IndexMap::new();
        media_queries.insert(
            "(min-width: 768px)".to_string(),
            MediaQueryOptions {
                linear_min_width: Some(2000.0),
                ..Default::default()
            },
        );
        let err = Config::resolve(Options {
            media_queries,
            ..Default::default()
        })
        .unwrap_err();

        match err {
            ConfigError::InvalidMediaQuery { query, source } => {
                assert_eq!(query, "(min-width: 768px)");
                assert!(matches!(*source, ConfigError::InvalidLinearRange { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_json() {
        let options = Options::from_json(
            r#"{
                "viewportWidth": 750,
                "unitPrecision": 3,
                "selectorBlackList": [".ignore"],
                "logLevel": "verbose",
                "mediaQueries": {
                    "@media (min-width: 768px)": { "viewportWidth": 768 },
                    "min-width: 1024px": { "viewportWidth": 1024 }
                }
            }"#,
        )
        .unwrap();
        let config = Config::resolve(options).unwrap();

        assert_eq!(config.settings.viewport_width, 750.0);
        assert_eq!(config.settings.unit_precision, 3);
        assert_eq!(config.log_level, LogLevel::Verbose);
        assert!(config.selector_black_list.matches(".ignore"));
        let keys: Vec<&str> = config.media_queries.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["@media (min-width: 768px)", "min-width: 1024px"]);
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let err = Options::from_json("{ viewportWidth: }").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
