use thiserror::Error;

/// 配置错误 —— 在构建转换器时同步抛出，不做任何静默修正
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("viewportWidth must be greater than 0, got {0}")]
    InvalidViewportWidth(f64),

    #[error("unitPrecision must be a non-negative integer not greater than 100, got {0}")]
    InvalidUnitPrecision(f64),

    #[error("minPixelValue must not be negative, got {0}")]
    NegativeMinPixelValue(f64),

    #[error("linearMinWidth ({min}) must be less than linearMaxWidth ({max})")]
    InvalidLinearRange { min: f64, max: f64 },

    #[error("invalid logLevel '{0}', expected 'silent', 'info' or 'verbose'")]
    InvalidLogLevel(String),

    #[error("invalid blacklist pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("media query '{query}': {source}")]
    InvalidMediaQuery {
        query: String,
        source: Box<ConfigError>,
    },

    #[error("invalid options JSON: {0}")]
    Json(String),
}
