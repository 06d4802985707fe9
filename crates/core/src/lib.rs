pub mod blacklist;
pub mod config;
pub mod error;
pub mod merge;
pub mod number;
pub mod types;

// Re-export commonly used types
pub use blacklist::{Blacklist, BlacklistEntry, Matcher};
pub use config::{Config, MediaQueryOptions, MediaQueryOverride, Options, UnitSettings};
pub use error::ConfigError;
pub use types::{ConversionRecord, LogLevel, UnitKind, DEFAULT_CONDITION};
