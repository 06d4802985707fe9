use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 黑名单条目（用户输入形式）
///
/// JSON 中可写成字符串（包含匹配）或对象（正则匹配）：
///
/// ```json
/// { "selectorBlackList": [".ignore", { "pattern": "^\\.legacy-", "flags": "i" }] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlacklistEntry {
    Literal(String),
    Pattern {
        pattern: String,
        #[serde(default)]
        flags: Option<String>,
    },
}

impl BlacklistEntry {
    pub fn literal(text: impl Into<String>) -> Self {
        BlacklistEntry::Literal(text.into())
    }

    pub fn pattern(pattern: impl Into<String>) -> Self {
        BlacklistEntry::Pattern {
            pattern: pattern.into(),
            flags: None,
        }
    }
}

/// 编译后的匹配器
#[derive(Debug, Clone)]
pub enum Matcher {
    /// 子串包含
    Literal(String),
    /// 正则测试
    Pattern(Regex),
}

impl Matcher {
    pub fn compile(entry: &BlacklistEntry) -> Result<Self, ConfigError> {
        match entry {
            BlacklistEntry::Literal(text) => Ok(Matcher::Literal(text.clone())),
            BlacklistEntry::Pattern { pattern, flags } => {
                let mut builder = RegexBuilder::new(pattern);
                // 仅识别影响匹配结果的标志，g / y / u 之类忽略
                for flag in flags.as_deref().unwrap_or("").chars() {
                    match flag {
                        'i' => builder.case_insensitive(true),
                        'm' => builder.multi_line(true),
                        's' => builder.dot_matches_new_line(true),
                        _ => &mut builder,
                    };
                }
                builder
                    .build()
                    .map(Matcher::Pattern)
                    .map_err(|e| ConfigError::InvalidPattern {
                        pattern: pattern.clone(),
                        reason: e.to_string(),
                    })
            }
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Matcher::Literal(literal) => text.contains(literal.as_str()),
            Matcher::Pattern(regex) => regex.is_match(text),
        }
    }
}

/// 有序的匹配器集合，任一命中即视为命中
#[derive(Debug, Clone, Default)]
pub struct Blacklist {
    matchers: Vec<Matcher>,
}

impl Blacklist {
    pub fn compile(entries: &[BlacklistEntry]) -> Result<Self, ConfigError> {
        let matchers = entries
            .iter()
            .map(Matcher::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { matchers })
    }

    /// 空文本永不命中
    pub fn matches(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        self.matchers.iter().any(|m| m.is_match(text))
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }
}
