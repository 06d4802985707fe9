//! 媒体查询覆盖配置匹配

use vpx_core::{Config, UnitSettings, DEFAULT_CONDITION};

/// 匹配强度，精确匹配总是优先于包含匹配
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchScore {
    /// 配置的条件是实际条件的子串
    Fuzzy,
    /// 规范化后完全相同
    Exact,
}

/// 命中的覆盖配置
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchedQuery<'a> {
    /// 实际条件全文（如 "@media (min-width: 768px)"）
    pub condition: &'a str,
    /// 命中的配置键（声明时的原文）
    pub key: &'a str,
    pub score: MatchScore,
}

/// 某个声明实际使用的配置
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveConfig<'a> {
    pub settings: UnitSettings,
    pub matched: Option<MatchedQuery<'a>>,
}

impl EffectiveConfig<'_> {
    /// 转换记录中的条件标签，未命中时为 "default"
    pub fn label(&self) -> &str {
        self.matched.map_or(DEFAULT_CONDITION, |m| m.key)
    }
}

/// 规范化条件文本：去掉开头的 `@media`，连续空白合并为一个空格
pub fn normalize_condition(text: &str) -> String {
    let text = text.trim();
    let text = match text.get(..6) {
        Some(head) if head.eq_ignore_ascii_case("@media") => {
            let rest = &text[6..];
            match rest.chars().next() {
                None => rest,
                Some(c) if c.is_whitespace() || c == '(' => rest,
                Some(_) => text,
            }
        }
        _ => text,
    };
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 为最近一层 `@media` 条件选出覆盖配置
///
/// 1. 精确匹配得分高于包含匹配
/// 2. 同分时取先声明的覆盖
/// 3. 未命中或不在条件块内时使用基础配置
///
/// 包含匹配会误命中，例如 `min-width: 100` 同样匹配 `(min-width: 1008px)`。
pub fn resolve<'a>(condition: Option<&'a str>, config: &'a Config) -> EffectiveConfig<'a> {
    let base = EffectiveConfig {
        settings: config.settings,
        matched: None,
    };
    let Some(condition) = condition else {
        return base;
    };
    if config.media_queries.is_empty() {
        return base;
    }

    let actual = normalize_condition(condition);
    let mut best: Option<(MatchScore, &'a str, &vpx_core::MediaQueryOverride)> = None;

    for (key, mq) in &config.media_queries {
        let configured = normalize_condition(key);
        let score = if configured == actual {
            MatchScore::Exact
        } else if actual.contains(configured.as_str()) {
            MatchScore::Fuzzy
        } else {
            continue;
        };

        // 严格大于：同分保留先声明的
        if best.map_or(true, |(current, _, _)| score > current) {
            best = Some((score, key.as_str(), mq));
        }
    }

    match best {
        Some((score, key, mq)) => {
            tracing::trace!(condition, key, ?score, "media query override matched");
            EffectiveConfig {
                settings: config.settings.merged(mq),
                matched: Some(MatchedQuery {
                    condition,
                    key,
                    score,
                }),
            }
        }
        None => base,
    }
}
