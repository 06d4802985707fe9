pub mod document;
pub mod recorder;

use vpx_convert::{contains_marker, convert_value, is_exempt, resolve, Node};

// Re-exports
pub use document::transform_document;
pub use recorder::Recorder;
pub use vpx_core::{Config, ConfigError, ConversionRecord, LogLevel, Options, UnitKind};

/// 声明所在的上下文
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeclarationContext<'a> {
    /// 所属规则的选择器全文，直接位于条件块或顶层时为空
    pub selector: &'a str,
    /// 最近一层 `@media` 的条件全文（如 "@media (min-width: 768px)"）
    pub condition: Option<&'a str>,
}

impl<'a> DeclarationContext<'a> {
    pub fn new(selector: &'a str) -> Self {
        Self {
            selector,
            condition: None,
        }
    }

    pub fn with_condition(mut self, condition: &'a str) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// vpx 转换器
///
/// 持有校验后的配置与本实例独占的转换记录器。
/// 两个入口（整段文本 / 单条声明）对同一输入产出逐字节一致的结果。
#[derive(Debug)]
pub struct Transformer {
    config: Config,
    recorder: Recorder,
}

/// 根据用户配置创建转换器
///
/// 配置在此处一次性校验，之后只读。
///
/// # 示例
///
/// ```
/// use vpx_transform::{create_transformer, Options};
///
/// let mut transformer = create_transformer(Options::default()).unwrap();
/// let css = transformer.transform(".test { font-size: 36vpx; }", "app.css");
/// assert_eq!(css, ".test { font-size: 9.6vw; }");
/// ```
pub fn create_transformer(options: Options) -> Result<Transformer, ConfigError> {
    let config = Config::resolve(options)?;
    Ok(Transformer::new(config))
}

impl Transformer {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            recorder: Recorder::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 转换整段 CSS 类文本，或单个声明值（如 `0 20maxvpx`）
    ///
    /// 不含 vpx 标记的文本原样返回。
    pub fn transform(&mut self, source: &str, file_id: &str) -> String {
        if !contains_marker(source) {
            return source.to_string();
        }
        transform_document(source, file_id, &self.config, &mut self.recorder)
    }

    /// 转换单条声明的值（结构化宿主入口）
    pub fn transform_declaration(
        &mut self,
        property: &str,
        value: &str,
        context: DeclarationContext<'_>,
        file_id: &str,
    ) -> String {
        process_declaration(
            &self.config,
            &mut self.recorder,
            property,
            value,
            context,
            file_id,
        )
    }

    /// 本实例累计的转换记录（仅在 log_conversions 开启时记录）
    pub fn conversions(&self) -> &[ConversionRecord] {
        self.recorder.records()
    }

    pub fn clear_conversions(&mut self) {
        self.recorder.clear();
    }

    /// 按配置的日志级别输出转换记录
    pub fn flush(&self) {
        if self.config.log_conversions {
            self.recorder.flush(self.config.log_level);
        }
    }
}

/// 单条声明的处理流程：媒体查询匹配 → 黑名单 → 转换 → 记录
pub(crate) fn process_declaration(
    config: &Config,
    recorder: &mut Recorder,
    property: &str,
    value: &str,
    context: DeclarationContext<'_>,
    file_id: &str,
) -> String {
    if !contains_marker(value) {
        return value.to_string();
    }

    let effective = resolve(context.condition, config);

    let node = Node::classify(property, context.selector);
    if is_exempt(node, config) {
        tracing::trace!(property, selector = context.selector, "declaration exempted by blacklist");
        return value.to_string();
    }

    let label = effective.label();
    let settings = effective.settings;
    let property = property.trim();
    let selector = context.selector.trim();

    convert_value(value, &settings, &mut |kind, original, converted| {
        if config.log_conversions {
            recorder.record(ConversionRecord {
                file: file_id.to_string(),
                selector: selector.to_string(),
                property: property.to_string(),
                kind,
                original: original.to_string(),
                converted: converted.to_string(),
                media_query: label.to_string(),
                viewport_width: settings.viewport_width,
            });
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vpx_core::{BlacklistEntry, MediaQueryOptions};

    fn transformer(options: Options) -> Transformer {
        create_transformer(options).unwrap()
    }

    #[test]
    fn test_transform_basic() {
        let mut t = transformer(Options::default());
        assert_eq!(
            t.transform(".test { font-size: 36vpx; }", "app.css"),
            ".test { font-size: 9.6vw; }"
        );
    }

    #[test]
    fn test_transform_declaration_basic() {
        let mut t = transformer(Options::default());
        let out = t.transform_declaration("width", "200maxvpx", DeclarationContext::new(".test"), "app.css");
        assert_eq!(out, "max(53.33333vw, 200px)");
    }

    #[test]
    fn test_transform_declaration_in_media() {
        let mut media_queries = indexmap::IndexMap::new();
        media_queries.insert(
            "@media (min-width: 768px)".to_string(),
            MediaQueryOptions {
                viewport_width: Some(768.0),
                ..Default::default()
            },
        );
        let mut t = transformer(Options {
            media_queries,
            ..Default::default()
        });
        let context = DeclarationContext::new(".container").with_condition("@media (min-width: 768px)");
        assert_eq!(t.transform_declaration("width", "300vpx", context, "a.css"), "39.0625vw");
        assert_eq!(
            t.transform_declaration("width", "300vpx", DeclarationContext::new(".container"), "a.css"),
            "80vw"
        );
    }

    #[test]
    fn test_blacklisted_declaration_untouched() {
        let mut t = transformer(Options {
            selector_black_list: vec![BlacklistEntry::literal(".ignore")],
            variable_black_list: vec![BlacklistEntry::literal("--ignore")],
            ..Default::default()
        });
        assert_eq!(
            t.transform_declaration("width", "36vpx", DeclarationContext::new(".ignore"), "a.css"),
            "36vpx"
        );
        assert_eq!(
            t.transform_declaration("--ignore", "36vpx", DeclarationContext::new(":root"), "a.css"),
            "36vpx"
        );
        assert_eq!(
            t.transform_declaration("--test", "36vpx", DeclarationContext::new(":root"), "a.css"),
            "9.6vw"
        );
    }

    #[test]
    fn test_no_marker_returns_input() {
        let mut t = transformer(Options::default());
        let source = ".test { color: red; }";
        assert_eq!(t.transform(source, "a.css"), source);

        let once = t.transform(".a { width: 36vpx; }", "a.css");
        assert_eq!(t.transform(&once, "a.css"), once);
    }

    #[test]
    fn test_transform_accepts_bare_value() {
        let mut t = transformer(Options::default());
        assert_eq!(t.transform("0 20maxvpx", "a.css"), "0 max(5.33333vw, 20px)");
        assert_eq!(t.transform("36vpx", "a.css"), "9.6vw");
        // 同一文本作为声明值和作为整段文本结果一致
        assert_eq!(
            t.transform_declaration("margin", "0 20maxvpx", DeclarationContext::default(), "a.css"),
            "0 max(5.33333vw, 20px)"
        );
        assert_eq!(t.transform("font-size: 36vpx", "a.css"), "font-size: 9.6vw");
    }

    #[test]
    fn test_conversions_recorded_only_when_enabled() {
        let mut quiet = transformer(Options::default());
        quiet.transform(".test { width: 36vpx; }", "a.css");
        assert!(quiet.conversions().is_empty());

        let mut t = transformer(Options {
            log_conversions: true,
            ..Default::default()
        });
        t.transform(".test { width: 36vpx; margin: 0 -20maxvpx; }", "a.css");
        let records = t.conversions();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].selector, ".test");
        assert_eq!(records[0].property, "width");
        assert_eq!(records[0].kind, UnitKind::Vpx);
        assert_eq!(records[0].original, "36vpx");
        assert_eq!(records[0].converted, "9.6vw");
        assert_eq!(records[0].media_query, "default");
        assert_eq!(records[0].viewport_width, 375.0);
        assert_eq!(records[1].kind, UnitKind::MaxVpx);
        assert_eq!(records[1].converted, "min(-5.33333vw, -20px)");

        t.clear_conversions();
        assert!(t.conversions().is_empty());
    }

    #[test]
    fn test_recording_does_not_change_output() {
        let source = "@media (min-width: 768px) { .a { width: linear-vpx(840, 1000); height: 10cvpx; } }";
        let mut plain = transformer(Options::default());
        let mut logged = transformer(Options {
            log_conversions: true,
            log_level: Some("verbose".to_string()),
            ..Default::default()
        });
        assert_eq!(plain.transform(source, "a.css"), logged.transform(source, "a.css"));
        assert_eq!(logged.conversions().len(), 2);
        logged.flush();
    }

    #[test]
    fn test_create_transformer_rejects_invalid_options() {
        let err = create_transformer(Options {
            viewport_width: Some(-1.0),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidViewportWidth(-1.0));
    }

    #[test]
    fn test_instances_do_not_share_records() {
        let options = Options {
            log_conversions: true,
            ..Default::default()
        };
        let mut a = transformer(options.clone());
        let b = transformer(options);
        a.transform(".a { width: 36vpx; }", "a.css");
        assert_eq!(a.conversions().len(), 1);
        assert!(b.conversions().is_empty());
    }
}
