use indexmap::IndexMap;
use vpx_core::{ConversionRecord, LogLevel};

/// 转换记录器 —— 每个转换器独占一个，按调用顺序保存每次替换。
///
/// 只是诊断旁路：记录与否不影响转换结果。
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    records: Vec<ConversionRecord>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: ConversionRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[ConversionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// 按日志级别生成输出行
    ///
    /// - silent：无输出
    /// - info：每个 (文件, 媒体查询) 一行汇总数量，按首次出现的顺序
    /// - verbose：每次替换一行，含原文与结果
    pub fn report(&self, level: LogLevel) -> Vec<String> {
        match level {
            LogLevel::Silent => Vec::new(),
            LogLevel::Info => {
                let mut groups: IndexMap<(&str, &str), usize> = IndexMap::new();
                for record in &self.records {
                    *groups
                        .entry((record.file.as_str(), record.media_query.as_str()))
                        .or_default() += 1;
                }
                groups
                    .into_iter()
                    .map(|((file, condition), count)| {
                        format!("{} [{}]: converted {} vpx units", file, condition, count)
                    })
                    .collect()
            }
            LogLevel::Verbose => self
                .records
                .iter()
                .map(|r| {
                    format!(
                        "{} [{}, viewport {}] {}: {} -> {}",
                        r.file,
                        r.media_query,
                        r.viewport_width,
                        owner(r),
                        r.original,
                        r.converted
                    )
                })
                .collect(),
        }
    }

    /// 通过 tracing 输出报告
    pub fn flush(&self, level: LogLevel) {
        for line in self.report(level) {
            tracing::info!(target: "vpx", "{}", line);
        }
    }
}

fn owner(record: &ConversionRecord) -> String {
    if record.selector.is_empty() {
        record.property.clone()
    } else {
        format!("{} {{ {} }}", record.selector, record.property)
    }
}
