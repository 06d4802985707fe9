use vpx_core::Config;
use vpx_parse::scan;

use crate::recorder::Recorder;
use crate::{process_declaration, DeclarationContext};

/// 文本文档转换器 —— 扫描整段 CSS 类文本，逐条转换声明值。
///
/// 扫描结果是一棵保留原文的树：只有声明值被替换，
/// 处理后的嵌套块直接写回树中，不会被再次扫描。
/// 选择器、注释、空白和无法识别的片段逐字节保留。
///
/// 没有任何块或声明的文本（如 `0 20maxvpx`）按单个声明值处理，
/// 选择器为空，不带媒体条件。
pub fn transform_document(
    source: &str,
    file_id: &str,
    config: &Config,
    recorder: &mut Recorder,
) -> String {
    let mut sheet = scan(source);
    if sheet.is_bare() {
        return process_declaration(
            config,
            recorder,
            "",
            source,
            DeclarationContext::default(),
            file_id,
        );
    }

    let mut changed = 0usize;

    sheet.for_each_declaration_mut(|scope, decl| {
        let context = DeclarationContext {
            selector: scope.selector,
            condition: scope.condition,
        };
        let value = process_declaration(
            config,
            recorder,
            decl.property(),
            &decl.value,
            context,
            file_id,
        );
        if value != decl.value {
            decl.value = value;
            changed += 1;
        }
    });

    tracing::debug!(file = file_id, declarations = changed, "document transformed");
    sheet.to_string()
}
