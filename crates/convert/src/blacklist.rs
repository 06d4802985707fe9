use vpx_core::Config;

/// 参与黑名单判断的节点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node<'a> {
    /// `--name` 自定义属性，只查 variable_black_list
    CustomProperty(&'a str),
    /// 普通声明，按所属选择器全文查 selector_black_list
    Declaration { selector: &'a str },
}

impl<'a> Node<'a> {
    pub fn classify(property: &'a str, selector: &'a str) -> Self {
        let property = property.trim();
        if property.starts_with("--") {
            Node::CustomProperty(property)
        } else {
            Node::Declaration {
                selector: selector.trim(),
            }
        }
    }
}

/// 节点是否被黑名单豁免（不转换）
///
/// 两个名单互不交叉：自定义属性名从不与选择器名单比较，反之亦然。
pub fn is_exempt(node: Node<'_>, config: &Config) -> bool {
    match node {
        Node::CustomProperty(name) => config.variable_black_list.matches(name),
        Node::Declaration { selector } => config.selector_black_list.matches(selector),
    }
}
