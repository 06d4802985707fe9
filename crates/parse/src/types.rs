use std::fmt;

/// 扫描结果：按原文顺序排列的条目
///
/// 所有条目都保留原文切片，`to_string()` 与输入逐字节一致。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Stylesheet {
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// 空白、注释、无法识别的语句（原样输出）
    Raw(String),
    /// `name: value;`
    Declaration(Declaration),
    /// `prelude { ... }`，包括规则和 at-rule 块
    Block(Block),
}

/// 单条声明
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// 冒号之前的原文（可能带尾随空白）
    pub name: String,
    /// 冒号之后、分号之前的原文（保留首尾空白）
    pub value: String,
    /// 原文是否以分号结束
    pub semicolon: bool,
}

impl Declaration {
    /// 属性名（去除空白）
    pub fn property(&self) -> &str {
        self.name.trim()
    }

    /// 是否为 CSS 自定义属性（`--name`）
    pub fn is_custom_property(&self) -> bool {
        self.property().starts_with("--")
    }
}

/// 花括号块
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// `{` 之前的原文（选择器或 at-rule 条件，可能带尾随空白）
    pub prelude: String,
    pub items: Vec<Item>,
    /// 输入在块结束前截断时为 false，输出时不补 `}`
    pub closed: bool,
}

impl Block {
    /// 去除空白后的前导文本
    pub fn selector(&self) -> &str {
        self.prelude.trim()
    }

    /// at-rule 名称（不含 `@`），普通规则返回 None
    pub fn at_keyword(&self) -> Option<&str> {
        at_keyword(self.selector())
    }

    /// 是否为 `@media` 条件块
    pub fn is_media(&self) -> bool {
        self.at_keyword()
            .is_some_and(|kw| kw.eq_ignore_ascii_case("media"))
    }
}

fn at_keyword(prelude: &str) -> Option<&str> {
    let rest = prelude.strip_prefix('@')?;
    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

/// 声明所处的上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope<'a> {
    /// 所属规则的选择器全文；直接位于顶层或 `@media` 内时为空
    pub selector: &'a str,
    /// 最近一层 `@media` 块的条件全文（如 "@media (min-width: 768px)"）
    pub condition: Option<&'a str>,
}

impl Stylesheet {
    /// 按原文顺序访问每条声明
    ///
    /// 条件只取最近一层 `@media`，不会继续向外查找；
    /// 其余 at-rule 块（@supports、@font-face 等）不改变条件，
    /// 其直接声明以 at-rule 前导文本作为所属选择器。
    pub fn for_each_declaration_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(Scope<'_>, &mut Declaration),
    {
        walk(&mut self.items, "", None, &mut f);
    }

    /// 是否不含任何块或声明（只有原文片段，如单独的值 `0 20vpx`）
    pub fn is_bare(&self) -> bool {
        self.items.iter().all(|item| matches!(item, Item::Raw(_)))
    }

    /// 所有块（深度优先）
    pub fn blocks(&self) -> Vec<&Block> {
        let mut out = Vec::new();
        collect_blocks(&self.items, &mut out);
        out
    }
}

fn walk<F>(items: &mut [Item], selector: &str, condition: Option<&str>, f: &mut F)
where
    F: FnMut(Scope<'_>, &mut Declaration),
{
    for item in items.iter_mut() {
        match item {
            Item::Raw(_) => {}
            Item::Declaration(decl) => f(Scope { selector, condition }, decl),
            Item::Block(block) => {
                let is_media = block.is_media();
                let Block { prelude, items, .. } = block;
                let prelude = prelude.trim();
                if is_media {
                    walk(items, selector, Some(prelude), f);
                } else {
                    walk(items, prelude, condition, f);
                }
            }
        }
    }
}

fn collect_blocks<'a>(items: &'a [Item], out: &mut Vec<&'a Block>) {
    for item in items {
        if let Item::Block(block) = item {
            out.push(block);
            collect_blocks(&block.items, out);
        }
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Raw(text) => f.write_str(text),
            Item::Declaration(decl) => write!(f, "{}", decl),
            Item::Block(block) => write!(f, "{}", block),
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.value)?;
        if self.semicolon {
            f.write_str(";")?;
        }
        Ok(())
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{", self.prelude)?;
        for item in &self.items {
            write!(f, "{}", item)?;
        }
        if self.closed {
            f.write_str("}")?;
        }
        Ok(())
    }
}
