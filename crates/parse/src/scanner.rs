use crate::types::{Block, Declaration, Item, Stylesheet};

/// 扫描 CSS 类文本，切分为规则块、声明和嵌套的条件块
///
/// 递归下降实现，花括号层级由递归结构保证配对：
/// - 引号字符串和注释中的 `{` `}` `;` 不参与切分
/// - 圆括号/方括号内的 `;` 不结束语句（如 `url(data:...;base64,...)`）
/// - 未闭合的块保留原文，不补全
///
/// 不做任何 CSS 语法校验，输出 `to_string()` 与输入逐字节一致。
///
/// # 示例
///
/// ```
/// use vpx_parse::{scan, Item};
///
/// let sheet = scan("@media (min-width: 768px) { .a { width: 10vpx; } }");
/// assert_eq!(sheet.to_string(), "@media (min-width: 768px) { .a { width: 10vpx; } }");
/// assert!(matches!(sheet.items[0], Item::Block(ref b) if b.is_media()));
/// ```
pub fn scan(input: &str) -> Stylesheet {
    let mut scanner = Scanner::new(input);
    let (items, _) = scanner.parse_items(false);
    Stylesheet { items }
}

/// 内部扫描器
struct Scanner<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    /// 解析条目直到匹配的 `}`（nested）或输入结尾
    ///
    /// 返回 (条目, 是否遇到闭合的 `}`)
    fn parse_items(&mut self, nested: bool) -> (Vec<Item>, bool) {
        let mut items = Vec::new();

        loop {
            // 1. 前导空白与注释
            let trivia_start = self.pos;
            self.skip_trivia();
            if self.pos > trivia_start {
                items.push(Item::Raw(self.input[trivia_start..self.pos].to_string()));
            }

            let Some(ch) = self.peek() else {
                return (items, false);
            };

            // 2. 块结束
            if ch == b'}' {
                self.pos += 1;
                if nested {
                    return (items, true);
                }
                // 顶层多余的 `}`，原样保留
                items.push(Item::Raw("}".to_string()));
                continue;
            }

            // 3. 语句：读到 `;`、`{`、`}` 或结尾
            let start = self.pos;
            let end = self.scan_statement();
            let text = &self.input[start..end];

            match self.peek() {
                Some(b'{') => {
                    self.pos += 1;
                    let (children, closed) = self.parse_items(true);
                    items.push(Item::Block(Block {
                        prelude: text.to_string(),
                        items: children,
                        closed,
                    }));
                }
                Some(b';') => {
                    self.pos += 1;
                    items.push(statement(text, true));
                }
                // `}` 留给下一轮处理
                _ => items.push(statement(text, false)),
            }
        }
    }

    /// 前进到语句结束符，返回结束位置（不消费结束符）
    fn scan_statement(&mut self) -> usize {
        let mut depth = 0usize;

        while let Some(ch) = self.peek() {
            match ch {
                b'"' | b'\'' => self.skip_string(ch),
                b'/' if self.peek_at(1) == Some(b'*') => self.skip_comment(),
                b'\\' => self.advance(2),
                b'(' | b'[' => {
                    depth += 1;
                    self.pos += 1;
                }
                b')' | b']' => {
                    depth = depth.saturating_sub(1);
                    self.pos += 1;
                }
                // 花括号总是结束语句，避免括号不配对时吞掉后续内容
                b'{' | b'}' => break,
                b';' if depth == 0 => break,
                _ => self.pos += 1,
            }
        }

        self.pos
    }

    /// 跳过空白和注释
    fn skip_trivia(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_whitespace() {
                self.pos += 1;
            } else if ch == b'/' && self.peek_at(1) == Some(b'*') {
                self.skip_comment();
            } else {
                break;
            }
        }
    }

    /// 跳过 `/* ... */`，未闭合时跳到结尾
    fn skip_comment(&mut self) {
        match self.input[self.pos + 2..].find("*/") {
            Some(offset) => self.pos += 2 + offset + 2,
            None => self.pos = self.bytes.len(),
        }
    }

    /// 跳过引号字符串（支持转义），换行视为字符串结束
    fn skip_string(&mut self, quote: u8) {
        self.pos += 1;
        while let Some(ch) = self.peek() {
            match ch {
                b'\\' => self.advance(2),
                b'\n' => return,
                c if c == quote => {
                    self.pos += 1;
                    return;
                }
                _ => self.pos += 1,
            }
        }
    }

    fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.bytes.len());
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }
}

/// 把语句文本归类为声明或原文
///
/// 含冒号且不以 `@` 开头的视为声明（`@import url("a:b");` 之类保持原文）。
fn statement(text: &str, semicolon: bool) -> Item {
    if !text.starts_with('@') {
        if let Some((name, value)) = text.split_once(':') {
            return Item::Declaration(Declaration {
                name: name.to_string(),
                value: value.to_string(),
                semicolon,
            });
        }
    }

    let mut raw = text.to_string();
    if semicolon {
        raw.push(';');
    }
    Item::Raw(raw)
}
