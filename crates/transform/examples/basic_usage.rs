/// 基本使用示例：展示如何用 vpx 转换器处理一段 CSS
///
/// 运行示例：
/// ```bash
/// RUST_LOG=info cargo run --example basic_usage -p vpx-transform
/// ```

use tracing_subscriber::EnvFilter;
use vpx_transform::{create_transformer, DeclarationContext, Options};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== vpx 基本使用示例 ===\n");

    // 1. 配置（字段名与 JS 侧一致）
    let options = Options::from_json(
        r#"{
            "viewportWidth": 375,
            "logConversions": true,
            "logLevel": "verbose",
            "selectorBlackList": [".legacy"],
            "mediaQueries": {
                "@media (min-width: 768px)": { "viewportWidth": 768, "unitPrecision": 2 }
            }
        }"#,
    )
    .expect("invalid options");

    let mut transformer = create_transformer(options).expect("invalid configuration");

    // 2. 整段文本转换
    let css = r#"
.title { font-size: 36vpx; margin: 0 -20maxvpx; }
.legacy { width: 200vpx; }
.hero { width: linear-vpx(840, 1000, 1200, 1920); }
@media (min-width: 768px) {
  .title { font-size: 36vpx; }
}
"#;
    let output = transformer.transform(css, "demo.css");
    println!("输入:\n{}", css);
    println!("输出:\n{}", output);

    // 3. 单条声明转换（结构化宿主）
    let value = transformer.transform_declaration(
        "padding",
        "12cvpx 24vpx",
        DeclarationContext::new(".card").with_condition("@media (min-width: 768px)"),
        "demo.css",
    );
    println!("单条声明: padding: {}\n", value);

    // 4. 转换记录
    println!("共 {} 次替换", transformer.conversions().len());
    transformer.flush();
}
