use serde::Serialize;
use wasm_bindgen::prelude::*;

use vpx_core::{ConfigError, Options};
use vpx_transform::{create_transformer, DeclarationContext, Transformer};

// ── 参数与结果转换 ────────────────────────────────────────────

const DEFAULT_FILE_ID: &str = "unknown";

/// JS 配置对象 → Options
///
/// 字段名与 JS 侧一致（camelCase）。正则黑名单需写成 `{ pattern, flags }`。
fn parse_options(options: JsValue) -> Result<Options, JsError> {
    if options.is_undefined() || options.is_null() {
        Ok(Options::default())
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))
    }
}

fn config_error(err: ConfigError) -> JsError {
    JsError::new(&format!("[vpx] {}", err))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value
        .serialize(&serializer)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

// ── WASM 导出 ─────────────────────────────────────────────────

/// 初始化 panic hook（自动调用）
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// 转换器实例，持有只读配置和本实例的转换记录
#[wasm_bindgen(js_name = "VpxTransformer")]
pub struct VpxTransformer {
    inner: Transformer,
}

#[wasm_bindgen(js_class = "VpxTransformer")]
impl VpxTransformer {
    /// @param options - 配置对象，可选；非法配置直接抛出
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<VpxTransformer, JsError> {
        let options = parse_options(options)?;
        let inner = create_transformer(options).map_err(config_error)?;
        Ok(VpxTransformer { inner })
    }

    /// 转换整段 CSS 文本
    ///
    /// @param source - CSS 文本
    /// @param fileId - 来源文件标识，仅用于转换记录
    pub fn transform(&mut self, source: &str, file_id: Option<String>) -> String {
        let file_id = file_id.as_deref().unwrap_or(DEFAULT_FILE_ID);
        self.inner.transform(source, file_id)
    }

    /// 转换单条声明的值
    ///
    /// @param property  - 属性名
    /// @param value     - 属性值
    /// @param selector  - 所属规则的选择器
    /// @param condition - 最近一层 `@media` 的条件全文
    /// @param fileId    - 来源文件标识
    #[wasm_bindgen(js_name = "transformDeclaration")]
    pub fn transform_declaration(
        &mut self,
        property: &str,
        value: &str,
        selector: Option<String>,
        condition: Option<String>,
        file_id: Option<String>,
    ) -> String {
        let context = DeclarationContext {
            selector: selector.as_deref().unwrap_or(""),
            condition: condition.as_deref(),
        };
        let file_id = file_id.as_deref().unwrap_or(DEFAULT_FILE_ID);
        self.inner.transform_declaration(property, value, context, file_id)
    }

    /// @returns 转换记录数组 `{ file, selector, property, kind, original, converted, mediaQuery, viewportWidth }[]`
    #[wasm_bindgen(js_name = "getConversions")]
    pub fn get_conversions(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.conversions())
    }

    #[wasm_bindgen(js_name = "clearConversions")]
    pub fn clear_conversions(&mut self) {
        self.inner.clear_conversions();
    }

    /// 按 logLevel 输出转换记录
    pub fn flush(&self) {
        self.inner.flush();
    }
}

/// 创建转换器（等价于 `new VpxTransformer(options)`）
#[wasm_bindgen(js_name = "createTransformer")]
pub fn create(options: JsValue) -> Result<VpxTransformer, JsError> {
    VpxTransformer::new(options)
}
