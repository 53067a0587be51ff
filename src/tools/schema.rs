//! 工具调用 JSON Schema 生成（schemars）
//!
//! 用于把「合法 tool call」的 JSON 结构交给外部规划器，减少输出格式错误。

use schemars::{schema_for, JsonSchema};
use serde_json::Value;
use std::collections::HashMap;

/// 工具调用请求格式：`{"tool": "...", "args": {...}}`（仅用于 Schema 生成）
#[allow(dead_code)]
#[derive(JsonSchema)]
struct ToolCallFormat {
    /// 工具名：list_products、get_product、create_cart、add_to_cart、
    /// checkout_cart、track_order、list_promotions、search_context
    pub tool: String,
    /// 工具参数，依工具不同而不同（query、productId、quantity、promoCode 等）
    pub args: HashMap<String, Value>,
}

/// 返回工具调用的 JSON Schema 字符串，可直接交给规划器
pub fn tool_call_schema_json() -> String {
    let schema = schema_for!(ToolCallFormat);
    serde_json::to_string_pretty(&schema).unwrap_or_else(|_| String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mentions_tool_and_args() {
        let schema = tool_call_schema_json();
        assert!(schema.contains("\"tool\""));
        assert!(schema.contains("\"args\""));
    }
}
