//! 商品工具：list_products / get_product

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::core::AgentError;
use crate::shop::ShopBackend;
use crate::tools::Tool;

/// list_products：浏览 / 按关键词搜索商品
///
/// query 非空时作为过滤转发给后端；category 参数接受但不转发
/// （与现行策略一致：优先 query，不与 category 组合使用）。
pub struct ListProductsTool {
    backend: Arc<dyn ShopBackend>,
}

impl ListProductsTool {
    pub fn new(backend: Arc<dyn ShopBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Tool for ListProductsTool {
    fn name(&self) -> &str {
        "list_products"
    }

    fn description(&self) -> &str {
        "Search or browse products. Prefer \"query\"; do not combine with \"category\". Args: {\"query\": \"keyword\", \"category\": \"optional\"}"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": { "type": "string" },
                "category": { "type": "string" }
            },
            "required": []
        })
    }

    async fn execute(&self, args: Value) -> Result<Value, AgentError> {
        let query = args.get("query").and_then(|v| v.as_str()).unwrap_or("").trim();
        if let Some(category) = args.get("category").and_then(|v| v.as_str()) {
            // 接受但不转发；留痕便于审计规划器是否违反「只用 query」的约定
            tracing::debug!(category = %category, "list_products category ignored");
        }
        let products = self
            .backend
            .list_products((!query.is_empty()).then_some(query))
            .await?;
        Ok(serde_json::json!({ "products": products }))
    }
}

/// get_product：按 id 取单个商品详情
pub struct GetProductTool {
    backend: Arc<dyn ShopBackend>,
}

impl GetProductTool {
    pub fn new(backend: Arc<dyn ShopBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Tool for GetProductTool {
    fn name(&self) -> &str {
        "get_product"
    }

    fn description(&self) -> &str {
        "Get one product's detail by id. Args: {\"productId\": \"p-100\"}"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "productId": { "type": "string" }
            },
            "required": ["productId"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value, AgentError> {
        let product_id = args
            .get("productId")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AgentError::InvalidArgs {
                tool: "get_product".into(),
                reason: "missing productId".into(),
            })?;
        let product = self.backend.get_product(product_id).await?;
        serde_json::to_value(product).map_err(|e| AgentError::JsonParseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shop::InMemoryShop;

    #[tokio::test]
    async fn test_list_products_forwards_query() {
        let tool = ListProductsTool::new(Arc::new(InMemoryShop::new()));
        let out = tool
            .execute(serde_json::json!({"query": "keyboard"}))
            .await
            .unwrap();
        let products = out["products"].as_array().unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0]["id"], "p-101");
    }

    #[tokio::test]
    async fn test_list_products_empty_catalog_is_empty_not_error() {
        let tool = ListProductsTool::new(Arc::new(InMemoryShop::empty()));
        let out = tool
            .execute(serde_json::json!({"query": "keyboard"}))
            .await
            .unwrap();
        assert!(out["products"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_product_missing_id_is_invalid_args() {
        let tool = GetProductTool::new(Arc::new(InMemoryShop::new()));
        let err = tool.execute(serde_json::json!({})).await.unwrap_err();
        assert!(matches!(err, AgentError::InvalidArgs { .. }));
    }

    #[tokio::test]
    async fn test_get_product_unknown_id_is_backend_404() {
        let tool = GetProductTool::new(Arc::new(InMemoryShop::new()));
        let err = tool
            .execute(serde_json::json!({"productId": "p-999"}))
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::Backend { status: 404, .. }));
    }
}
