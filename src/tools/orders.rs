//! 订单与促销工具：track_order / list_promotions

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::core::AgentError;
use crate::shop::ShopBackend;
use crate::tools::Tool;

/// track_order：按订单 id 查询状态与预计送达
pub struct TrackOrderTool {
    backend: Arc<dyn ShopBackend>,
}

impl TrackOrderTool {
    pub fn new(backend: Arc<dyn ShopBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Tool for TrackOrderTool {
    fn name(&self) -> &str {
        "track_order"
    }

    fn description(&self) -> &str {
        "Get an order's status and ETA by id. Args: {\"orderId\": \"o-abc123\"}"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "orderId": { "type": "string" }
            },
            "required": ["orderId"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value, AgentError> {
        let order_id = args
            .get("orderId")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AgentError::InvalidArgs {
                tool: "track_order".into(),
                reason: "missing orderId".into(),
            })?;
        let order = self.backend.get_order(order_id).await?;
        serde_json::to_value(order).map_err(|e| AgentError::JsonParseError(e.to_string()))
    }
}

/// list_promotions：列出可用促销码
pub struct ListPromotionsTool {
    backend: Arc<dyn ShopBackend>,
}

impl ListPromotionsTool {
    pub fn new(backend: Arc<dyn ShopBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Tool for ListPromotionsTool {
    fn name(&self) -> &str {
        "list_promotions"
    }

    fn description(&self) -> &str {
        "List available promo codes. Args: {}"
    }

    async fn execute(&self, _args: Value) -> Result<Value, AgentError> {
        let promos = self.backend.list_promos().await?;
        Ok(serde_json::json!({ "promos": promos }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shop::{InMemoryShop, ShopBackend};

    #[tokio::test]
    async fn test_track_order_returns_status_and_eta() {
        let shop = Arc::new(InMemoryShop::new());
        let cart = shop.create_cart().await.unwrap();
        shop.add_to_cart(&cart.id, "p-102", 1).await.unwrap();
        let order = shop.checkout(&cart.id, None).await.unwrap();

        let tool = TrackOrderTool::new(shop);
        let out = tool
            .execute(serde_json::json!({"orderId": order.id}))
            .await
            .unwrap();
        assert_eq!(out["status"], "processing");
        assert_eq!(out["etaDays"], 5);
    }

    #[tokio::test]
    async fn test_list_promotions_wraps_promos() {
        let tool = ListPromotionsTool::new(Arc::new(InMemoryShop::new()));
        let out = tool.execute(serde_json::json!({})).await.unwrap();
        let promos = out["promos"].as_array().unwrap();
        assert!(promos.iter().any(|p| p["code"] == "WELCOME10"));
    }
}
