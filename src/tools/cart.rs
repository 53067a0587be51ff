//! 购物车工具：create_cart / add_to_cart / checkout_cart
//!
//! 三个工具都绑定同一个会话购物车（分发层保证的不变量：一次对话绝不
//! 同时操作多个购物车）。「还没有购物车」「未确认就结账」是预期业务结果，
//! 以带 error 字段的数据返回，不抛错。

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::core::AgentError;
use crate::session::SharedSession;
use crate::shop::ShopBackend;
use crate::tools::Tool;

/// create_cart：为会话建购物车；已有购物车时返回现有 id（不重建）
pub struct CreateCartTool {
    backend: Arc<dyn ShopBackend>,
    session: SharedSession,
}

impl CreateCartTool {
    pub fn new(backend: Arc<dyn ShopBackend>, session: SharedSession) -> Self {
        Self { backend, session }
    }
}

#[async_trait]
impl Tool for CreateCartTool {
    fn name(&self) -> &str {
        "create_cart"
    }

    fn description(&self) -> &str {
        "Create the conversation's cart (one cart per conversation). Args: {}"
    }

    async fn execute(&self, _args: Value) -> Result<Value, AgentError> {
        let mut session = self.session.lock().await;
        if let Some(id) = session.cart.cart_id() {
            // cart_id 一经设置不可重建，返回数据型领域错误
            return Ok(serde_json::json!({
                "error": "Cart already exists for this conversation",
                "id": id,
            }));
        }
        let id = session.cart.ensure_cart(self.backend.as_ref()).await?;
        Ok(serde_json::json!({ "id": id, "items": [] }))
    }
}

/// add_to_cart：向会话购物车追加商品；没有购物车时先懒创建
pub struct AddToCartTool {
    backend: Arc<dyn ShopBackend>,
    session: SharedSession,
}

impl AddToCartTool {
    pub fn new(backend: Arc<dyn ShopBackend>, session: SharedSession) -> Self {
        Self { backend, session }
    }
}

#[async_trait]
impl Tool for AddToCartTool {
    fn name(&self) -> &str {
        "add_to_cart"
    }

    fn description(&self) -> &str {
        "Add a product to the cart (created lazily if absent). Args: {\"productId\": \"p-100\", \"quantity\": 1}"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "productId": { "type": "string" },
                "quantity": { "type": "integer", "minimum": 1 }
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
                tool: "add_to_cart".into(),
                reason: "missing productId".into(),
            })?;
        // 宽容校验：0 / 负数 / 缺省一律按 1 处理
        let quantity = args
            .get("quantity")
            .and_then(|v| v.as_i64())
            .unwrap_or(1)
            .clamp(1, u32::MAX as i64) as u32;

        let mut session = self.session.lock().await;
        let cart_id = session.cart.ensure_cart(self.backend.as_ref()).await?;
        let cart = self
            .backend
            .add_to_cart(&cart_id, product_id, quantity)
            .await?;
        serde_json::to_value(cart).map_err(|e| AgentError::JsonParseError(e.to_string()))
    }
}

/// checkout_cart：结账。要求已有购物车且策略状态允许（摘要已播报并获确认）
pub struct CheckoutCartTool {
    backend: Arc<dyn ShopBackend>,
    session: SharedSession,
}

impl CheckoutCartTool {
    pub fn new(backend: Arc<dyn ShopBackend>, session: SharedSession) -> Self {
        Self { backend, session }
    }
}

#[async_trait]
impl Tool for CheckoutCartTool {
    fn name(&self) -> &str {
        "checkout_cart"
    }

    fn description(&self) -> &str {
        "Place the order for the conversation's cart. Call only after the user explicitly confirmed the summary. Args: {\"promoCode\": \"WELCOME10\"}"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "promoCode": { "type": "string" }
            },
            "required": []
        })
    }

    async fn execute(&self, args: Value) -> Result<Value, AgentError> {
        let promo_code = args
            .get("promoCode")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let mut session = self.session.lock().await;
        let cart_id = match session.cart.cart_id() {
            Some(id) => id.to_string(),
            // 领域错误：不触后端
            None => return Ok(serde_json::json!({ "error": "No cart yet" })),
        };
        if let Err(reason) = session.policy.checkout_allowed() {
            return Ok(serde_json::json!({ "error": reason }));
        }

        let order = self.backend.checkout(&cart_id, promo_code).await?;
        session.policy.checked_out();
        serde_json::to_value(order).map_err(|e| AgentError::JsonParseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PolicySection;
    use crate::session::shared_session;
    use crate::shop::InMemoryShop;

    fn setup() -> (Arc<InMemoryShop>, SharedSession) {
        (
            Arc::new(InMemoryShop::new()),
            shared_session(&PolicySection::default()),
        )
    }

    #[tokio::test]
    async fn test_add_to_cart_clamps_quantity_to_one() {
        let (shop, session) = setup();
        let tool = AddToCartTool::new(shop.clone(), session);

        for qty in [0i64, -3] {
            let out = tool
                .execute(serde_json::json!({"productId": "p-100", "quantity": qty}))
                .await
                .unwrap();
            let items = out["items"].as_array().unwrap();
            assert_eq!(items[0]["productId"], "p-100");
        }
        // 两次 clamp 后的 1 + 1 累加
        let out = tool
            .execute(serde_json::json!({"productId": "p-100", "quantity": 1}))
            .await
            .unwrap();
        assert_eq!(out["items"][0]["quantity"], 3);
    }

    #[tokio::test]
    async fn test_add_to_cart_lazily_creates_cart_once() {
        let (shop, session) = setup();
        let tool = AddToCartTool::new(shop.clone(), session.clone());

        tool.execute(serde_json::json!({"productId": "p-100", "quantity": 1}))
            .await
            .unwrap();
        tool.execute(serde_json::json!({"productId": "p-101", "quantity": 1}))
            .await
            .unwrap();

        assert_eq!(shop.create_cart_calls(), 1);
        assert!(session.lock().await.cart.cart_id().is_some());
    }

    #[tokio::test]
    async fn test_checkout_without_cart_is_domain_error_without_backend_call() {
        let (shop, session) = setup();
        let tool = CheckoutCartTool::new(shop.clone(), session);

        let out = tool.execute(serde_json::json!({})).await.unwrap();
        assert_eq!(out["error"], "No cart yet");
        assert_eq!(shop.checkout_calls(), 0);
    }

    #[tokio::test]
    async fn test_checkout_requires_confirmation_stage() {
        let (shop, session) = setup();
        let add = AddToCartTool::new(shop.clone(), session.clone());
        let checkout = CheckoutCartTool::new(shop.clone(), session.clone());

        add.execute(serde_json::json!({"productId": "p-100"}))
            .await
            .unwrap();

        // 未播报摘要：领域错误，不触后端
        let out = checkout.execute(serde_json::json!({})).await.unwrap();
        assert!(out["error"].as_str().unwrap().contains("confirmation"));
        assert_eq!(shop.checkout_calls(), 0);

        session.lock().await.policy.summary_presented();
        let order = checkout.execute(serde_json::json!({})).await.unwrap();
        assert!(order.get("total").is_some());
        assert_eq!(shop.checkout_calls(), 1);
    }

    #[tokio::test]
    async fn test_create_cart_is_idempotent_per_conversation() {
        let (shop, session) = setup();
        let tool = CreateCartTool::new(shop.clone(), session);

        let first = tool.execute(serde_json::json!({})).await.unwrap();
        let second = tool.execute(serde_json::json!({})).await.unwrap();

        assert!(first.get("error").is_none());
        assert_eq!(second["id"], first["id"]);
        assert!(second.get("error").is_some());
        assert_eq!(shop.create_cart_calls(), 1);
    }
}
