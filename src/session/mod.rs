//! 会话状态：单一购物车 + 轮次 / 结账策略
//!
//! 一个会话 = 一次对话 = 至多一个购物车。cart_id 一经设置不再变更，
//! 只在首次需要时懒创建。会话内工具调用串行（规划器逐个 await），
//! 无需并发保护；跨会话各持各的 Session，语料只读共享。

pub mod policy;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::PolicySection;
use crate::shop::{ShopBackend, ShopError};

pub use policy::{CheckoutStage, ConversationPolicy};

/// 购物车会话：持有会话内唯一的 cart_id
#[derive(Debug, Default)]
pub struct CartSession {
    cart_id: Option<String>,
}

impl CartSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已有购物车时返回其 id，不触后端
    pub fn cart_id(&self) -> Option<&str> {
        self.cart_id.as_deref()
    }

    /// 首次调用向后端建购物车并记住 id；之后始终返回同一 id，不再触后端
    pub async fn ensure_cart(&mut self, backend: &dyn ShopBackend) -> Result<String, ShopError> {
        if let Some(id) = &self.cart_id {
            return Ok(id.clone());
        }
        let cart = backend.create_cart().await?;
        tracing::info!(cart_id = %cart.id, "cart created for session");
        self.cart_id = Some(cart.id.clone());
        Ok(cart.id)
    }
}

/// 对话会话：购物车 + 策略状态机
pub struct ConversationSession {
    pub cart: CartSession,
    pub policy: ConversationPolicy,
}

impl ConversationSession {
    pub fn new(policy_cfg: &PolicySection) -> Self {
        Self {
            cart: CartSession::new(),
            policy: ConversationPolicy::new(policy_cfg),
        }
    }
}

/// 会话共享句柄：工具持有克隆，会话内调用串行所以锁无竞争
pub type SharedSession = Arc<Mutex<ConversationSession>>;

pub fn shared_session(policy_cfg: &PolicySection) -> SharedSession {
    Arc::new(Mutex::new(ConversationSession::new(policy_cfg)))
}
