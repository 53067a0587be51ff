//! Headless Agent 运行时
//!
//! 供外部规划器（或调试控制台）调用的无界面分发逻辑：
//! create_agent_components 把配置、后端、语料、会话装配成八个工具 + 执行器；
//! begin_turn / dispatch 按「一轮至多一次调用」的策略执行单个工具。

use std::sync::Arc;

use serde_json::Value;

use crate::config::AppConfig;
use crate::context::Corpus;
use crate::core::AgentError;
use crate::session::SharedSession;
use crate::shop::ShopBackend;
use crate::tools::{
    AddToCartTool, CheckoutCartTool, CreateCartTool, GetProductTool, ListPromotionsTool,
    ListProductsTool, SearchContextTool, ToolExecutor, ToolRegistry, TrackOrderTool,
};

/// 预构建的 Agent 组件：带超时与审计的工具执行器
pub struct AgentComponents {
    pub executor: ToolExecutor,
}

/// 创建 Agent 组件：注册全部八个工具，购物车类工具共享同一会话
pub fn create_agent_components(
    cfg: &AppConfig,
    backend: Arc<dyn ShopBackend>,
    corpus: Arc<Corpus>,
    session: SharedSession,
) -> AgentComponents {
    let mut tools = ToolRegistry::new();
    tools.register(ListProductsTool::new(backend.clone()));
    tools.register(GetProductTool::new(backend.clone()));
    tools.register(CreateCartTool::new(backend.clone(), session.clone()));
    tools.register(AddToCartTool::new(backend.clone(), session.clone()));
    tools.register(CheckoutCartTool::new(backend.clone(), session.clone()));
    tools.register(TrackOrderTool::new(backend.clone()));
    tools.register(ListPromotionsTool::new(backend));
    tools.register(SearchContextTool::new(corpus, cfg.context.default_k));

    AgentComponents {
        // 工具超时略大于后端请求超时，保证先看到 Backend 错误而非笼统的 ToolTimeout
        executor: ToolExecutor::new(tools, cfg.shop.request_timeout_secs + 2),
    }
}

/// 新用户轮次开始：重置会话的本轮调用预算
pub async fn begin_turn(session: &SharedSession) {
    session.lock().await.policy.begin_turn();
}

/// 分发一次工具调用；同一轮内超出预算返回 PolicyViolation
pub async fn dispatch(
    components: &AgentComponents,
    session: &SharedSession,
    tool: &str,
    args: Value,
) -> Result<Value, AgentError> {
    session.lock().await.policy.note_call(tool)?;
    components.executor.execute(tool, args).await
}

/// 一轮 = 一次用户输入 + 至多一次工具调用的便捷封装
pub async fn process_turn(
    components: &AgentComponents,
    session: &SharedSession,
    tool: &str,
    args: Value,
) -> Result<Value, AgentError> {
    begin_turn(session).await;
    dispatch(components, session, tool, args).await
}

/// 规划器报告「已播报结账摘要并获用户确认」，打开结账门
pub async fn note_summary_presented(session: &SharedSession) {
    session.lock().await.policy.summary_presented();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::session::shared_session;
    use crate::shop::InMemoryShop;

    fn setup() -> (AgentComponents, SharedSession) {
        let cfg = AppConfig::default();
        let session = shared_session(&cfg.policy);
        let components = create_agent_components(
            &cfg,
            Arc::new(InMemoryShop::new()),
            Corpus::from_documents(Vec::new()).shared(),
            session.clone(),
        );
        (components, session)
    }

    #[tokio::test]
    async fn test_second_dispatch_in_same_turn_is_rejected() {
        let (components, session) = setup();
        begin_turn(&session).await;

        dispatch(&components, &session, "list_products", serde_json::json!({}))
            .await
            .unwrap();
        let err = dispatch(&components, &session, "list_promotions", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::PolicyViolation(_)));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_reported() {
        let (components, session) = setup();
        let err = process_turn(&components, &session, "fly_to_moon", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::UnknownTool(_)));
    }

    #[tokio::test]
    async fn test_all_eight_tools_registered() {
        let (components, _) = setup();
        let mut names = components.executor.tool_names();
        names.sort();
        assert_eq!(
            names,
            vec![
                "add_to_cart",
                "checkout_cart",
                "create_cart",
                "get_product",
                "list_products",
                "list_promotions",
                "search_context",
                "track_order",
            ]
        );
    }
}
