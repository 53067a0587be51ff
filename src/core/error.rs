//! Agent 错误类型
//!
//! 后端故障（非 2xx、超时）、参数错误、策略违规等统一为 AgentError，
//! 由 ToolExecutor 返回给外部规划器；业务性结果（如「还没有购物车」）
//! 不走这里，而是作为带 error 字段的正常 JSON 返回（领域错误即数据）。

use thiserror::Error;

use crate::shop::ShopError;

/// 工具分发过程中可能出现的错误（网络、解析、策略、未知工具等）
#[derive(Error, Debug)]
pub enum AgentError {
    /// 商城后端返回非 2xx
    #[error("Backend error (HTTP {status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Network timeout")]
    NetworkTimeout,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("JSON parse error: {0}")]
    JsonParseError(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Tool timeout: {0}")]
    ToolTimeout(String),

    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArgs { tool: String, reason: String },

    /// 会话策略违规（如同一轮内第二次工具调用）
    #[error("Policy violation: {0}")]
    PolicyViolation(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

impl From<ShopError> for AgentError {
    fn from(e: ShopError) -> Self {
        match e {
            ShopError::Status { status, body } => AgentError::Backend {
                status,
                message: body,
            },
            ShopError::NotFound(what) => AgentError::Backend {
                status: 404,
                message: format!("{} not found", what),
            },
            ShopError::Timeout => AgentError::NetworkTimeout,
            ShopError::Transport(msg) => AgentError::Transport(msg),
            ShopError::Decode(msg) => AgentError::JsonParseError(msg),
        }
    }
}
