//! Clerk - 语音购物助手决策核心
//!
//! 语音链路（STT / TTS / VAD）与 LLM 规划器均为外部协作方；本 crate 只负责
//! 「决定调用哪个后端操作、维护会话内唯一购物车、用本地语料回答非交易问题」。
//!
//! 模块划分：
//! - **agent**: 无头分发运行时（装配工具、按轮次策略执行）
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **context**: 本地参考语料的索引与词汇检索
//! - **core**: 错误类型
//! - **observability**: tracing 初始化
//! - **session**: 购物车会话与对话策略状态机
//! - **shop**: 商城后端边界（REST 客户端 / 内存 mock / 类型）
//! - **tools**: 八个工具与执行器（超时、审计日志）

pub mod agent;
pub mod config;
pub mod context;
pub mod core;
pub mod observability;
pub mod session;
pub mod shop;
pub mod tools;
