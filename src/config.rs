//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `CLERK__*` 覆盖（双下划线表示嵌套，
//! 如 `CLERK__SHOP__BASE_URL=http://localhost:3000`）。

use std::path::PathBuf;

use serde::Deserialize;

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub shop: ShopSection,
    #[serde(default)]
    pub context: ContextSection,
    #[serde(default)]
    pub policy: PolicySection,
}

/// [shop] 段：商城后端地址与请求超时
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShopSection {
    /// REST 后端 base URL
    pub base_url: String,
    /// 单次后端请求超时（秒），超时视为后端故障
    pub request_timeout_secs: u64,
}

impl Default for ShopSection {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// [context] 段：本地参考文档目录与检索默认条数
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContextSection {
    /// 语料目录；不存在时语料为空，Agent 仍可仅靠后端工具工作
    pub dir: PathBuf,
    /// search_context 未指定 k 时的默认值
    pub default_k: usize,
}

impl Default for ContextSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("context"),
            default_k: 5,
        }
    }
}

/// [policy] 段：会话策略（每轮调用上限、结账确认门）
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PolicySection {
    /// 结账前是否要求「已播报摘要并获得用户确认」
    pub require_confirmation: bool,
    /// 每个用户轮次允许的工具调用次数
    pub max_calls_per_turn: u32,
}

impl Default for PolicySection {
    fn default() -> Self {
        Self {
            require_confirmation: true,
            max_calls_per_turn: 1,
        }
    }
}

/// 从 config 目录加载配置，环境变量 CLERK__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 CLERK__*（双下划线表示嵌套键）
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("CLERK")
            .separator("__")
            .try_parsing(true),
    );

    let c = builder.build()?;
    c.try_deserialize()
}

/// 重新从磁盘与环境变量加载配置（配置热更新：调用方决定是否用新配置重建后端客户端）
pub fn reload_config() -> Result<AppConfig, config::ConfigError> {
    load_config(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.shop.base_url, "http://localhost:3000");
        assert_eq!(cfg.shop.request_timeout_secs, 10);
        assert_eq!(cfg.context.default_k, 5);
        assert!(cfg.policy.require_confirmation);
        assert_eq!(cfg.policy.max_calls_per_turn, 1);
    }
}
