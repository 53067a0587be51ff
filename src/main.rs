//! Clerk 调试控制台
//!
//! 不接语音链路与 LLM 时，从 stdin 逐行模拟规划器的 tool call：
//! 每行一个 `{"tool": "...", "args": {...}}`，一行即一轮。
//!
//! 元命令:
//! - /tools   打印已注册工具的 schema
//! - /summary 标记「已向用户播报结账摘要并获确认」（打开结账门）
//! - /mock    以内存后端运行（默认连 config 里的 REST 后端）
//!
//! 启动: cargo run [-- --mock]

use std::io::BufRead;
use std::sync::Arc;

use serde_json::Value;

use clerk::agent::{create_agent_components, note_summary_presented, process_turn};
use clerk::config::{load_config, AppConfig};
use clerk::context::Corpus;
use clerk::session::shared_session;
use clerk::shop::{HttpShopClient, InMemoryShop, ShopBackend};
use clerk::tools::tool_call_schema_json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    clerk::observability::init();

    let cfg = load_config(None).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config load failed, using defaults");
        AppConfig::default()
    });

    let use_mock = std::env::args().any(|a| a == "--mock");
    let backend: Arc<dyn ShopBackend> = if use_mock {
        tracing::info!("using in-memory shop backend");
        Arc::new(InMemoryShop::new())
    } else {
        tracing::info!(base_url = %cfg.shop.base_url, "using HTTP shop backend");
        Arc::new(HttpShopClient::new(
            cfg.shop.base_url.clone(),
            cfg.shop.request_timeout_secs,
        ))
    };

    let corpus = Corpus::load(&cfg.context.dir).shared();
    let session = shared_session(&cfg.policy);
    let components = create_agent_components(&cfg, backend, corpus, session.clone());

    println!("clerk console - one JSON tool call per line, /tools for schema");

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line {
            "/tools" => {
                println!("{}", components.executor.to_schema_json());
                println!("{}", tool_call_schema_json());
                continue;
            }
            "/summary" => {
                note_summary_presented(&session).await;
                println!("ok: awaiting confirmation -> checkout unlocked");
                continue;
            }
            _ => {}
        }

        let call: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                println!("parse error: {}", e);
                continue;
            }
        };
        let tool = call.get("tool").and_then(|v| v.as_str()).unwrap_or("");
        let args = call.get("args").cloned().unwrap_or(Value::Null);
        if tool.is_empty() {
            println!("missing \"tool\" field");
            continue;
        }

        match process_turn(&components, &session, tool, args).await {
            Ok(result) => println!("{}", result),
            Err(e) => println!("error: {}", e),
        }
    }

    Ok(())
}
