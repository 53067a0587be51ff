//! search_context 工具：本地参考语料的词汇检索
//!
//! 只回答非交易类问题（文案、FAQ、政策、对比推荐）；
//! 价格、库存、订单状态一律走 REST 工具，不在语料里找。

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::context::Corpus;
use crate::core::AgentError;
use crate::tools::Tool;

/// search_context：在已加载语料上做子串计数检索，返回至多 k 条文档
pub struct SearchContextTool {
    corpus: Arc<Corpus>,
    default_k: usize,
}

impl SearchContextTool {
    pub fn new(corpus: Arc<Corpus>, default_k: usize) -> Self {
        Self { corpus, default_k }
    }
}

#[async_trait]
impl Tool for SearchContextTool {
    fn name(&self) -> &str {
        "search_context"
    }

    fn description(&self) -> &str {
        "Search local reference docs (sales copy, FAQs, policies) - NOT for prices, stock or order status. Args: {\"query\": \"return policy\", \"k\": 5}"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": { "type": "string" },
                "k": { "type": "integer", "minimum": 1 }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value, AgentError> {
        let query = args.get("query").and_then(|v| v.as_str()).unwrap_or("");
        let k = args
            .get("k")
            .and_then(|v| v.as_u64())
            .map(|k| k as usize)
            .unwrap_or(self.default_k);

        let results = self.corpus.search(query, k);
        Ok(serde_json::json!({ "results": results }))
    }
}
