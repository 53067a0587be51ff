//! 本地参考语料：加载与词汇检索
//!
//! 语料在启动时一次性载入内存，进程生命周期内只读；
//! 可用 Arc 在并发会话间共享，无需加锁。

pub mod indexer;
pub mod retriever;

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// 参考文档：加载后不可变，id 为文件路径或 JSON 元素自带的 id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub text: String,
}

/// 内存语料句柄：持有加载顺序固定的文档列表
pub struct Corpus {
    docs: Vec<Document>,
}

impl Corpus {
    /// 从目录加载语料；目录不存在时为空语料（Agent 仍可仅靠后端工具工作）
    pub fn load(dir: &Path) -> Self {
        Self {
            docs: indexer::load_corpus(dir),
        }
    }

    pub fn from_documents(docs: Vec<Document>) -> Self {
        Self { docs }
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn documents(&self) -> &[Document] {
        &self.docs
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// 词汇检索：见 retriever 模块（子串计数打分，稳定排序取前 k）
    pub fn search(&self, query: &str, k: usize) -> Vec<Document> {
        retriever::search(&self.docs, query, k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_then_search_json_corpus() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("products.json"),
            r#"[{"id":"p1","name":"Blue Mug","price":900},{"id":"p2","name":"Desk Lamp","price":5900}]"#,
        )
        .unwrap();

        let corpus = Corpus::load(tmp.path());
        assert_eq!(corpus.len(), 2);

        let hits = corpus.search("blue", 5);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "p1");
        assert_eq!(hits[0].title, "Blue Mug");
    }

    #[test]
    fn test_missing_dir_gives_working_empty_corpus() {
        let corpus = Corpus::load(std::path::Path::new("/no/such/context"));
        assert!(corpus.is_empty());
        assert!(corpus.search("anything", 5).is_empty());
    }
}
