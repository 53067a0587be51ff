//! 语料索引器：递归读取目录下的 .md / .txt / .json
//!
//! - .md / .txt：整文件作为一个 Document（id = 路径，title = 文件名）
//! - .json：顶层为数组时逐元素成 Document（id 取元素 id 字段，缺省回退路径；
//!   title 取 name 字段，缺省回退文件名；text 为元素的紧凑序列化），
//!   顶层为对象时整文件一个 Document
//! - 其他扩展名忽略；单文件读取 / 解析失败只记日志跳过，绝不中断索引

use std::path::Path;

use serde_json::Value;
use walkdir::WalkDir;

use crate::context::Document;

/// 加载目录为文档列表；目录不存在时返回空列表（不视为错误）
pub fn load_corpus(dir: &Path) -> Vec<Document> {
    let mut docs = Vec::new();

    if !dir.is_dir() {
        tracing::info!(dir = %dir.display(), "context dir missing, corpus is empty");
        return docs;
    }

    // 按文件名排序，保证加载顺序（也即同分文档的排序）跨平台一致
    for entry in WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        let title = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "md" | "txt" => match std::fs::read_to_string(path) {
                Ok(text) => docs.push(Document {
                    id: path.display().to_string(),
                    title,
                    text,
                }),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skip unreadable file");
                }
            },
            "json" => match std::fs::read_to_string(path) {
                Ok(raw) => match serde_json::from_str::<Value>(&raw) {
                    Ok(value) => docs.extend(json_documents(path, &title, value)),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "skip invalid json");
                    }
                },
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skip unreadable file");
                }
            },
            _ => {}
        }
    }

    tracing::info!(count = docs.len(), dir = %dir.display(), "corpus loaded");
    docs
}

/// JSON 文件转文档：数组逐元素，其他顶层值整文件一条
fn json_documents(path: &Path, title: &str, value: Value) -> Vec<Document> {
    let path_str = path.display().to_string();
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| {
                let id = item
                    .get("id")
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| path_str.clone());
                let doc_title = item
                    .get("name")
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| title.to_string());
                Document {
                    id,
                    title: doc_title,
                    text: item.to_string(),
                }
            })
            .collect(),
        other => vec![Document {
            id: path_str,
            title: title.to_string(),
            text: other.to_string(),
        }],
    }
}
