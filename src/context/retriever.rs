//! 词汇检索：子串计数打分
//!
//! 打分规则刻意保持朴素：query 小写后按空白切词，每个词在文档小写全文中的
//! 子串出现次数（允许重叠、不按词边界，"key" 也会命中 "keyboard"）求和即为分数。
//! 零分文档剔除；按分数降序做稳定排序，同分保持语料加载顺序；取前 k，丢弃分数。

use crate::context::Document;

/// 检索语料：返回至多 k 条文档（按相关度降序，分数不外露）
///
/// 空 query（切词后无词）或空语料返回空结果。
pub fn search(docs: &[Document], query: &str, k: usize) -> Vec<Document> {
    let query = query.to_lowercase();
    let terms: Vec<&str> = query.split_whitespace().filter(|t| !t.is_empty()).collect();
    if terms.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, &Document)> = docs
        .iter()
        .filter_map(|doc| {
            let text = doc.text.to_lowercase();
            let score: usize = terms
                .iter()
                .map(|term| count_occurrences(&text, term))
                .sum();
            (score > 0).then_some((score, doc))
        })
        .collect();

    // sort_by 是稳定排序：同分文档保持加载顺序
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored.into_iter().take(k).map(|(_, d)| d.clone()).collect()
}

/// 允许重叠的子串计数（"aa" 在 "aaaa" 中出现 3 次）
fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    let mut count = 0;
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(needle) {
        count += 1;
        // 仅前进一个字符，允许重叠匹配
        let step = haystack[start + pos..]
            .chars()
            .next()
            .map(|c| c.len_utf8())
            .unwrap_or(1);
        start += pos + step;
        if start >= haystack.len() {
            break;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, text: &str) -> Document {
        Document {
            id: id.to_string(),
            title: id.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_empty_query_yields_empty_result() {
        let docs = vec![doc("a", "anything at all")];
        assert!(search(&docs, "", 5).is_empty());
        assert!(search(&docs, "   \t  ", 5).is_empty());
    }

    #[test]
    fn test_empty_corpus_yields_empty_result() {
        assert!(search(&[], "mug", 5).is_empty());
    }

    #[test]
    fn test_zero_score_documents_are_dropped() {
        let docs = vec![doc("a", "ceramic mug"), doc("b", "desk lamp")];
        let hits = search(&docs, "mug", 5);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a");
    }

    #[test]
    fn test_result_bounded_by_k_and_corpus() {
        let docs = vec![
            doc("a", "mug mug mug"),
            doc("b", "mug mug"),
            doc("c", "mug"),
        ];
        assert_eq!(search(&docs, "mug", 2).len(), 2);
        assert_eq!(search(&docs, "mug", 10).len(), 3);
        assert!(search(&docs, "mug", 0).is_empty());
    }

    #[test]
    fn test_ranked_by_descending_score() {
        let docs = vec![doc("low", "one mug"), doc("high", "mug mug mug")];
        let hits = search(&docs, "mug", 5);
        assert_eq!(hits[0].id, "high");
        assert_eq!(hits[1].id, "low");
    }

    #[test]
    fn test_ties_preserve_load_order() {
        let docs = vec![
            doc("first", "blue mug"),
            doc("second", "blue cup"),
            doc("third", "blue bowl"),
        ];
        let hits = search(&docs, "blue", 5);
        assert_eq!(hits[0].id, "first");
        assert_eq!(hits[1].id, "second");
        assert_eq!(hits[2].id, "third");
    }

    #[test]
    fn test_substring_matches_inside_words() {
        // 刻意的简化：不按词边界，"key" 命中 "keyboard"
        let docs = vec![doc("kb", "mechanical keyboard")];
        assert_eq!(search(&docs, "key", 5).len(), 1);
    }

    #[test]
    fn test_overlapping_occurrences_all_count() {
        assert_eq!(count_occurrences("aaaa", "aa"), 3);
        assert_eq!(count_occurrences("abcabc", "abc"), 2);
        assert_eq!(count_occurrences("abc", "x"), 0);
    }

    #[test]
    fn test_multi_term_scores_sum() {
        let docs = vec![doc("a", "blue mug"), doc("b", "blue blue bowl")];
        // "blue mug"：a 得 2 分，b 得 2 分，同分保持顺序
        let hits = search(&docs, "blue mug", 5);
        assert_eq!(hits[0].id, "a");
        assert_eq!(hits[1].id, "b");
    }

    #[test]
    fn test_query_is_lowercased() {
        let docs = vec![doc("a", "Nimbus Keyboard")];
        assert_eq!(search(&docs, "KEYBOARD", 5).len(), 1);
    }
}
