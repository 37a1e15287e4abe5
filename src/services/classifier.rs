//! 章节识别服务 - 业务能力层

use crate::models::TopicCatalog;
use std::collections::BTreeSet;
use std::sync::Arc;

/// 章节识别器
///
/// 关键词子串匹配：题目文本（转小写）中出现某章节任一关键词即归入该章节。
/// 不打分，不消歧，一道题可以属于多个章节，也可以不属于任何章节。
#[derive(Debug, Clone)]
pub struct TopicClassifier {
    catalog: Arc<TopicCatalog>,
}

impl TopicClassifier {
    pub fn new(catalog: Arc<TopicCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &TopicCatalog {
        &self.catalog
    }

    pub fn classify(&self, block_text: &str) -> BTreeSet<String> {
        classify(block_text, &self.catalog)
    }
}

/// 识别题目所属章节
pub fn classify(block_text: &str, catalog: &TopicCatalog) -> BTreeSet<String> {
    let text_lower = block_text.to_lowercase();

    catalog
        .entries()
        .iter()
        .filter(|entry| entry.keywords.iter().any(|k| text_lower.contains(k.as_str())))
        .map(|entry| entry.id.clone())
        .collect()
}
