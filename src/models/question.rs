use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// 从题库中提取出的一道题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// 来源文档
    pub source_id: String,
    /// 页码（从 1 开始）
    pub page_number: u32,
    /// 原始题目文本（多行）
    pub text: String,
    /// 命中的章节编号，可能为空
    pub topics: BTreeSet<String>,
}

impl QuestionRecord {
    pub fn new(
        source_id: impl Into<String>,
        page_number: u32,
        text: impl Into<String>,
        topics: BTreeSet<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            page_number,
            text: text.into(),
            topics,
        }
    }

    /// 是否命中任一指定章节
    pub fn matches_any(&self, wanted: &HashSet<String>) -> bool {
        self.topics.iter().any(|t| wanted.contains(t))
    }

    /// 按编号数值排序的章节，用于显示
    pub fn sorted_topics(&self) -> Vec<&str> {
        let mut topics: Vec<&str> = self.topics.iter().map(String::as_str).collect();
        topics.sort_by_key(|t| (t.parse::<u32>().unwrap_or(u32::MAX), *t));
        topics
    }
}
