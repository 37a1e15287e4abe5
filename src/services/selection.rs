//! 题目筛选服务 - 业务能力层
//!
//! - `select`: 按章节过滤题目并截取前 N 道
//! - `parse_topic_selection`: 解析前端输入的章节选择（如 `1,2,5-7`）

use crate::error::SelectionError;
use crate::models::{Course, QuestionRecord, TopicCatalog};
use std::collections::HashSet;
use std::num::NonZeroUsize;

/// 将用户输入的题目数量转换为上限
///
/// 0 或负数表示不限制
pub fn cap_from_count(count: i64) -> Option<NonZeroUsize> {
    usize::try_from(count).ok().and_then(NonZeroUsize::new)
}

/// 选出命中任一指定章节的题目
///
/// 保持原有顺序；`limit` 为 `None` 时返回全部。`wanted` 为空时结果为空。
pub fn select<'a>(
    records: &'a [QuestionRecord],
    wanted: &HashSet<String>,
    limit: Option<NonZeroUsize>,
) -> Vec<&'a QuestionRecord> {
    let matching = records.iter().filter(|r| r.matches_any(wanted));
    match limit {
        Some(cap) => matching.take(cap.get()).collect(),
        None => matching.collect(),
    }
}

/// 章节选择结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSelection {
    /// 有效章节（按输入顺序去重）
    pub topics: Vec<String>,
    /// 被忽略的输入项
    pub ignored: Vec<String>,
}

impl TopicSelection {
    pub fn wanted(&self) -> HashSet<String> {
        self.topics.iter().cloned().collect()
    }
}

/// 解析章节选择
///
/// # 参数
/// - `input`: 逗号分隔的章节编号或范围，例如 `1,3,5-7`；为空表示课程的全部章节
/// - `catalog`: 章节目录
/// - `course`: 课程，决定哪些章节可选
///
/// # 返回
/// 课程中不存在的章节放入 `ignored`；没有任何有效章节时返回错误
pub fn parse_topic_selection(
    input: &str,
    catalog: &TopicCatalog,
    course: Course,
) -> Result<TopicSelection, SelectionError> {
    let chapters = catalog.chapters_for(course);

    if input.trim().is_empty() {
        return Ok(TopicSelection {
            topics: chapters.iter().map(|c| c.id.clone()).collect(),
            ignored: Vec::new(),
        });
    }

    let mut topics: Vec<String> = Vec::new();
    let mut ignored: Vec<String> = Vec::new();

    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if let Some((start, end)) = part.split_once('-') {
            let (start, end) = match (start.trim().parse::<u32>(), end.trim().parse::<u32>()) {
                (Ok(s), Ok(e)) => (s, e),
                _ => {
                    return Err(SelectionError::InvalidRange {
                        input: part.to_string(),
                    })
                }
            };

            let in_range: Vec<&str> = chapters
                .iter()
                .filter(|c| c.id.parse::<u32>().is_ok_and(|n| (start..=end).contains(&n)))
                .map(|c| c.id.as_str())
                .collect();

            if in_range.is_empty() {
                ignored.push(part.to_string());
            }
            for id in in_range {
                if !topics.iter().any(|t| t == id) {
                    topics.push(id.to_string());
                }
            }
        } else if chapters.iter().any(|c| c.id == part) {
            if !topics.iter().any(|t| t == part) {
                topics.push(part.to_string());
            }
        } else {
            ignored.push(part.to_string());
        }
    }

    if topics.is_empty() {
        return Err(SelectionError::NoValidTopics {
            input: input.to_string(),
        });
    }

    Ok(TopicSelection { topics, ignored })
}
