//! 题目切分服务 - 业务能力层
//!
//! 只负责把"一页文本"切成若干道题，不关心来源文档和章节

use crate::config::DEFAULT_QUESTION_PATTERN;
use crate::error::ConfigError;
use regex::Regex;

/// 题目切分器
///
/// 以题号行（如 `12. Evaluate the limit...`）作为每道题的开始：
/// - 第一个题号行之前的内容（页眉等）被丢弃
/// - 遇到新的题号行时结束上一道题
/// - 题目内各行按原样保留，用 `\n` 连接
#[derive(Debug, Clone)]
pub struct QuestionSegmenter {
    question_start: Regex,
}

impl QuestionSegmenter {
    /// 使用默认题号模式创建
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_pattern(DEFAULT_QUESTION_PATTERN)
    }

    /// 使用自定义题号模式创建
    ///
    /// 模式匹配的是去掉首尾空白后的行
    pub fn with_pattern(pattern: &str) -> Result<Self, ConfigError> {
        let question_start = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { question_start })
    }

    pub fn pattern(&self) -> &str {
        self.question_start.as_str()
    }

    /// 是否为题号行
    pub fn is_question_start(&self, line: &str) -> bool {
        self.question_start.is_match(line.trim())
    }

    /// 将一页文本切分为题目块，保持出现顺序
    pub fn segment(&self, page_text: &str) -> Vec<String> {
        let mut blocks = Vec::new();
        let mut current: Option<Vec<&str>> = None;

        for line in page_text.split('\n') {
            if self.is_question_start(line) {
                if let Some(lines) = current.take() {
                    blocks.push(lines.join("\n"));
                }
                current = Some(vec![line]);
            } else if let Some(lines) = current.as_mut() {
                lines.push(line);
            }
        }

        if let Some(lines) = current {
            blocks.push(lines.join("\n"));
        }

        blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segmenter() -> QuestionSegmenter {
        QuestionSegmenter::new().unwrap()
    }

    #[test]
    fn test_two_questions() {
        let text = "1. Find the limit as x approaches 2.\n2. Evaluate the derivative of x^2.";
        let blocks = segmenter().segment(text);
        assert_eq!(
            blocks,
            vec![
                "1. Find the limit as x approaches 2.",
                "2. Evaluate the derivative of x^2."
            ]
        );
    }

    #[test]
    fn test_header_lines_discarded_and_body_kept_verbatim() {
        let text = "AP Calculus Test Bank\nChapter 1\n  3. Let f(x) = x^2.\n   (A) 1\n\n   (B)  2\n4. Next";
        let blocks = segmenter().segment(text);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], "  3. Let f(x) = x^2.\n   (A) 1\n\n   (B)  2");
        assert_eq!(blocks[1], "4. Next");
    }

    #[test]
    fn test_no_question_start_yields_nothing() {
        let s = segmenter();
        assert!(s.segment("").is_empty());
        assert!(s.segment("Page 3\nName: ______\n").is_empty());
        // 句点后没有空白、或者没有句点都不算题号
        assert!(s.segment("1.5 is a number\n12) Evaluate\n3.\n").is_empty());
    }

    #[test]
    fn test_consecutive_headers() {
        let blocks = segmenter().segment("1. First\n2. Second\n3. Third\ntail");
        assert_eq!(blocks, vec!["1. First", "2. Second", "3. Third\ntail"]);
    }

    #[test]
    fn test_block_count_equals_start_lines() {
        let s = segmenter();
        let text = "Header\n7. a\nb\n8.\tc\n\n9. d\n10 . not a start\n11. e";
        let starts = text.split('\n').filter(|l| s.is_question_start(l)).count();
        assert_eq!(starts, 4);
        assert_eq!(s.segment(text).len(), starts);
    }

    #[test]
    fn test_non_ascii_digits_are_not_question_numbers() {
        assert!(segmenter().segment("١. Arabic-Indic one").is_empty());
    }

    #[test]
    fn test_custom_pattern() {
        let s = QuestionSegmenter::with_pattern(r"^Q[0-9]+\s").unwrap();
        assert_eq!(s.segment("intro\nQ1 a\nQ2 b"), vec!["Q1 a", "Q2 b"]);
    }

    #[test]
    fn test_invalid_pattern() {
        let err = QuestionSegmenter::with_pattern("([0-9]+").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }
}
