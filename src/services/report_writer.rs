//! 结果输出服务 - 业务能力层
//!
//! 只负责把"已选出的题目"写成文本或 JSON，不关心题目从哪里来

use crate::error::ReportError;
use crate::models::QuestionRecord;
use crate::utils::logging::truncate_text;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

const RULE_WIDTH: usize = 80;

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    /// 按扩展名判断，`.json` 为 JSON，其余为文本
    pub fn from_path(path: &str) -> Self {
        match Path::new(path).extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ReportFormat::Json,
            _ => ReportFormat::Text,
        }
    }
}

/// 结果写入服务
pub struct ReportWriter {
    report_file_path: String,
    format: ReportFormat,
}

impl ReportWriter {
    /// 默认写入 selected_questions.txt
    pub fn new() -> Self {
        Self::with_path("selected_questions.txt")
    }

    /// 使用自定义文件路径创建，格式由扩展名决定
    pub fn with_path(path: impl Into<String>) -> Self {
        let report_file_path = path.into();
        let format = ReportFormat::from_path(&report_file_path);
        Self {
            report_file_path,
            format,
        }
    }

    pub fn path(&self) -> &str {
        &self.report_file_path
    }

    pub fn format(&self) -> ReportFormat {
        self.format
    }

    /// 写入结果（覆盖已有文件）
    ///
    /// # 返回
    /// 写入的题目数量
    pub async fn write(&self, questions: &[&QuestionRecord]) -> Result<usize, ReportError> {
        debug!(
            "写入结果: {} 道题 -> {} ({:?})",
            questions.len(),
            self.report_file_path,
            self.format
        );

        let content = match self.format {
            ReportFormat::Text => render_text_report(questions, &timestamp()),
            ReportFormat::Json => render_json_report(questions, &timestamp())?,
        };

        tokio::fs::write(&self.report_file_path, content)
            .await
            .map_err(|source| ReportError::WriteFailed {
                path: self.report_file_path.clone(),
                source,
            })?;

        Ok(questions.len())
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// "Chapter 2, Chapter 10" 形式的章节列表
pub fn format_topics(question: &QuestionRecord) -> String {
    question
        .sorted_topics()
        .iter()
        .map(|t| format!("Chapter {}", t))
        .collect::<Vec<_>>()
        .join(", ")
}

/// 文本格式的完整报告
pub fn render_text_report(questions: &[&QuestionRecord], generated_at: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();
    out.push_str(&format!(
        "{}\nAP CALCULUS SELECTED QUESTIONS\nGenerated: {}\n{}\n\n",
        rule, generated_at, rule
    ));

    for (i, question) in questions.iter().enumerate() {
        out.push_str(&format!("\nQuestion {}:\n", i + 1));
        out.push_str(&format!("Source: {}, Page {}\n", question.source_id, question.page_number));
        out.push_str(&format!("Topics: {}\n", format_topics(question)));
        out.push_str(&"-".repeat(RULE_WIDTH));
        out.push('\n');
        out.push_str(&question.text);
        out.push('\n');
        out.push_str(&rule);
        out.push('\n');
    }

    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: &'a str,
    total: usize,
    questions: &'a [&'a QuestionRecord],
}

/// JSON 格式的完整报告
pub fn render_json_report(
    questions: &[&QuestionRecord],
    generated_at: &str,
) -> Result<String, ReportError> {
    let report = JsonReport {
        generated_at,
        total: questions.len(),
        questions,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// 控制台显示的结果，题目文本截断到 `preview_chars` 个字符
pub fn render_results(questions: &[&QuestionRecord], preview_chars: usize) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = format!("\n{}\nSEARCH RESULTS\n{}\n", rule, rule);

    if questions.is_empty() {
        out.push_str("\nNo questions found matching the selected criteria.\n");
        return out;
    }

    out.push_str(&format!("\nFound {} matching questions:\n", questions.len()));
    for (i, question) in questions.iter().enumerate() {
        out.push_str(&format!("\n{}\n", rule));
        out.push_str(&format!("Question {}:\n", i + 1));
        out.push_str(&format!("Source: {}, Page {}\n", question.source_id, question.page_number));
        out.push_str(&format!("Topics: {}\n", format_topics(question)));
        out.push_str(&"-".repeat(RULE_WIDTH));
        out.push('\n');
        out.push_str(&truncate_text(&question.text, preview_chars));
        out.push('\n');
    }
    out.push_str(&format!("\n{}\n", rule));

    out
}
