//! 日志工具模块
//!
//! 提供日志格式化和输出的辅助函数

use crate::config::Config;
use crate::models::TopicCatalog;
use crate::orchestrator::{DocumentSummary, ExtractionReport};
use crate::services::TopicSelection;
use crate::workflow::DocumentStatus;
use tracing::{info, warn};

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - {} 题目筛选", config.course);
    info!("📁 题库目录: {}", config.pdf_dir);
    info!("📚 题库文件: {}", config.test_banks.join(", "));
    info!("📊 最大并发数: {}", config.max_concurrent_documents);
    info!("{}", "=".repeat(60));
}

/// 记录已选择的章节
///
/// # 参数
/// - `selection`: 解析后的章节选择
/// - `catalog`: 章节目录（用于显示名称）
pub fn log_selection(selection: &TopicSelection, catalog: &TopicCatalog) {
    for ignored in &selection.ignored {
        warn!("⚠️ 章节 {} 无效，已忽略", ignored);
    }
    info!("✓ 已选择章节: {}", selection.topics.join(", "));
    for id in &selection.topics {
        if let Some(entry) = catalog.get(id) {
            info!("  Chapter {}: {}", id, entry.display_name);
        }
    }
}

/// 记录单个文档的提取结果
pub fn log_document_result(summary: &DocumentSummary) {
    match &summary.status {
        DocumentStatus::Extracted { pages } => info!(
            "  ✓ {}: {} 页, {} 道题",
            summary.document_id, pages, summary.question_count
        ),
        DocumentStatus::Unavailable => warn!("  ⚠️ {}: 文件不存在，已跳过", summary.document_id),
        DocumentStatus::Failed { reason } => {
            warn!("  ❌ {}: 读取失败，已跳过 ({})", summary.document_id, reason)
        }
    }
}

/// 打印提取统计信息
///
/// # 参数
/// - `report`: 提取结果
pub fn log_extraction_stats(report: &ExtractionReport) {
    info!("\n{}", "─".repeat(60));
    info!("📄 题库统计");
    for summary in &report.documents {
        log_document_result(summary);
    }
    info!("共提取 {} 道题", report.records.len());

    let distribution = report.topic_distribution();
    if !distribution.is_empty() {
        info!("章节分布:");
        for (topic, count) in distribution {
            info!("  Chapter {}: {} 道", topic, count);
        }
    }
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `matching`: 命中所选章节的题目数
/// - `returned`: 截取后返回的题目数
/// - `output_file`: 结果文件路径（若已保存）
pub fn print_final_stats(matching: usize, returned: usize, output_file: Option<&str>) {
    info!("\n{}", "=".repeat(60));
    info!("📊 筛选完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 命中所选章节: {}", matching);
    info!("📋 返回题目: {}", returned);
    info!("{}", "=".repeat(60));
    if let Some(path) = output_file {
        info!("\n结果已保存至: {}", path);
    }
}

/// 截断长文本用于显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("exactly", 7), "exactly");
        assert_eq!(truncate_text("∫ f(x) dx from a to b", 6), "∫ f(x)...");
    }
}
