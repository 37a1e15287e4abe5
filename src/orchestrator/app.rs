//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 把配置、章节目录、提取流水线和结果输出串起来，是唯一的前端。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：加载章节目录、编译题号模式、创建流水线
//! 2. **章节选择**：解析 `SELECTED_TOPICS`，忽略课程中不存在的章节
//! 3. **提取与筛选**：并发提取所有题库，按章节过滤并截取
//! 4. **结果输出**：控制台预览，可选保存到文件

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::PdfDirectory;
use crate::models::{load_catalog_from_toml, QuestionRecord, TopicCatalog};
use crate::orchestrator::ExtractionPipeline;
use crate::services::{
    cap_from_count, parse_topic_selection, render_results, select, QuestionSegmenter, ReportWriter,
    TopicSelection,
};
use crate::utils::logging::{log_extraction_stats, log_selection, log_startup, print_final_stats};
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    pipeline: ExtractionPipeline,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let catalog = load_catalog(&config).await.context("无法加载章节目录")?;
        info!("📖 章节目录: {} 个章节", catalog.len());

        let segmenter = compile_segmenter(&config).context("无法编译题号模式")?;
        debug!("题号模式: {}", segmenter.pattern());

        let provider = PdfDirectory::new(&config.pdf_dir);
        let available = provider.available(&config.test_banks);
        if available.len() < config.test_banks.len() {
            warn!(
                "⚠️ 只找到 {}/{} 个题库文件: {}",
                available.len(),
                config.test_banks.len(),
                available.join(", ")
            );
        }

        let pipeline = ExtractionPipeline::new(Arc::new(provider), Arc::new(catalog), segmenter);

        Ok(Self { config, pipeline })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        let selection = self.parse_selection()?;
        log_selection(&selection, self.pipeline.catalog());

        info!("\n🔍 正在扫描题库: {}", self.config.test_banks.join(", "));
        let report = self
            .pipeline
            .extract_all_concurrent(&self.config.test_banks, self.config.max_concurrent_documents)
            .await?;
        log_extraction_stats(&report);

        let wanted = selection.wanted();
        let matching = select(&report.records, &wanted, None).len();
        let selected = select(&report.records, &wanted, cap_from_count(self.config.max_questions));

        println!("{}", render_results(&selected, self.config.preview_chars));

        let saved_to = match &self.config.output_file {
            Some(path) if !selected.is_empty() => {
                save_report(path, &selected)
                    .await
                    .with_context(|| format!("无法保存结果: {}", path))?;
                Some(path.as_str())
            }
            Some(_) => {
                warn!("⚠️ 没有可保存的题目");
                None
            }
            None => None,
        };

        print_final_stats(matching, selected.len(), saved_to);

        Ok(())
    }

    /// 解析章节选择
    fn parse_selection(&self) -> AppResult<TopicSelection> {
        let selection = parse_topic_selection(
            &self.config.selected_topics,
            self.pipeline.catalog(),
            self.config.course,
        )?;
        Ok(selection)
    }
}

/// 加载章节目录：配置了 TOML 文件时使用文件，否则使用内置目录
async fn load_catalog(config: &Config) -> AppResult<TopicCatalog> {
    let catalog = match &config.catalog_file {
        Some(path) => load_catalog_from_toml(Path::new(path)).await?,
        None => TopicCatalog::ap_calculus(),
    };
    Ok(catalog)
}

fn compile_segmenter(config: &Config) -> AppResult<QuestionSegmenter> {
    Ok(QuestionSegmenter::with_pattern(&config.question_pattern)?)
}

async fn save_report(path: &str, questions: &[&QuestionRecord]) -> AppResult<usize> {
    Ok(ReportWriter::with_path(path).write(questions).await?)
}
