//! 题库提取流水线 - 编排层
//!
//! ## 职责
//!
//! 按配置顺序扫描所有题库文档，汇总为一个有序的题目列表。
//!
//! ## 核心功能
//!
//! 1. **顺序提取**：`extract_all` 逐个文档处理，是输出顺序的基准
//! 2. **并发提取**：`extract_all_concurrent` 用 Semaphore 限制同时解析的文档数，
//!    结果按输入顺序拼接，与顺序提取完全一致
//! 3. **容错**：单个文档不存在或读取失败只影响该文档，状态记录在报告中
//! 4. **统计**：每个文档的题目数、章节分布

use crate::infrastructure::PageTextProvider;
use crate::models::{QuestionRecord, TopicCatalog};
use crate::services::{QuestionSegmenter, TopicClassifier};
use crate::workflow::{DocumentExtraction, DocumentFlow, DocumentStatus};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info};

/// 单个文档的处理摘要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub document_id: String,
    pub status: DocumentStatus,
    pub question_count: usize,
}

/// 提取结果
///
/// `records` 按 文档顺序 → 页序 → 页内顺序 排列；
/// `documents` 与请求的文档一一对应
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    pub records: Vec<QuestionRecord>,
    pub documents: Vec<DocumentSummary>,
}

impl ExtractionReport {
    fn push(&mut self, extraction: DocumentExtraction) {
        self.documents.push(DocumentSummary {
            document_id: extraction.document_id,
            status: extraction.status,
            question_count: extraction.records.len(),
        });
        self.records.extend(extraction.records);
    }

    /// 读取失败的文档（不含不存在的文档）
    pub fn failures(&self) -> Vec<&DocumentSummary> {
        self.documents
            .iter()
            .filter(|d| matches!(d.status, DocumentStatus::Failed { .. }))
            .collect()
    }

    /// 每个文档的题目数量
    pub fn question_counts(&self) -> Vec<(&str, usize)> {
        self.documents
            .iter()
            .map(|d| (d.document_id.as_str(), d.question_count))
            .collect()
    }

    /// 各章节命中的题目数量，按编号数值排序
    pub fn topic_distribution(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for topic in self.records.iter().flat_map(|r| r.topics.iter()) {
            *counts.entry(topic.as_str()).or_default() += 1;
        }

        let mut distribution: Vec<(String, usize)> =
            counts.into_iter().map(|(t, c)| (t.to_string(), c)).collect();
        distribution.sort_by(|a, b| {
            let key = |t: &str| (t.parse::<u32>().unwrap_or(u32::MAX), t.to_string());
            key(&a.0).cmp(&key(&b.0))
        });
        distribution
    }
}

/// 题库提取流水线
///
/// 持有页面提供者和只读的章节目录，可廉价 clone 到工作线程
#[derive(Clone)]
pub struct ExtractionPipeline {
    provider: Arc<dyn PageTextProvider>,
    flow: DocumentFlow,
}

impl ExtractionPipeline {
    pub fn new(
        provider: Arc<dyn PageTextProvider>,
        catalog: Arc<TopicCatalog>,
        segmenter: QuestionSegmenter,
    ) -> Self {
        Self {
            provider,
            flow: DocumentFlow::new(segmenter, TopicClassifier::new(catalog)),
        }
    }

    pub fn catalog(&self) -> &TopicCatalog {
        self.flow.classifier().catalog()
    }

    /// 提取单个文档
    pub fn extract_document(&self, document_id: &str) -> DocumentExtraction {
        self.flow.run(self.provider.as_ref(), document_id)
    }

    /// 顺序提取所有文档
    pub fn extract_all(&self, document_ids: &[String]) -> ExtractionReport {
        let mut report = ExtractionReport::default();
        for document_id in document_ids {
            info!("  正在读取 {}...", document_id);
            report.push(self.extract_document(document_id));
        }
        report
    }

    /// 并发提取所有文档
    ///
    /// # 参数
    /// - `document_ids`: 文档列表（决定输出顺序）
    /// - `max_concurrent`: 同时解析的文档数量上限
    pub async fn extract_all_concurrent(
        &self,
        document_ids: &[String],
        max_concurrent: usize,
    ) -> Result<ExtractionReport> {
        let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));
        let mut handles = Vec::with_capacity(document_ids.len());

        for document_id in document_ids {
            let permit = semaphore.clone().acquire_owned().await?;
            let pipeline = self.clone();
            let id = document_id.clone();

            info!("  正在读取 {}...", document_id);
            // PDF 解析是阻塞操作
            let handle = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                pipeline.extract_document(&id)
            });
            handles.push((document_id.clone(), handle));
        }

        let mut report = ExtractionReport::default();
        for (document_id, handle) in handles {
            match handle.await {
                Ok(extraction) => report.push(extraction),
                Err(e) => {
                    error!("[{}] 任务执行失败: {}", document_id, e);
                    report.push(DocumentExtraction {
                        document_id,
                        status: DocumentStatus::Failed {
                            reason: e.to_string(),
                        },
                        records: Vec::new(),
                    });
                }
            }
        }

        Ok(report)
    }
}
