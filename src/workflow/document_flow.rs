//! 文档处理流程 - 流程层
//!
//! 核心职责：定义"一份题库"的完整处理流程
//!
//! 流程顺序：
//! 1. 取出每页文本（不存在 / 读取失败 → 跳过该文档）
//! 2. 逐页切分题目
//! 3. 逐题识别章节，生成 `QuestionRecord`

use tracing::{debug, warn};

use crate::error::SourceError;
use crate::infrastructure::PageTextProvider;
use crate::models::QuestionRecord;
use crate::services::{QuestionSegmenter, TopicClassifier};
use crate::workflow::page_ctx::PageCtx;

/// 文档处理状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentStatus {
    /// 处理成功
    Extracted { pages: usize },
    /// 文档不存在（允许，不算错误）
    Unavailable,
    /// 文档存在但无法读取
    Failed { reason: String },
}

/// 单个文档的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentExtraction {
    pub document_id: String,
    pub status: DocumentStatus,
    /// 失败时为空，不保留部分结果
    pub records: Vec<QuestionRecord>,
}

/// 文档处理流程
///
/// - 不持有文档资源，由调用方传入 provider
/// - 只依赖业务能力（切分 / 章节识别）
#[derive(Debug, Clone)]
pub struct DocumentFlow {
    segmenter: QuestionSegmenter,
    classifier: TopicClassifier,
}

impl DocumentFlow {
    pub fn new(segmenter: QuestionSegmenter, classifier: TopicClassifier) -> Self {
        Self {
            segmenter,
            classifier,
        }
    }

    pub fn classifier(&self) -> &TopicClassifier {
        &self.classifier
    }

    pub fn run(&self, provider: &dyn PageTextProvider, document_id: &str) -> DocumentExtraction {
        match provider.pages(document_id) {
            Ok(pages) => {
                let records = self.records_from_pages(document_id, &pages);
                DocumentExtraction {
                    document_id: document_id.to_string(),
                    status: DocumentStatus::Extracted { pages: pages.len() },
                    records,
                }
            }
            Err(SourceError::Unavailable { .. }) => {
                debug!("{} 不存在，跳过", document_id);
                DocumentExtraction {
                    document_id: document_id.to_string(),
                    status: DocumentStatus::Unavailable,
                    records: Vec::new(),
                }
            }
            Err(SourceError::ReadFailed { reason, .. }) => {
                warn!("读取 {} 失败: {}", document_id, reason);
                DocumentExtraction {
                    document_id: document_id.to_string(),
                    status: DocumentStatus::Failed { reason },
                    records: Vec::new(),
                }
            }
        }
    }

    /// 按页序、页内顺序生成题目记录
    pub fn records_from_pages(&self, document_id: &str, pages: &[String]) -> Vec<QuestionRecord> {
        let mut records = Vec::new();

        for (index, page_text) in pages.iter().enumerate() {
            let ctx = PageCtx::new(document_id, index as u32 + 1);

            let blocks = self.segmenter.segment(page_text);
            debug!("{} 切分出 {} 道题", ctx, blocks.len());

            for block in blocks {
                let topics = self.classifier.classify(&block);
                records.push(QuestionRecord::new(ctx.document_id, ctx.page_number, block, topics));
            }
        }

        records
    }
}
