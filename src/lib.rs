//! # Question Selector
//!
//! 从 AP Calculus PDF 题库中提取题目，按关键词识别章节，并按章节筛选
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有文档资源，只暴露能力
//! - `PageTextProvider` - 按文档编号取出每页文本（`PdfDirectory` / `MemoryPages`）
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单页 / 单题
//! - `QuestionSegmenter` - 按题号行切分题目
//! - `TopicClassifier` - 关键词识别章节
//! - `select` - 按章节筛选并截取
//! - `ReportWriter` - 保存结果
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一份题库"的完整处理流程
//! - `PageCtx` - 上下文封装（文档 + 页码）
//! - `DocumentFlow` - 流程编排（取页 → 切分 → 识别）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/extraction_pipeline` - 多文档提取，管理并发
//! - `orchestrator/app` - 应用入口，章节选择与结果输出
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{MemoryPages, PageTextProvider, PdfDirectory};
pub use models::{Course, QuestionRecord, TopicCatalog, TopicEntry};
pub use orchestrator::{App, ExtractionPipeline, ExtractionReport};
pub use services::{cap_from_count, classify, select, QuestionSegmenter, TopicClassifier};
pub use workflow::{DocumentExtraction, DocumentStatus};
