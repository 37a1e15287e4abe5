//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量提取和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `extraction_pipeline` - 题库提取流水线
//! - 按顺序遍历所有题库文档（Vec<文档编号>）
//! - 控制并发数量（Semaphore + spawn_blocking）
//! - 汇总每个文档的状态与题目
//!
//! ### `app` - 应用入口
//! - 管理应用生命周期（初始化、运行）
//! - 章节选择、筛选、结果输出
//!
//! ## 层次关系
//!
//! ```text
//! app (配置 / 选择 / 输出)
//!     ↓
//! extraction_pipeline (处理 Vec<文档>)
//!     ↓
//! workflow::DocumentFlow (处理单个文档)
//!     ↓
//! services (能力层：segment / classify / select / report)
//!     ↓
//! infrastructure (基础设施：PageTextProvider)
//! ```

pub mod app;
pub mod extraction_pipeline;

// 重新导出主要类型
pub use app::App;
pub use extraction_pipeline::{DocumentSummary, ExtractionPipeline, ExtractionReport};
