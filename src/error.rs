use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 题库文档相关错误
    #[error("题库错误: {0}")]
    Source(#[from] SourceError),
    /// 章节目录错误
    #[error("章节目录错误: {0}")]
    Catalog(#[from] CatalogError),
    /// 章节选择错误
    #[error("章节选择错误: {0}")]
    Selection(#[from] SelectionError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 结果保存错误
    #[error("结果保存错误: {0}")]
    Report(#[from] ReportError),
}

/// 题库文档错误
///
/// 两种情况都只影响单个文档，流水线会跳过该文档继续处理
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// 文档不存在（允许的部分覆盖状态）
    #[error("文档不存在: {document_id}")]
    Unavailable { document_id: String },
    /// 文档存在但无法读取或解析
    #[error("读取文档失败 ({document_id}): {reason}")]
    ReadFailed { document_id: String, reason: String },
}

/// 章节目录错误
#[derive(Debug, Error)]
pub enum CatalogError {
    /// 章节编号重复
    #[error("章节编号重复: {id}")]
    DuplicateTopic { id: String },
    /// 章节编号为空
    #[error("章节编号不能为空 (名称: {name})")]
    EmptyTopicId { name: String },
    /// 章节没有任何关键词
    #[error("章节 {id} 没有配置关键词")]
    NoKeywords { id: String },
    /// 目录文件中没有任何章节
    #[error("章节目录为空: {path}")]
    Empty { path: String },
    /// 读取目录文件失败
    #[error("读取章节目录文件失败 ({path}): {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("章节目录 TOML 解析失败 ({path}): {source}")]
    TomlParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 章节选择错误（前端输入校验）
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// 范围格式错误，例如 "3-x"
    #[error("无效的章节范围: {input}")]
    InvalidRange { input: String },
    /// 没有任何有效章节
    #[error("没有选择任何有效章节 (输入: {input})")]
    NoValidTopics { input: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 题号匹配正则无效
    #[error("题号匹配模式无效 '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// 结果保存错误
#[derive(Debug, Error)]
pub enum ReportError {
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON 序列化失败
    #[error("JSON 序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_errors_convert_into_app_error() {
        let failed = AppError::from(SourceError::ReadFailed {
            document_id: "TB_1.pdf".to_string(),
            reason: "bad xref".to_string(),
        });
        assert_eq!(failed.to_string(), "题库错误: 读取文档失败 (TB_1.pdf): bad xref");

        let selection: AppResult<()> = Err(SelectionError::NoValidTopics {
            input: "9".to_string(),
        }
        .into());
        assert!(matches!(selection, Err(AppError::Selection(_))));
    }
}
