use crate::models::Course;

/// 默认的题号匹配模式：数字 + 句点 + 至少一个空白
pub const DEFAULT_QUESTION_PATTERN: &str = r"^[0-9]+\.\s";

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// PDF 题库所在目录
    pub pdf_dir: String,
    /// 需要扫描的题库文件（按顺序）
    pub test_banks: Vec<String>,
    /// 课程（AB / BC）
    pub course: Course,
    /// 章节选择，例如 "1,2,5-7"；为空表示课程的全部章节
    pub selected_topics: String,
    /// 题目数量上限（0 表示全部）
    pub max_questions: i64,
    /// 结果输出文件（不设置则不保存）
    pub output_file: Option<String>,
    /// 自定义章节目录 TOML 文件
    pub catalog_file: Option<String>,
    /// 题号行匹配模式
    pub question_pattern: String,
    /// 同时解析的文档数量
    pub max_concurrent_documents: usize,
    /// 控制台预览的最大字符数
    pub preview_chars: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pdf_dir: ".".to_string(),
            // TB_2.pdf 不在仓库中
            test_banks: [1, 3, 4, 5, 6, 7]
                .iter()
                .map(|i| format!("TB_{}.pdf", i))
                .collect(),
            course: Course::Ab,
            selected_topics: String::new(),
            max_questions: 10,
            output_file: None,
            catalog_file: None,
            question_pattern: DEFAULT_QUESTION_PATTERN.to_string(),
            max_concurrent_documents: 4,
            preview_chars: 800,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            pdf_dir: std::env::var("PDF_DIR").unwrap_or(default.pdf_dir),
            test_banks: std::env::var("TEST_BANKS").ok().map(|v| split_list(&v)).filter(|v| !v.is_empty()).unwrap_or(default.test_banks),
            course: std::env::var("COURSE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.course),
            selected_topics: std::env::var("SELECTED_TOPICS").unwrap_or(default.selected_topics),
            max_questions: std::env::var("MAX_QUESTIONS").ok().and_then(|v| v.trim().parse().ok()).unwrap_or(default.max_questions),
            output_file: std::env::var("OUTPUT_FILE").ok().filter(|v| !v.trim().is_empty()),
            catalog_file: std::env::var("CATALOG_FILE").ok().filter(|v| !v.trim().is_empty()),
            question_pattern: std::env::var("QUESTION_PATTERN").unwrap_or(default.question_pattern),
            max_concurrent_documents: std::env::var("MAX_CONCURRENT_DOCUMENTS").ok().and_then(|v| v.parse().ok()).filter(|n| *n > 0).unwrap_or(default.max_concurrent_documents),
            preview_chars: std::env::var("PREVIEW_CHARS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.preview_chars),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}

/// 拆分逗号分隔的列表，忽略空项
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_test_banks_skip_tb2() {
        let config = Config::default();
        assert_eq!(
            config.test_banks,
            vec!["TB_1.pdf", "TB_3.pdf", "TB_4.pdf", "TB_5.pdf", "TB_6.pdf", "TB_7.pdf"]
        );
        assert_eq!(config.course, Course::Ab);
        assert_eq!(config.max_questions, 10);
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(" TB_1.pdf, ,TB_9.pdf "), vec!["TB_1.pdf", "TB_9.pdf"]);
        assert!(split_list(" , ").is_empty());
    }
}
