use crate::error::CatalogError;
use crate::models::topic::{Course, TopicCatalog, TopicEntry};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// TOML 中的章节目录文件
///
/// ```toml
/// [[topics]]
/// id = "1"
/// name = "Limits and Continuity"
/// course = "AB"
/// keywords = ["limit", "continuity"]
/// ```
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    topics: Vec<TopicRow>,
}

#[derive(Debug, Deserialize)]
struct TopicRow {
    id: String,
    name: String,
    #[serde(default = "default_course")]
    course: Course,
    keywords: Vec<String>,
}

fn default_course() -> Course {
    Course::Ab
}

/// 解析 TOML 文本为章节目录
///
/// # 参数
/// - `content`: TOML 文本
/// - `path`: 来源路径（仅用于错误信息）
pub fn parse_catalog_toml(content: &str, path: &str) -> Result<TopicCatalog, CatalogError> {
    let file: CatalogFile = toml::from_str(content).map_err(|source| CatalogError::TomlParse {
        path: path.to_string(),
        source,
    })?;

    let entries = file
        .topics
        .into_iter()
        .map(|row| TopicEntry::new(row.id.trim(), row.name, row.course, row.keywords))
        .collect();

    let catalog = TopicCatalog::new(entries)?;
    if catalog.is_empty() {
        return Err(CatalogError::Empty {
            path: path.to_string(),
        });
    }

    Ok(catalog)
}

/// 从 TOML 文件加载章节目录
pub async fn load_catalog_from_toml(toml_file_path: &Path) -> Result<TopicCatalog, CatalogError> {
    let path_display = toml_file_path.display().to_string();
    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|source| CatalogError::FileRead {
            path: path_display.clone(),
            source,
        })?;

    let catalog = parse_catalog_toml(&content, &path_display)?;
    tracing::info!("成功加载 {} 个章节: {}", catalog.len(), path_display);

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[topics]]
id = "1"
name = "Limits and Continuity"
keywords = ["Limit", "continuity"]

[[topics]]
id = "10"
name = "Infinite Sequences and Series"
course = "BC"
keywords = ["series"]
"#;

    #[test]
    fn test_parse_catalog_toml() {
        let catalog = parse_catalog_toml(SAMPLE, "sample.toml").unwrap();
        assert_eq!(catalog.len(), 2);

        let limits = catalog.get("1").unwrap();
        assert_eq!(limits.course, Course::Ab);
        assert_eq!(limits.keywords, vec!["limit", "continuity"]);

        assert_eq!(catalog.get("10").unwrap().course, Course::Bc);
    }

    #[test]
    fn test_parse_catalog_toml_duplicate_id() {
        let content = r#"
[[topics]]
id = "1"
name = "A"
keywords = ["a"]

[[topics]]
id = "1"
name = "B"
keywords = ["b"]
"#;
        assert!(matches!(
            parse_catalog_toml(content, "dup.toml"),
            Err(CatalogError::DuplicateTopic { .. })
        ));
    }

    #[test]
    fn test_parse_catalog_toml_invalid() {
        assert!(matches!(
            parse_catalog_toml("[[topics]]\nid = 1", "bad.toml"),
            Err(CatalogError::TomlParse { .. })
        ));
    }

    #[test]
    fn test_parse_catalog_toml_empty() {
        for content in ["", "topics = []"] {
            assert!(matches!(
                parse_catalog_toml(content, "empty.toml"),
                Err(CatalogError::Empty { .. })
            ));
        }
    }

    #[tokio::test]
    async fn test_load_catalog_missing_file() {
        let result = load_catalog_from_toml(Path::new("does/not/exist.toml")).await;
        assert!(matches!(result, Err(CatalogError::FileRead { .. })));
    }

    #[tokio::test]
    async fn test_load_bundled_catalog_matches_builtin() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/ap_calculus.toml");
        let catalog = load_catalog_from_toml(&path).await.unwrap();
        assert_eq!(catalog, TopicCatalog::ap_calculus());
    }
}
