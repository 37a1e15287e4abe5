//! 章节目录
//!
//! 章节编号 → 名称 / 所属课程 / 关键词 的静态映射，启动时构建一次后只读共享

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// 课程枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Course {
    /// AP Calculus AB（第 1-8 章）
    Ab,
    /// AP Calculus BC（AB 全部章节 + 第 9-10 章）
    Bc,
}

impl Course {
    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Course::Ab => "AB",
            Course::Bc => "BC",
        }
    }
}

impl FromStr for Course {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AB" | "1" => Ok(Course::Ab),
            "BC" | "2" => Ok(Course::Bc),
            other => Err(format!("未知课程: {}", other)),
        }
    }
}

impl std::fmt::Display for Course {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AP Calculus {}", self.name())
    }
}

/// 单个章节
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicEntry {
    pub id: String,
    pub display_name: String,
    /// 章节最早出现的课程；AB 章节同样属于 BC
    pub course: Course,
    /// 小写关键词（空白项在构建时丢弃）
    pub keywords: Vec<String>,
}

impl TopicEntry {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        course: Course,
        keywords: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            course,
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// 该章节是否属于指定课程
    pub fn offered_in(&self, course: Course) -> bool {
        match course {
            Course::Ab => self.course == Course::Ab,
            Course::Bc => true,
        }
    }

    /// 数字排序键，非数字编号排在最后
    fn sort_key(&self) -> (u32, &str) {
        (self.id.parse().unwrap_or(u32::MAX), self.id.as_str())
    }
}

/// AP Calculus 章节表（依据 College Board 课程框架）
const AP_CALCULUS_TOPICS: &[(&str, &str, Course, &[&str])] = &[
    (
        "1",
        "Limits and Continuity",
        Course::Ab,
        &["limit", "continuity", "asymptote", "discontinuity", "intermediate value"],
    ),
    (
        "2",
        "Differentiation: Definition and Fundamental Properties",
        Course::Ab,
        &["derivative", "rate of change", "tangent line", "differentiable", "power rule"],
    ),
    (
        "3",
        "Differentiation: Composite, Implicit, and Inverse Functions",
        Course::Ab,
        &["chain rule", "implicit differentiation", "inverse function", "composite"],
    ),
    (
        "4",
        "Contextual Applications of Differentiation",
        Course::Ab,
        &["related rates", "motion", "velocity", "acceleration", "optimization"],
    ),
    (
        "5",
        "Analytical Applications of Differentiation",
        Course::Ab,
        &[
            "mean value theorem",
            "critical point",
            "extrema",
            "increasing",
            "decreasing",
            "concavity",
            "inflection",
        ],
    ),
    (
        "6",
        "Integration and Accumulation of Change",
        Course::Ab,
        &["integral", "antiderivative", "riemann sum", "accumulation", "fundamental theorem"],
    ),
    (
        "7",
        "Differential Equations",
        Course::Ab,
        &["differential equation", "slope field", "exponential growth", "separation of variables"],
    ),
    (
        "8",
        "Applications of Integration",
        Course::Ab,
        &["area", "volume", "disk", "washer", "average value"],
    ),
    (
        "9",
        "Parametric Equations, Polar Coordinates, and Vector-Valued Functions",
        Course::Bc,
        &["parametric", "polar", "vector"],
    ),
    (
        "10",
        "Infinite Sequences and Series",
        Course::Bc,
        &["series", "sequence", "convergence", "divergence", "taylor", "maclaurin"],
    ),
];

/// 章节目录（不可变）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicCatalog {
    entries: Vec<TopicEntry>,
}

impl TopicCatalog {
    /// 校验并创建章节目录
    pub fn new(entries: Vec<TopicEntry>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.id.trim().is_empty() {
                return Err(CatalogError::EmptyTopicId {
                    name: entry.display_name.clone(),
                });
            }
            if entry.keywords.is_empty() {
                return Err(CatalogError::NoKeywords {
                    id: entry.id.clone(),
                });
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(CatalogError::DuplicateTopic {
                    id: entry.id.clone(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// 内置的 AP Calculus 章节目录
    pub fn ap_calculus() -> Self {
        let entries = AP_CALCULUS_TOPICS
            .iter()
            .map(|(id, name, course, keywords)| {
                TopicEntry::new(*id, *name, *course, keywords.iter())
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[TopicEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&TopicEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 课程可选的章节，按编号数值排序
    pub fn chapters_for(&self, course: Course) -> Vec<&TopicEntry> {
        let mut chapters: Vec<&TopicEntry> =
            self.entries.iter().filter(|e| e.offered_in(course)).collect();
        chapters.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        chapters
    }
}

impl Default for TopicCatalog {
    fn default() -> Self {
        Self::ap_calculus()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = TopicCatalog::ap_calculus();
        assert_eq!(catalog.len(), 10);
        // 内置表也必须通过校验
        assert!(TopicCatalog::new(catalog.entries().to_vec()).is_ok());
        assert!(catalog
            .entries()
            .iter()
            .flat_map(|e| e.keywords.iter())
            .all(|k| *k == k.to_lowercase()));
    }

    #[test]
    fn test_chapters_for_course() {
        let catalog = TopicCatalog::ap_calculus();
        let ab: Vec<&str> = catalog
            .chapters_for(Course::Ab)
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ab, vec!["1", "2", "3", "4", "5", "6", "7", "8"]);

        let bc: Vec<&str> = catalog
            .chapters_for(Course::Bc)
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(bc, vec!["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]);
    }

    #[test]
    fn test_keywords_are_lowercased() {
        let entry = TopicEntry::new("1", "Limits", Course::Ab, ["Limit", "L'Hopital"]);
        assert_eq!(entry.keywords, vec!["limit", "l'hopital"]);
    }

    #[test]
    fn test_duplicate_and_empty_ids_rejected() {
        let dup = TopicCatalog::new(vec![
            TopicEntry::new("1", "A", Course::Ab, ["a"]),
            TopicEntry::new("1", "B", Course::Ab, ["b"]),
        ]);
        assert!(matches!(dup, Err(CatalogError::DuplicateTopic { id }) if id == "1"));

        let empty = TopicCatalog::new(vec![TopicEntry::new(" ", "A", Course::Ab, ["a"])]);
        assert!(matches!(empty, Err(CatalogError::EmptyTopicId { .. })));

        let no_keywords =
            TopicCatalog::new(vec![TopicEntry::new("3", "C", Course::Ab, Vec::<String>::new())]);
        assert!(matches!(no_keywords, Err(CatalogError::NoKeywords { .. })));
    }

    #[test]
    fn test_course_from_str() {
        assert_eq!("ab".parse::<Course>().unwrap(), Course::Ab);
        assert_eq!(" BC ".parse::<Course>().unwrap(), Course::Bc);
        assert_eq!("2".parse::<Course>().unwrap(), Course::Bc);
        assert!("CD".parse::<Course>().is_err());
    }
}
