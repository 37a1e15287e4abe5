//! 页面文本提供者 - 基础设施层
//!
//! 只暴露"按文档编号取出每页文本"的能力，不认识题目和章节

use crate::error::SourceError;
use lopdf::{Document, Encoding, Object, ObjectId};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use tracing::{debug, warn};

/// 页面文本提供者
///
/// 返回的每个元素对应一页的原始文本，按物理页序排列（第 1 页在前）
pub trait PageTextProvider: Send + Sync {
    fn pages(&self, document_id: &str) -> Result<Vec<String>, SourceError>;
}

/// 目录中的 PDF 题库
///
/// 文档编号即目录下的文件名，例如 `TB_1.pdf`
#[derive(Debug, Clone)]
pub struct PdfDirectory {
    dir: PathBuf,
}

impl PdfDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// 文档对应的文件路径
    pub fn path_of(&self, document_id: &str) -> PathBuf {
        self.dir.join(document_id)
    }

    /// 过滤出实际存在的文档，保持原有顺序
    pub fn available(&self, document_ids: &[String]) -> Vec<String> {
        document_ids
            .iter()
            .filter(|id| self.path_of(id).is_file())
            .cloned()
            .collect()
    }
}

impl PageTextProvider for PdfDirectory {
    fn pages(&self, document_id: &str) -> Result<Vec<String>, SourceError> {
        let path = self.path_of(document_id);
        if !path.is_file() {
            return Err(SourceError::Unavailable {
                document_id: document_id.to_string(),
            });
        }

        let read_failed = |reason: String| SourceError::ReadFailed {
            document_id: document_id.to_string(),
            reason,
        };

        let doc = Document::load(&path).map_err(|e| read_failed(e.to_string()))?;

        // get_pages() 按页码升序
        let page_ids: Vec<(u32, ObjectId)> = doc.get_pages().into_iter().collect();
        debug!("{}: 共 {} 页", document_id, page_ids.len());

        let mut pages = Vec::with_capacity(page_ids.len());
        for (page_number, page_id) in page_ids {
            let text = page_text(&doc, page_id)
                .map_err(|e| read_failed(format!("第 {} 页: {}", page_number, e)))?;
            pages.push(text);
        }

        Ok(pages)
    }
}

/// 按内容流重建单页文本，每个换行操作对应一个 `'\n'`
///
/// `Document::extract_text` 只在 `ET` 处换行，同一文本块内的多行会粘成一行，
/// 题号行因此无法被识别
fn page_text(doc: &Document, page_id: ObjectId) -> lopdf::Result<String> {
    let encodings = doc
        .get_page_fonts(page_id)?
        .into_iter()
        .map(|(name, font)| font.get_font_encoding(doc).map(|encoding| (name, encoding)))
        .collect::<lopdf::Result<BTreeMap<Vec<u8>, Encoding>>>()?;
    let content = doc.get_and_decode_page_content(page_id)?;

    let mut text = String::new();
    let mut encoding = None;
    for operation in &content.operations {
        let operands = &operation.operands;
        match operation.operator.as_str() {
            "Tf" => {
                let font = operands.first().ok_or(lopdf::Error::ContentDecode)?.as_name()?;
                encoding = encodings.get(font);
            }
            // 纯水平移动不换行
            "Td" | "TD" => {
                let dy = operands.get(1).and_then(|o| o.as_float().ok()).unwrap_or(0.0);
                if dy != 0.0 {
                    break_line(&mut text);
                }
            }
            "T*" | "ET" => break_line(&mut text),
            "'" | "\"" => {
                break_line(&mut text);
                push_shown_text(&mut text, encoding, operands)?;
            }
            "Tj" | "TJ" => push_shown_text(&mut text, encoding, operands)?,
            _ => {}
        }
    }

    let content_len = text.trim_end_matches('\n').len();
    text.truncate(content_len);
    Ok(text)
}

fn break_line(text: &mut String) {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
}

fn push_shown_text(
    text: &mut String,
    encoding: Option<&Encoding>,
    operands: &[Object],
) -> lopdf::Result<()> {
    let Some(encoding) = encoding else {
        warn!("⚠️ 文本未指定字体，已跳过");
        return Ok(());
    };

    for operand in operands {
        match operand {
            Object::String(bytes, _) => text.push_str(&Document::decode_text(encoding, bytes)?),
            Object::Array(items) => push_shown_text(text, Some(encoding), items)?,
            // TJ 中较大的负间距视为词间空格
            Object::Integer(i) if *i < -100 => text.push(' '),
            Object::Real(r) if *r < -100.0 => text.push(' '),
            _ => {}
        }
    }
    Ok(())
}

/// 内存中的页面文本
///
/// 供测试和嵌入调用方使用；未登记的文档视为不存在
#[derive(Debug, Clone, Default)]
pub struct MemoryPages {
    documents: HashMap<String, Vec<String>>,
    failures: HashMap<String, String>,
}

impl MemoryPages {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一个文档及其各页文本
    pub fn with_document(
        mut self,
        document_id: impl Into<String>,
        pages: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.documents
            .insert(document_id.into(), pages.into_iter().map(Into::into).collect());
        self
    }

    /// 登记一个存在但无法读取的文档
    pub fn with_failure(
        mut self,
        document_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        self.failures.insert(document_id.into(), reason.into());
        self
    }
}

impl PageTextProvider for MemoryPages {
    fn pages(&self, document_id: &str) -> Result<Vec<String>, SourceError> {
        if let Some(reason) = self.failures.get(document_id) {
            return Err(SourceError::ReadFailed {
                document_id: document_id.to_string(),
                reason: reason.clone(),
            });
        }
        self.documents
            .get(document_id)
            .cloned()
            .ok_or_else(|| SourceError::Unavailable {
                document_id: document_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Stream};
    use std::fs;
    use std::path::Path;

    /// 生成测试用 PDF，每页一个文本块
    fn write_pdf(path: &Path, pages: Vec<Vec<Operation>>) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for body in pages {
            let mut operations = vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12i64.into()]),
                Operation::new("Td", vec![72i64.into(), 720i64.into()]),
            ];
            operations.extend(body);
            operations.push(Operation::new("ET", vec![]));

            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0i64.into(), 0i64.into(), 612i64.into(), 792i64.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    fn show(text: &str) -> Operation {
        Operation::new("Tj", vec![Object::string_literal(text)])
    }

    fn next_line() -> Operation {
        Operation::new("Td", vec![0i64.into(), (-14i64).into()])
    }

    #[test]
    fn test_missing_pdf_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let provider = PdfDirectory::new(dir.path());

        assert_eq!(
            provider.pages("TB_2.pdf"),
            Err(SourceError::Unavailable {
                document_id: "TB_2.pdf".to_string()
            })
        );
    }

    #[test]
    fn test_corrupt_pdf_is_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("TB_1.pdf"), b"this is not a pdf").unwrap();
        let provider = PdfDirectory::new(dir.path());

        match provider.pages("TB_1.pdf") {
            Err(SourceError::ReadFailed { document_id, .. }) => assert_eq!(document_id, "TB_1.pdf"),
            other => panic!("应该是读取失败: {:?}", other),
        }
    }

    #[test]
    fn test_pdf_lines_are_kept_per_page() {
        let dir = tempfile::tempdir().unwrap();
        write_pdf(
            &dir.path().join("TB_1.pdf"),
            vec![
                vec![
                    show("Header"),
                    next_line(),
                    show("1. Find the limit as x approaches 2."),
                    next_line(),
                    show("(A) 1"),
                    next_line(),
                    show("2. Evaluate the derivative."),
                ],
                vec![show("3. Find the area.")],
            ],
        );

        let pages = PdfDirectory::new(dir.path()).pages("TB_1.pdf").unwrap();
        assert_eq!(
            pages,
            vec![
                "Header\n1. Find the limit as x approaches 2.\n(A) 1\n2. Evaluate the derivative.",
                "3. Find the area.",
            ]
        );
    }

    #[test]
    fn test_pdf_line_operators() {
        let dir = tempfile::tempdir().unwrap();
        write_pdf(
            &dir.path().join("TB_3.pdf"),
            vec![vec![
                show("1. Find"),
                // 同一行内的水平移动
                Operation::new("Td", vec![40i64.into(), 0i64.into()]),
                Operation::new(
                    "TJ",
                    vec![Object::Array(vec![
                        Object::string_literal("dy/dx"),
                        (-250i64).into(),
                        Object::string_literal("here."),
                    ])],
                ),
                Operation::new("T*", vec![]),
                show("(A) 0"),
                Operation::new("'", vec![Object::string_literal("2. Next question.")]),
            ]],
        );

        let pages = PdfDirectory::new(dir.path()).pages("TB_3.pdf").unwrap();
        assert_eq!(pages, vec!["1. Finddy/dx here.\n(A) 0\n2. Next question."]);
    }

    #[test]
    fn test_available_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("TB_3.pdf"), b"").unwrap();
        fs::write(dir.path().join("TB_1.pdf"), b"").unwrap();
        let provider = PdfDirectory::new(dir.path());

        let ids: Vec<String> = ["TB_1.pdf", "TB_2.pdf", "TB_3.pdf"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(provider.available(&ids), vec!["TB_1.pdf", "TB_3.pdf"]);
    }

    #[test]
    fn test_memory_pages() {
        let provider = MemoryPages::new()
            .with_document("A", ["page one", "page two"])
            .with_failure("B", "broken xref");

        assert_eq!(provider.pages("A").unwrap(), vec!["page one", "page two"]);
        assert!(matches!(provider.pages("B"), Err(SourceError::ReadFailed { .. })));
        assert!(matches!(provider.pages("C"), Err(SourceError::Unavailable { .. })));
    }
}
