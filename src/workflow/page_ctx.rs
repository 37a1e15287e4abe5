//! 页面处理上下文
//!
//! 封装"我正在处理哪份题库的第几页"这一信息

use std::fmt::Display;

/// 页面处理上下文
#[derive(Debug, Clone)]
pub struct PageCtx<'a> {
    /// 来源文档
    pub document_id: &'a str,

    /// 页码（从1开始）
    pub page_number: u32,
}

impl<'a> PageCtx<'a> {
    pub fn new(document_id: &'a str, page_number: u32) -> Self {
        Self {
            document_id,
            page_number,
        }
    }
}

impl Display for PageCtx<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[题库 {} 第 {} 页]", self.document_id, self.page_number)
    }
}
