use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// 论文导出文件中的作者列
pub const AUTHOR_COLUMN: &str = "Name (Org)";

/// 一位作者（已规范化）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// 名
    pub first_name: String,
    /// 姓
    pub last_name: String,
    /// 首尾词大写后的完整姓名，用于摘要集
    pub display_name: String,
    /// 是否标记为通讯作者（`*`）
    #[serde(default)]
    pub corresponding: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

impl Author {
    /// bib 格式的姓名：`Last, First`
    pub fn bibtex_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }
}

/// `pdfinfo` 报告的 PDF 信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfInfo {
    /// 页数
    pub pages: u32,
    /// 原始 `Page size` 字符串
    pub page_size: String,
    /// 映射后的纸张名称（`a4` / `letter`），未知尺寸为 `None`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_size: Option<String>,
    /// 原始 `PDF version` 字符串，例如 `1.5`
    pub pdf_version: String,
}

/// 论文在论文集中的页码范围（闭区间）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    /// 页数；`end < start` 的范围（例如手工改过的快照）为 0
    pub fn len(&self) -> u32 {
        (self.end + 1).saturating_sub(self.start)
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// 论文记录
///
/// 从论文导出文件创建，之后由流水线的每个阶段逐步补充字段。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paper {
    /// CMT 中的论文ID
    pub id: u64,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// 原始作者列（`Name (Org); Name (Org)`）
    pub raw_authors: String,

    // --- 作者规范化 ---
    #[serde(default)]
    pub authors: Vec<Author>,
    /// `Last, First and Last, First`
    #[serde(default)]
    pub bibtex_author: String,
    /// `bibtex_author` 中第一个逗号之前的部分
    #[serde(default)]
    pub lead_author: String,
    /// `First Last, First Last`
    #[serde(default)]
    pub linear_author: String,

    // --- 标识符 ---
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bibid: Option<String>,

    // --- 文件 ---
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_pdf: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supp_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tex_file: Option<PathBuf>,

    // --- 排版 ---
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_pdf_info: Option<PdfInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<PageRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagestring: Option<String>,

    /// 导出文件中的其余列，原样保留
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl Paper {
    /// 创建只有基本字段的论文记录
    pub fn new(id: u64, title: impl Into<String>, raw_authors: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            raw_authors: raw_authors.into(),
            ..Default::default()
        }
    }

    /// 标识符，未分配时为空字符串
    pub fn bibid_str(&self) -> &str {
        self.bibid.as_deref().unwrap_or("")
    }

    /// 去掉摘要首尾空白
    pub fn cleanup_abstract(&mut self) {
        let trimmed = self.abstract_text.trim();
        if trimmed.len() != self.abstract_text.len() {
            self.abstract_text = trimmed.to_string();
        }
    }
}

impl fmt::Display for Paper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.bibid {
            Some(bibid) => write!(f, "[论文 {} / {}]", self.id, bibid),
            None => write!(f, "[论文 {}]", self.id),
        }
    }
}
