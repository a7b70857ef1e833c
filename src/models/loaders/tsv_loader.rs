//! CMT 导出文件加载
//!
//! CMT 导出的是 Excel 风格的制表符分隔文本（默认 UTF-16）。文件开头有若干
//! 说明行，真正的表头以固定标记开头（用户表为 `First`，论文表为 `ID`）。

use crate::error::{AppError, AppResult, LoadError};
use crate::models::paper::{Paper, AUTHOR_COLUMN};
use crate::models::user::{User, UserTable};
use encoding_rs::{UTF_16BE, UTF_16LE, UTF_8};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

/// 用户导出文件的表头标记
pub const USER_HEADER_MARKER: &str = "First";
/// 论文导出文件的表头标记
pub const PAPER_HEADER_MARKER: &str = "ID";

/// 导出文件编码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextEncoding {
    /// UTF-16，按 BOM 判断字节序，无 BOM 时按小端处理
    #[default]
    Utf16,
    /// 无 BOM 的大端 UTF-16
    Utf16Be,
    Utf8,
}

/// 解码导出文件内容，BOM 会被去掉
pub fn decode_text(bytes: &[u8], encoding: TextEncoding) -> String {
    let encoding = match encoding {
        TextEncoding::Utf16 => UTF_16LE,
        TextEncoding::Utf16Be => UTF_16BE,
        TextEncoding::Utf8 => UTF_8,
    };
    // decode 会先嗅探 BOM，BOM 优先于指定编码
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

/// 表格中的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsvRow {
    /// 在文件中的行号（从1开始）
    pub line: usize,
    pub values: BTreeMap<String, String>,
}

impl TsvRow {
    /// 取出必需的列
    pub fn take_required(&mut self, column: &str) -> Result<String, LoadError> {
        self.values
            .remove(column)
            .ok_or_else(|| LoadError::MissingColumn {
                line: self.line,
                column: column.to_string(),
            })
    }
}

/// 解析后的表格
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsvTable {
    pub fields: Vec<String>,
    pub rows: Vec<TsvRow>,
}

/// 解析制表符分隔文本
///
/// 跳过表头标记之前的所有行；表头之后的每个非空行按制表符切分，
/// 与字段名逐一配对（多余的值丢弃，缺少的列不出现在行中）。
/// 找不到表头时返回 `None`。
pub fn parse_tsv(text: &str, header_marker: &str) -> Option<TsvTable> {
    let mut lines = text.lines().enumerate();

    let fields: Vec<String> = loop {
        let (_, line) = lines.next()?;
        if line.starts_with(header_marker) {
            break line.trim().split('\t').map(str::to_string).collect();
        }
    };

    let rows = lines
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| TsvRow {
            line: idx + 1,
            values: fields
                .iter()
                .cloned()
                .zip(line.trim_end().split('\t').map(str::to_string))
                .collect(),
        })
        .collect();

    Some(TsvTable { fields, rows })
}

/// 读取并解析导出文件
pub async fn load_tsv_file(
    path: &Path,
    encoding: TextEncoding,
    header_marker: &str,
) -> AppResult<TsvTable> {
    let bytes = fs::read(path)
        .await
        .map_err(|e| AppError::read_failed(path, e))?;
    let text = decode_text(&bytes, encoding);

    let table = parse_tsv(&text, header_marker).ok_or_else(|| LoadError::HeaderNotFound {
        path: path.to_path_buf(),
        marker: header_marker.to_string(),
    })?;

    debug!(
        "{}: 表头 {} 列, 数据 {} 行",
        path.display(),
        table.fields.len(),
        table.rows.len()
    );
    Ok(table)
}

/// 加载用户表（完整姓名 → 用户）
pub async fn load_user_table(path: &Path, encoding: TextEncoding) -> AppResult<UserTable> {
    let table = load_tsv_file(path, encoding, USER_HEADER_MARKER).await?;

    let mut users = UserTable::new();
    for mut row in table.rows {
        let first_name = row.take_required("FirstName")?;
        let last_name = row.take_required("LastName")?;
        users.insert(User {
            first_name,
            last_name,
            extra: row.values,
        });
    }

    info!("✓ 加载了 {} 个用户", users.len());
    Ok(users)
}

/// 加载论文列表
pub async fn load_papers(path: &Path, encoding: TextEncoding) -> AppResult<Vec<Paper>> {
    let table = load_tsv_file(path, encoding, PAPER_HEADER_MARKER).await?;

    let papers = table
        .rows
        .into_iter()
        .map(paper_from_row)
        .collect::<Result<Vec<_>, _>>()?;

    info!("✓ 加载了 {} 篇论文", papers.len());
    Ok(papers)
}

/// 把一行论文导出数据转换为论文记录
pub fn paper_from_row(mut row: TsvRow) -> Result<Paper, LoadError> {
    let raw_id = row.take_required("ID")?;
    let id = raw_id
        .trim()
        .parse::<u64>()
        .map_err(|_| LoadError::InvalidPaperId {
            line: row.line,
            value: raw_id.clone(),
        })?;

    let title = row.take_required("Title")?;
    let abstract_text = row.take_required("Abstract")?;
    let raw_authors = row.take_required(AUTHOR_COLUMN)?;

    Ok(Paper {
        id,
        title,
        abstract_text,
        raw_authors,
        extra: row.values,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAPER_EXPORT: &str = "Camera Ready Papers\n\t\t\t\nID\tTitle\tTrack\tAbstract\tName (Org)\n46\tA Title\tMain\tSome abstract\tJohn Smith (MIT)\n\n7\tOther\tMain\tAbs\tJane Doe* (UCL); Bob Lee (ETH)\n";

    #[test]
    fn test_parse_tsv_skips_preamble() {
        let table = parse_tsv(PAPER_EXPORT, PAPER_HEADER_MARKER).unwrap();
        assert_eq!(
            table.fields,
            vec!["ID", "Title", "Track", "Abstract", "Name (Org)"]
        );
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].line, 4);
        assert_eq!(table.rows[1].values["Name (Org)"], "Jane Doe* (UCL); Bob Lee (ETH)");
    }

    #[test]
    fn test_parse_tsv_missing_header() {
        assert!(parse_tsv("no header here\n1\t2\n", PAPER_HEADER_MARKER).is_none());
    }

    #[test]
    fn test_paper_from_row_keeps_extra_columns() {
        let mut table = parse_tsv(PAPER_EXPORT, PAPER_HEADER_MARKER).unwrap();
        let paper = paper_from_row(table.rows.remove(0)).unwrap();
        assert_eq!(paper.id, 46);
        assert_eq!(paper.title, "A Title");
        assert_eq!(paper.raw_authors, "John Smith (MIT)");
        assert_eq!(paper.extra.get("Track").map(String::as_str), Some("Main"));
    }

    #[test]
    fn test_paper_from_row_rejects_bad_id() {
        let mut table = parse_tsv("ID\tTitle\tAbstract\tName (Org)\nx1\tT\tA\tN (O)\n", "ID").unwrap();
        let err = paper_from_row(table.rows.remove(0)).unwrap_err();
        assert!(matches!(err, LoadError::InvalidPaperId { line: 2, .. }));
    }

    #[test]
    fn test_paper_from_row_missing_column() {
        let mut table = parse_tsv("ID\tTitle\n5\tT\n", "ID").unwrap();
        let err = paper_from_row(table.rows.remove(0)).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { ref column, .. } if column == "Abstract"));
    }

    #[test]
    fn test_decode_utf16_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "ID\tTitle\nMüller".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_text(&bytes, TextEncoding::Utf16), "ID\tTitle\nMüller");
    }

    #[test]
    fn test_decode_utf8_strips_bom() {
        let bytes = b"\xEF\xBB\xBFFirst\tLast";
        assert_eq!(decode_text(bytes, TextEncoding::Utf8), "First\tLast");
    }
}
