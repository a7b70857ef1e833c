//! 页码分配
//!
//! 按最终顺序遍历一次论文列表，从第1页开始连续分配页码。

use crate::error::LayoutError;
use crate::models::{PageRange, Paper};
use tracing::info;

/// 为所有论文分配连续页码，返回总页数
///
/// 每篇论文需要已有 `main_pdf_info`。
pub fn paginate(papers: &mut [Paper]) -> Result<u32, LayoutError> {
    let mut cursor = 0;
    for paper in papers.iter_mut() {
        let count = paper
            .main_pdf_info
            .as_ref()
            .map(|info| info.pages)
            .ok_or(LayoutError::MissingPdfInfo { paper_id: paper.id })?;
        if count == 0 {
            return Err(LayoutError::EmptyPdf { paper_id: paper.id });
        }

        let range = PageRange {
            start: cursor + 1,
            end: cursor + count,
        };
        paper.pages = Some(range);
        paper.pagestring = Some(range.to_string());
        cursor += count;
    }

    info!("✓ {} 篇论文共 {} 页", papers.len(), cursor);
    Ok(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PdfInfo;

    fn paper_with_pages(id: u64, pages: u32) -> Paper {
        let mut paper = Paper::new(id, "T", "");
        paper.main_pdf_info = Some(PdfInfo {
            pages,
            page_size: "612 x 792 pts (letter)".to_string(),
            paper_size: Some("letter".to_string()),
            pdf_version: "1.5".to_string(),
        });
        paper
    }

    #[test]
    fn test_contiguous_ranges() {
        let mut papers = vec![
            paper_with_pages(1, 3),
            paper_with_pages(2, 5),
            paper_with_pages(3, 2),
        ];
        assert_eq!(paginate(&mut papers).unwrap(), 10);

        let ranges: Vec<(u32, u32)> = papers
            .iter()
            .map(|p| p.pages.map(|r| (r.start, r.end)).unwrap())
            .collect();
        assert_eq!(ranges, vec![(1, 3), (4, 8), (9, 10)]);
        assert_eq!(papers[1].pagestring.as_deref(), Some("4-8"));
    }

    #[test]
    fn test_missing_pdf_info() {
        let mut papers = vec![paper_with_pages(1, 3), Paper::new(2, "T", "")];
        assert!(matches!(
            paginate(&mut papers),
            Err(LayoutError::MissingPdfInfo { paper_id: 2 })
        ));
    }

    #[test]
    fn test_zero_page_pdf() {
        let mut papers = vec![paper_with_pages(8, 0)];
        assert!(matches!(
            paginate(&mut papers),
            Err(LayoutError::EmptyPdf { paper_id: 8 })
        ));
    }
}
