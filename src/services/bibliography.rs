/// bib 文件生成服务
use crate::error::{AppResult, LayoutError};
use crate::models::Paper;
use crate::utils::fs::write_text_file;
use std::path::Path;
use tracing::info;

/// 生成一篇论文的 `@InProceedings` 条目
pub fn create_bibentry(paper: &Paper) -> Result<String, LayoutError> {
    let bibid = paper
        .bibid
        .as_deref()
        .ok_or(LayoutError::MissingBibId { paper_id: paper.id })?;
    let pages = paper
        .pages
        .ok_or(LayoutError::MissingPages { paper_id: paper.id })?;

    Ok(format!(
        "@InProceedings{{{bibid},\n  title = {{{{{title}}}}},\n  author = {{{author}}},\n  pages = {{{pages}}},\n  abstract = {{{abstract_text}}}\n}}",
        title = paper.title,
        author = paper.bibtex_author,
        abstract_text = paper.abstract_text,
    ))
}

/// 生成完整的 bib 文件内容：前言之后是每篇论文的条目，条目之间空一行
pub fn render_bibliography(preamble: &str, papers: &[Paper]) -> Result<String, LayoutError> {
    let mut bib = preamble.to_string();
    for paper in papers {
        bib.push_str(&create_bibentry(paper)?);
        bib.push_str("\n\n");
    }
    Ok(bib)
}

/// 写入 bib 文件
pub async fn write_bib_file(path: &Path, preamble: &str, papers: &[Paper]) -> AppResult<()> {
    let bib = render_bibliography(preamble, papers)?;
    write_text_file(path, &bib).await?;
    info!("✓ bib 文件已写入: {} ({} 条)", path.display(), papers.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PageRange;

    fn paper() -> Paper {
        let mut paper = Paper::new(46, "Deep Things", "");
        paper.abstract_text = "We study things.".to_string();
        paper.bibtex_author = "Smith, John and Doe, Jane".to_string();
        paper.bibid = Some("smith14".to_string());
        paper.pages = Some(PageRange { start: 4, end: 8 });
        paper
    }

    #[test]
    fn test_bibentry_format() {
        let entry = create_bibentry(&paper()).unwrap();
        assert_eq!(
            entry,
            "@InProceedings{smith14,\n  title = {{Deep Things}},\n  author = {Smith, John and Doe, Jane},\n  pages = {4-8},\n  abstract = {We study things.}\n}"
        );
    }

    #[test]
    fn test_bibentry_pages_match_range() {
        let mut paper = paper();
        paper.pages = Some(PageRange { start: 121, end: 129 });
        let entry = create_bibentry(&paper).unwrap();
        assert!(entry.contains("pages = {121-129}"));
    }

    #[test]
    fn test_bibentry_requires_pages() {
        let mut paper = paper();
        paper.pages = None;
        assert!(matches!(
            create_bibentry(&paper),
            Err(LayoutError::MissingPages { paper_id: 46 })
        ));
    }

    #[test]
    fn test_render_bibliography_starts_with_preamble() {
        let bib = render_bibliography("@Proceedings{x}\n\n", &[paper(), paper()]).unwrap();
        assert!(bib.starts_with("@Proceedings{x}\n\n@InProceedings{smith14,"));
        assert!(bib.ends_with("}\n\n"));
        assert_eq!(bib.matches("@InProceedings").count(), 2);
    }
}
