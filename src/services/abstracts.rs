/// 摘要集生成服务
use crate::error::AppResult;
use crate::models::Paper;
use crate::utils::fs::write_text_file;
use std::path::Path;
use tracing::info;

const BOOKLET_HEADER: &str = r"\documentclass{article}
\usepackage[utf8]{inputenc}
\usepackage{graphicx}
\usepackage[a4paper]{geometry}
\usepackage{times}
\usepackage{pdfpages,calc}
\usepackage[space]{grffile}
\usepackage[absolute]{textpos}

\begin{document}

\pagestyle{empty}

";

/// 生成摘要集 LaTeX 文档
pub fn render_abstract_booklet(papers: &[Paper]) -> String {
    let mut tex = BOOKLET_HEADER.to_string();
    for paper in papers {
        tex.push_str(&format!(
            "({}) \\textbf{{{}}}\\\\\n{}\\\\\n{}\\\\[1em]\n",
            paper.bibid_str(),
            paper.title,
            paper.linear_author,
            paper.abstract_text
        ));
    }
    tex.push_str("\n\\end{document}\n");
    tex
}

/// 写入摘要集
pub async fn write_abstract_booklet(path: &Path, papers: &[Paper]) -> AppResult<()> {
    write_text_file(path, &render_abstract_booklet(papers)).await?;
    info!("✓ 摘要集已写入: {}", path.display());
    Ok(())
}
