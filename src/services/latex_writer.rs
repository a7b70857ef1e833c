//! 论文 LaTeX 包装文件
//!
//! 每篇论文生成一个 LaTeX 文件，用 `pdfpages` 逐页嵌入原始 PDF，
//! 并在页脚加上论文集中的页码。

use crate::error::{AppResult, LayoutError};
use crate::models::Paper;
use crate::services::pdf_info::pdf_minor_version;
use crate::utils::fs::write_text_file;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `\pdfminorversion` 的最小值
pub const MIN_PDF_MINOR_VERSION: u32 = 4;

/// 生成论文的 LaTeX 包装文件内容
pub fn render_paper_latex(paper: &Paper) -> Result<String, LayoutError> {
    let info = paper
        .main_pdf_info
        .as_ref()
        .ok_or(LayoutError::MissingPdfInfo { paper_id: paper.id })?;
    let main_pdf = paper
        .main_pdf
        .as_ref()
        .ok_or(LayoutError::MissingPdfInfo { paper_id: paper.id })?;
    let pages = paper
        .pages
        .ok_or(LayoutError::MissingPages { paper_id: paper.id })?;
    let paper_size =
        info.paper_size
            .as_deref()
            .ok_or_else(|| LayoutError::UnknownPaperSize {
                paper_id: paper.id,
                page_size: info.page_size.clone(),
            })?;

    let minor_version = pdf_minor_version(&info.pdf_version)
        .unwrap_or(MIN_PDF_MINOR_VERSION)
        .max(MIN_PDF_MINOR_VERSION);

    let mut tex = format!(
        r"\documentclass{{article}}
\usepackage{{graphicx}}
\usepackage[{paper_size}paper]{{geometry}}
\usepackage{{times}}
\usepackage{{pdfpages,calc}}
\usepackage[space]{{grffile}}
\usepackage[absolute]{{textpos}}

\setlength{{\topmargin}}{{-15mm}}
\setlength{{\textheight}}{{21cm}}
\setlength{{\oddsidemargin}}{{0mm}}
\setlength{{\evensidemargin}}{{0mm}}
\setlength{{\textwidth}}{{125.2mm}}

\pdfinclusioncopyfonts=1
\pdfminorversion={minor_version}

\begin{{document}}

\pagestyle{{empty}}

\centering
"
    );

    let pdf_path = main_pdf.display();
    for k in 0..info.pages {
        let folio = pages.start + k;
        // String 的 fmt::Write 不会失败
        let _ = write!(
            tex,
            r"\includepdf[pages={page},offset=0 0,pagecommand={{\begin{{textblock*}}{{0mm}}(\paperwidth/2,268mm)
\parbox{{10mm}}{{\centering \usefont{{T1}}{{ptm}}{{m}}{{n}} \small {folio}}}
\end{{textblock*}}}}]{{{pdf_path}}}
",
            page = k + 1,
        );
    }
    tex.push_str("\\end{document}\n");

    Ok(tex)
}

/// 写入论文的 LaTeX 包装文件 `<latex_dir>/<bibid>.tex`，并记录到论文中
pub async fn write_paper_latex(paper: &mut Paper, latex_dir: &Path) -> AppResult<PathBuf> {
    let bibid = paper
        .bibid
        .as_deref()
        .ok_or(LayoutError::MissingBibId { paper_id: paper.id })?;
    let path = latex_dir.join(format!("{}.tex", bibid));

    let tex = render_paper_latex(paper)?;
    write_text_file(&path, &tex).await?;
    debug!("{} LaTeX: {}", paper, path.display());

    paper.tex_file = Some(path.clone());
    Ok(path)
}
