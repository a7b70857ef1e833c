//! 论文文件处理流程 - 流程层
//!
//! 核心职责：定义"一篇论文"的文件处理流程
//!
//! 分两步，中间由编排层统一分配页码：
//! 1. prepare: 查找 PDF → pdfinfo 检查
//! 2. render: 写 LaTeX 包装文件 → 编译 → 复制到输出目录

use crate::config::Config;
use crate::error::AppResult;
use crate::models::Paper;
use crate::services::compiler::copy_outputs;
use crate::services::latex_writer::write_paper_latex;
use crate::services::pdf_locator::locate_paper_files;
use crate::services::{LatexCompiler, PdfInspector};
use crate::workflow::paper_ctx::PaperCtx;
use std::path::PathBuf;
use tracing::info;

/// 论文文件处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderResult {
    /// 已编译并复制到输出目录
    Compiled,
    /// 只生成了 LaTeX 源文件
    SourceOnly,
}

/// 论文文件处理流程
///
/// - 不决定论文顺序，也不分配页码
/// - 只依赖业务能力（services）
pub struct DocumentFlow {
    inspector: PdfInspector,
    compiler: LatexCompiler,
    paper_input_dir: PathBuf,
    latex_source_dir: PathBuf,
    paper_output_dir: PathBuf,
    skip_compile: bool,
    verbose_logging: bool,
}

impl DocumentFlow {
    /// 创建新的论文文件处理流程
    pub fn new(config: &Config) -> Self {
        Self {
            inspector: PdfInspector::new(config),
            compiler: LatexCompiler::new(config),
            paper_input_dir: config.paper_input_dir.clone(),
            latex_source_dir: config.latex_source_dir.clone(),
            paper_output_dir: config.paper_output_dir.clone(),
            skip_compile: config.skip_compile,
            verbose_logging: config.verbose_logging,
        }
    }

    /// 查找论文文件并检查正文 PDF
    pub async fn prepare(&self, paper: &mut Paper, ctx: &PaperCtx) -> AppResult<()> {
        let files = locate_paper_files(&self.paper_input_dir, paper.id).await?;
        let info = self.inspector.inspect(&files.main_pdf).await?;

        info!(
            "{} 📄 {} 页{}",
            ctx,
            info.pages,
            if files.supp_file.is_some() {
                "（含补充材料）"
            } else {
                ""
            }
        );
        if self.verbose_logging {
            info!(
                "{} 正文: {}, 页面: {}, PDF {}",
                ctx,
                files.main_pdf.display(),
                info.page_size,
                info.pdf_version
            );
            if let Some(supp) = &files.supp_file {
                info!("{} 补充材料: {}", ctx, supp.display());
            }
        }

        paper.main_pdf = Some(files.main_pdf);
        paper.supp_file = files.supp_file;
        paper.main_pdf_info = Some(info);
        Ok(())
    }

    /// 生成、编译并复制论文
    pub async fn render(&self, paper: &mut Paper, ctx: &PaperCtx) -> AppResult<RenderResult> {
        let tex_file = write_paper_latex(paper, &self.latex_source_dir).await?;

        if self.skip_compile {
            info!("{} 📝 已生成 {}", ctx, tex_file.display());
            return Ok(RenderResult::SourceOnly);
        }

        let compiled = self.compiler.compile(&tex_file).await?;
        let copied = copy_outputs(paper, &compiled, &self.paper_output_dir).await?;
        info!("{} ✓ 编译完成，复制了 {} 个文件", ctx, copied);

        Ok(RenderResult::Compiled)
    }
}
