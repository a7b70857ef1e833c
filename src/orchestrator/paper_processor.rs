//! 论文文件处理器 - 编排层
//!
//! 按论文集顺序逐篇调用 [`DocumentFlow`]，任何一篇失败都会中止整个运行。

use crate::models::Paper;
use crate::workflow::{DocumentFlow, PaperCtx, RenderResult};
use anyhow::{Context, Result};
use tracing::info;

/// 论文文件处理统计
#[derive(Debug, Default, Clone, Copy)]
pub struct RenderStats {
    pub compiled: usize,
    pub source_only: usize,
    pub supplements: usize,
}

/// 查找并检查所有论文的 PDF
pub async fn prepare_papers(flow: &DocumentFlow, papers: &mut [Paper]) -> Result<()> {
    let total = papers.len();
    for (idx, paper) in papers.iter_mut().enumerate() {
        let ctx = PaperCtx::new(paper, idx + 1, total);
        flow.prepare(paper, &ctx)
            .await
            .with_context(|| format!("{} 查找或检查 PDF 失败", ctx))?;
    }
    Ok(())
}

/// 生成、编译并复制所有论文
pub async fn render_papers(flow: &DocumentFlow, papers: &mut [Paper]) -> Result<RenderStats> {
    let total = papers.len();
    let mut stats = RenderStats::default();

    for (idx, paper) in papers.iter_mut().enumerate() {
        let ctx = PaperCtx::new(paper, idx + 1, total);
        log_paper_start(&ctx, paper);

        match flow
            .render(paper, &ctx)
            .await
            .with_context(|| format!("{} 生成论文失败", ctx))?
        {
            RenderResult::Compiled => stats.compiled += 1,
            RenderResult::SourceOnly => stats.source_only += 1,
        }
        if paper.supp_file.is_some() {
            stats.supplements += 1;
        }
    }

    Ok(stats)
}

// ========== 日志辅助函数 ==========

fn log_paper_start(ctx: &PaperCtx, paper: &Paper) {
    info!("\n{} {}", ctx, "─".repeat(30));
    info!("{} 标题: {}", ctx, crate::utils::logging::truncate_text(&paper.title, 80));
    if let Some(pages) = &paper.pagestring {
        info!("{} 页码: {}", ctx, pages);
    }
}
