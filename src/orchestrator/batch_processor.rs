//! 论文集处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，按固定顺序串行执行所有阶段。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：写日志文件头、输出启动信息
//! 2. **加载**：读取用户表、论文表和修正表
//! 3. **元数据**：委托 `MetadataFlow` 规范化作者、排序、分配标识符
//! 4. **文件**：查找并检查 PDF，分配页码，生成并编译 LaTeX
//! 5. **输出**：bib 文件、摘要集、快照
//! 6. **统计**：汇总运行结果
//!
//! 任何阶段出错都会中止整个运行，没有重试。

use crate::config::Config;
use crate::models::{load_papers, load_user_table, Paper};
use crate::orchestrator::paper_processor::{self, RenderStats};
use crate::services::abstracts::write_abstract_booklet;
use crate::services::bibliography::write_bib_file;
use crate::services::pagination::paginate;
use crate::services::snapshot::save_snapshot;
use crate::services::FixTable;
use crate::utils::logging::{
    append_run_summary, init_log_file, log_stage, log_startup, print_final_stats,
};
use crate::workflow::{DocumentFlow, Fixes, MetadataFlow};
use anyhow::{Context, Result};
use tracing::{info, warn};

/// 阶段总数（用于日志）
const TOTAL_STAGES: usize = 5;

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        init_log_file(&config.output_log_file)?;
        log_startup(&config);
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunStats> {
        log_stage(1, TOTAL_STAGES, "加载导出文件");
        let papers = self.load_metadata().await?;

        if papers.is_empty() {
            warn!("⚠️ 论文表中没有论文，程序结束");
            return Ok(RunStats::default());
        }

        log_stage(2, TOTAL_STAGES, "规范化元数据");
        let mut papers = self.normalize(papers).await?;

        log_stage(3, TOTAL_STAGES, "查找并检查 PDF");
        let flow = DocumentFlow::new(&self.config);
        paper_processor::prepare_papers(&flow, &mut papers).await?;
        let total_pages = paginate(&mut papers).context("分配页码失败")?;

        log_stage(4, TOTAL_STAGES, "生成论文");
        let render = paper_processor::render_papers(&flow, &mut papers).await?;

        log_stage(5, TOTAL_STAGES, "写入 bib / 摘要集 / 快照");
        self.write_outputs(&papers).await?;

        let stats = RunStats {
            papers: papers.len(),
            total_pages,
            render,
        };
        print_final_stats(&stats, &self.config);
        append_run_summary(&self.config.output_log_file, &stats)?;

        Ok(stats)
    }

    /// 加载论文表
    async fn load_metadata(&self) -> Result<Vec<Paper>> {
        info!("\n📁 正在读取论文表: {}", self.config.paper_file.display());
        load_papers(&self.config.paper_file, self.config.export_encoding)
            .await
            .context("无法加载论文表")
    }

    /// 规范化元数据
    async fn normalize(&self, papers: Vec<Paper>) -> Result<Vec<Paper>> {
        info!("📁 正在读取用户表: {}", self.config.author_file.display());
        let users = load_user_table(&self.config.author_file, self.config.export_encoding)
            .await
            .context("无法加载用户表")?;

        let fixes = Fixes {
            titles: FixTable::load(&self.config.title_fix_file).await,
            abstracts: FixTable::load(&self.config.abstract_fix_file).await,
        };

        let papers = MetadataFlow::new(&self.config, &users)
            .run(papers, &fixes)
            .context("元数据规范化失败")?;
        Ok(papers)
    }

    /// 写入 bib 文件、摘要集和快照
    async fn write_outputs(&self, papers: &[Paper]) -> Result<()> {
        write_bib_file(&self.config.bib_filename, &self.config.bib_preamble, papers)
            .await
            .context("无法写入 bib 文件")?;
        write_abstract_booklet(&self.config.abstracts_filename, papers)
            .await
            .context("无法写入摘要集")?;
        save_snapshot(&self.config.snapshot_filename, papers)
            .await
            .context("无法保存快照")?;
        Ok(())
    }
}

/// 运行统计
#[derive(Debug, Default, Clone, Copy)]
pub struct RunStats {
    pub papers: usize,
    pub total_pages: u32,
    pub render: RenderStats,
}
