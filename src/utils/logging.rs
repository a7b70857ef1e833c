use crate::config::Config;
use crate::orchestrator::RunStats;
use anyhow::{Context, Result};
/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &Path) -> Result<()> {
    let log_header = format!(
        "{}\n论文集生成日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)
        .with_context(|| format!("无法写入日志文件: {}", log_file_path.display()))?;
    Ok(())
}

/// 在日志文件末尾追加运行统计
pub fn append_run_summary(log_file_path: &Path, stats: &RunStats) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .with_context(|| format!("无法打开日志文件: {}", log_file_path.display()))?;

    writeln!(
        file,
        "完成时间: {}\n论文: {}\n总页数: {}\n已编译: {}\n仅源文件: {}\n补充材料: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        stats.papers,
        stats.total_pages,
        stats.render.compiled,
        stats.render.source_only,
        stats.render.supplements
    )?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 配置
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 论文集生成 (20{})", config.year);
    info!("📂 原始论文目录: {}", config.paper_input_dir.display());
    info!("📂 输出目录: {}", config.paper_output_dir.display());
    if config.skip_compile {
        info!("💡 SKIP_COMPILE 已开启，只生成 LaTeX 源文件");
    }
    info!("{}", "=".repeat(60));
}

/// 记录阶段开始信息
///
/// # 参数
/// - `stage`: 阶段编号
/// - `total`: 阶段总数
/// - `name`: 阶段名称
pub fn log_stage(stage: usize, total: usize, name: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📦 阶段 {}/{}: {}", stage, total, name);
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `stats`: 运行统计
/// - `config`: 配置
pub fn print_final_stats(stats: &RunStats, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📄 论文: {} 篇, 共 {} 页", stats.papers, stats.total_pages);
    info!("✅ 已编译: {}", stats.render.compiled);
    info!("📝 仅源文件: {}", stats.render.source_only);
    info!("📎 补充材料: {}", stats.render.supplements);
    info!("{}", "=".repeat(60));
    info!("\nbib 文件: {}", config.bib_filename.display());
    info!("日志已保存至: {}", config.output_log_file.display());
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
