/// LaTeX 编译与输出复制服务
use crate::config::Config;
use crate::error::{AppError, AppResult, LayoutError, ToolError};
use crate::models::Paper;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::process::Command;
use tracing::debug;

/// LaTeX 编译服务
pub struct LatexCompiler {
    program: String,
    args: Vec<String>,
}

impl LatexCompiler {
    /// 创建编译服务
    pub fn new(config: &Config) -> Self {
        Self {
            program: config.latex_program.clone(),
            args: config.latex_args.clone(),
        }
    }

    /// 在 tex 文件所在目录中编译，返回生成的 PDF 路径
    pub async fn compile(&self, tex_file: &Path) -> AppResult<PathBuf> {
        let file_name = tex_file.file_name().unwrap_or(tex_file.as_os_str());

        let mut command = Command::new(&self.program);
        command.args(&self.args).arg(file_name);
        if let Some(dir) = tex_file.parent().filter(|d| !d.as_os_str().is_empty()) {
            command.current_dir(dir);
        }

        debug!("运行 {} {:?} {}", self.program, self.args, tex_file.display());
        let status = command
            .status()
            .await
            .map_err(|e| AppError::spawn_failed(&self.program, e))?;

        if !status.success() {
            return Err(ToolError::Failed {
                program: self.program.clone(),
                target: tex_file.to_path_buf(),
                status: status.to_string(),
            }
            .into());
        }

        Ok(tex_file.with_extension("pdf"))
    }
}

/// 补充材料在输出目录中的文件名：`<bibid>-supp<扩展名>`
pub fn supplement_target(output_dir: &Path, bibid: &str, supp_file: &Path) -> PathBuf {
    let extension = supp_file
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    output_dir.join(format!("{}-supp{}", bibid, extension))
}

/// 把编译好的 PDF 和补充材料复制到输出目录
///
/// 返回复制的文件数量。
pub async fn copy_outputs(paper: &Paper, compiled_pdf: &Path, output_dir: &Path) -> AppResult<usize> {
    let bibid = paper
        .bibid
        .as_deref()
        .ok_or(LayoutError::MissingBibId { paper_id: paper.id })?;

    fs::create_dir_all(output_dir)
        .await
        .map_err(|e| AppError::write_failed(output_dir, e))?;

    let pdf_target = output_dir.join(format!("{}.pdf", bibid));
    copy_file(compiled_pdf, &pdf_target).await?;

    let mut copied = 1;
    if let Some(supp) = &paper.supp_file {
        copy_file(supp, &supplement_target(output_dir, bibid, supp)).await?;
        copied += 1;
    }
    Ok(copied)
}

async fn copy_file(from: &Path, to: &Path) -> AppResult<()> {
    fs::copy(from, to).await.map_err(|source| ToolError::CopyFailed {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })?;
    debug!("复制 {} -> {}", from.display(), to.display());
    Ok(())
}
