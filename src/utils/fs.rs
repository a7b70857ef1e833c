/// 文件写入辅助函数
use crate::error::{AppError, AppResult};
use std::path::Path;
use tokio::fs;

/// 写入文本文件，必要时先创建父目录
pub async fn write_text_file(path: &Path, contents: &str) -> AppResult<()> {
    ensure_parent_dir(path).await?;
    fs::write(path, contents)
        .await
        .map_err(|e| AppError::write_failed(path, e))
}

/// 创建文件的父目录
pub async fn ensure_parent_dir(path: &Path) -> AppResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::write_failed(parent, e)),
        _ => Ok(()),
    }
}
