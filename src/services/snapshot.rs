/// 论文记录快照
///
/// 把最终的论文列表保存为 JSON，便于事后检查；也可以重新读入。
use crate::error::{AppError, AppResult, LoadError};
use crate::models::Paper;
use crate::utils::fs::write_text_file;
use std::path::Path;
use tokio::fs;
use tracing::info;

/// 保存快照
pub async fn save_snapshot(path: &Path, papers: &[Paper]) -> AppResult<()> {
    let json = serde_json::to_string_pretty(papers).map_err(|source| LoadError::Snapshot {
        path: path.to_path_buf(),
        source,
    })?;
    write_text_file(path, &json).await?;
    info!("✓ 快照已保存: {} ({} 篇论文)", path.display(), papers.len());
    Ok(())
}

/// 读取快照
pub async fn load_snapshot(path: &Path) -> AppResult<Vec<Paper>> {
    let json = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::read_failed(path, e))?;
    let papers = serde_json::from_str(&json).map_err(|source| LoadError::Snapshot {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(papers)
}
