//! 论文排序
//!
//! 先按 (bib 作者, 论文ID) 排序，再把特别论文按配置顺序移到最前面。

use crate::models::Paper;
use tracing::{info, warn};

/// 按 (bibtex_author, id) 升序排序
///
/// ID 按导出文件中的文本比较（`"100"` 排在 `"46"` 之前），
/// 同一作者的冲突后缀因此和已发布的标识符一致。
pub fn sort_papers(papers: &mut [Paper]) {
    papers.sort_by_cached_key(|p| (p.bibtex_author.clone(), p.id.to_string()));
}

/// 把特别论文移到最前面
///
/// 第一个配置的ID排在第一位，其余论文保持原有的相对顺序。
/// 返回实际移动的论文数量。
pub fn promote_notable(papers: &mut Vec<Paper>, notable_ids: &[u64]) -> usize {
    let mut front = 0;
    for &id in notable_ids {
        match papers[front..].iter().position(|p| p.id == id) {
            Some(offset) => {
                let paper = papers.remove(front + offset);
                papers.insert(front, paper);
                front += 1;
            }
            None if papers[..front].iter().any(|p| p.id == id) => {}
            None => warn!("⚠️ 特别论文 {} 不在论文列表中", id),
        }
    }

    if front > 0 {
        info!("✓ {} 篇特别论文已移到最前面", front);
    }
    front
}
