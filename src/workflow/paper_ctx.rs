//! 论文处理上下文
//!
//! 封装"我正在处理第几篇论文"这一信息，只用于日志

use crate::models::Paper;
use std::fmt::Display;

/// 论文处理上下文
#[derive(Debug, Clone)]
pub struct PaperCtx {
    /// 论文ID
    pub paper_id: u64,

    /// 标识符（未分配时为空）
    pub bibid: String,

    /// 在论文集中的位置（从1开始）
    pub index: usize,

    /// 论文总数
    pub total: usize,
}

impl PaperCtx {
    /// 创建新的论文上下文
    pub fn new(paper: &Paper, index: usize, total: usize) -> Self {
        Self {
            paper_id: paper.id,
            bibid: paper.bibid_str().to_string(),
            index,
            total,
        }
    }
}

impl Display for PaperCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[论文 {}/{} ID#{} {}]",
            self.index, self.total, self.paper_id, self.bibid
        )
    }
}
