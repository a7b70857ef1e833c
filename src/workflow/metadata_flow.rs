//! 元数据规范化流程 - 流程层
//!
//! 核心职责：把从导出文件读入的论文列表整理成最终顺序
//!
//! 流程顺序：
//! 1. 规范化作者
//! 2. 按 (bib 作者, ID) 排序
//! 3. 分配标识符
//! 4. 特别论文移到最前面
//! 5. 应用标题 / 摘要修正表，整理摘要
//!
//! 标识符在排序之后、移动特别论文之前分配，冲突后缀因此按排序顺序决定。

use crate::config::Config;
use crate::error::AppResult;
use crate::models::{Paper, UserTable};
use crate::services::ordering::{promote_notable, sort_papers};
use crate::services::{AuthorNormalizer, FixField, FixTable, IdentifierAssigner};
use tracing::info;

/// 元数据流程使用的修正表
#[derive(Debug, Clone, Default)]
pub struct Fixes {
    pub titles: FixTable,
    pub abstracts: FixTable,
}

/// 元数据规范化流程
pub struct MetadataFlow<'a> {
    users: &'a UserTable,
    assigner: IdentifierAssigner,
    notable_ids: &'a [u64],
}

impl<'a> MetadataFlow<'a> {
    /// 创建新的元数据流程
    pub fn new(config: &'a Config, users: &'a UserTable) -> Self {
        Self {
            users,
            assigner: IdentifierAssigner::new(config.year.clone(), config.suffix_style),
            notable_ids: &config.notable_paper_ids,
        }
    }

    /// 使用自定义的标识符分配服务（例如替换转写）
    pub fn with_assigner(mut self, assigner: IdentifierAssigner) -> Self {
        self.assigner = assigner;
        self
    }

    pub fn run(&self, mut papers: Vec<Paper>, fixes: &Fixes) -> AppResult<Vec<Paper>> {
        info!("✍️ 正在规范化 {} 篇论文的作者...", papers.len());
        AuthorNormalizer::new(self.users).normalize_all(&mut papers)?;

        sort_papers(&mut papers);

        info!("🔖 正在分配标识符...");
        self.assigner.assign(&mut papers)?;

        promote_notable(&mut papers, self.notable_ids);

        let titles = fixes.titles.apply(&mut papers, FixField::Title);
        let abstracts = fixes.abstracts.apply(&mut papers, FixField::Abstract);
        if titles + abstracts > 0 {
            info!("✓ 应用修正: 标题 {} 条, 摘要 {} 条", titles, abstracts);
        }

        papers.iter_mut().for_each(Paper::cleanup_abstract);

        Ok(papers)
    }
}
