//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责按顺序调度所有阶段，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 论文集处理器
//! - 管理应用生命周期（初始化、运行）
//! - 加载导出文件和修正表
//! - 分配页码
//! - 写入 bib 文件、摘要集、快照
//! - 输出全局统计信息
//!
//! ### `paper_processor` - 论文文件处理器
//! - 按论文集顺序遍历论文
//! - 调用 `DocumentFlow` 的 prepare / render
//! - 统计编译结果
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理整个论文集)
//!     ↓
//! paper_processor (逐篇处理文件)
//!     ↓
//! workflow::{MetadataFlow, DocumentFlow}
//!     ↓
//! services (能力层：解析 / 标识符 / 排序 / pdfinfo / LaTeX)
//!     ↓
//! models (导出文件、论文记录)
//! ```

pub mod batch_processor;
pub mod paper_processor;

// 重新导出主要类型
pub use batch_processor::{App, RunStats};
pub use paper_processor::{prepare_papers, render_papers, RenderStats};
