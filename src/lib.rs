//! # Proceedings Builder
//!
//! 根据会议投稿系统的导出文件生成论文集：bib 文件、每篇论文的 LaTeX 包装文件和编译结果
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 论文、作者、用户表
//! - `models/loaders` - 读取 UTF-16 制表符分隔的导出文件
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，每个能力都可以单独测试
//! - `author_parser` / `AuthorNormalizer` - 作者字段解析与规范化
//! - `IdentifierAssigner` - 引用标识符分配
//! - `PdfInspector` / `LatexCompiler` - 外部工具调用
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义论文集元数据流程和单篇论文的文件流程
//! - `PaperCtx` - 上下文封装（序号 + 论文 ID + 标识符）
//! - `MetadataFlow` - 规范化 → 排序 → 分配标识符 → 置顶 → 修正
//! - `DocumentFlow` - 查找 PDF → pdfinfo → LaTeX → 编译 → 复制
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 按阶段串行执行整个运行
//! - `orchestrator/paper_processor` - 逐篇处理论文文件

pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::Paper;
pub use orchestrator::{App, RunStats};
pub use workflow::{DocumentFlow, MetadataFlow, PaperCtx};
