use std::path::PathBuf;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 导出文件加载错误
    #[error("加载错误: {0}")]
    Load(#[from] LoadError),
    /// 作者解析 / 规范化错误
    #[error("作者错误: {0}")]
    Author(#[from] AuthorError),
    /// 标识符分配错误
    #[error("标识符错误: {0}")]
    Identifier(#[from] IdentifierError),
    /// 文件发现与排版错误
    #[error("排版错误: {0}")]
    Layout(#[from] LayoutError),
    /// 外部工具调用错误
    #[error("外部工具错误: {0}")]
    Tool(#[from] ToolError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 导出文件加载错误
#[derive(Debug, Error)]
pub enum LoadError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 未找到表头标记
    #[error("文件 {path} 中未找到以 '{marker}' 开头的表头")]
    HeaderNotFound { path: PathBuf, marker: String },
    /// 缺少必需的列
    #[error("第 {line} 行缺少列 '{column}'")]
    MissingColumn { line: usize, column: String },
    /// 论文 ID 不是数字
    #[error("第 {line} 行的论文ID无效: '{value}'")]
    InvalidPaperId { line: usize, value: String },
    /// 快照序列化失败
    #[error("快照序列化失败 ({path}): {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// 作者字段语法错误，`position` 为字符偏移
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorParseError {
    /// 空条目
    #[error("作者条目为空")]
    EmptyEntry,
    /// 姓名缺失（条目以非姓名字符开头）
    #[error("位置 {position} 处缺少姓名")]
    MissingName { position: usize },
    /// 意外字符
    #[error("位置 {position} 处出现意外字符 '{found}'")]
    UnexpectedChar { position: usize, found: char },
    /// 机构括号未闭合
    #[error("位置 {position} 处的机构括号未闭合")]
    UnterminatedOrganization { position: usize },
    /// 机构之后还有多余内容
    #[error("位置 {position} 处机构之后存在多余内容")]
    TrailingInput { position: usize },
}

/// 作者规范化错误
#[derive(Debug, Error)]
pub enum AuthorError {
    /// 作者条目格式错误
    #[error("论文 {paper_id} 的作者条目 '{entry}' 格式错误: {source}")]
    Malformed {
        paper_id: u64,
        entry: String,
        #[source]
        source: AuthorParseError,
    },
    /// 作者列表为空
    #[error("论文 {paper_id} 没有作者")]
    NoAuthors { paper_id: u64 },
    /// 多词姓名不在用户表中
    #[error("论文 {paper_id} 的作者 '{name}' 不在用户表中，无法区分名和姓")]
    NotInUsers { paper_id: u64, name: String },
}

/// 标识符分配错误
#[derive(Debug, Error)]
pub enum IdentifierError {
    /// 重复分配
    #[error("论文 {paper_id} 已有标识符 '{bibid}'，标识符只能分配一次")]
    AlreadyAssigned { paper_id: u64, bibid: String },
    /// 论文尚未规范化作者
    #[error("论文 {paper_id} 缺少第一作者，请先规范化作者")]
    MissingLeadAuthor { paper_id: u64 },
    /// 转写后标识符为空
    #[error("论文 {paper_id} 的第一作者 '{lead_author}' 无法生成标识符")]
    EmptyIdentifier { paper_id: u64, lead_author: String },
}

/// 文件发现与排版错误
#[derive(Debug, Error)]
pub enum LayoutError {
    /// 论文目录中文件数量异常
    #[error("目录 {dir} 中找到 {count} 个文件，应为 1 或 2 个")]
    UnexpectedFileCount { dir: PathBuf, count: usize },
    /// 无法判断哪个文件是补充材料
    #[error("目录 {dir} 中无法确定补充材料: {files:?}")]
    AmbiguousSupplement { dir: PathBuf, files: Vec<String> },
    /// 缺少 PDF 信息
    #[error("论文 {paper_id} 缺少 PDF 信息，请先检查 PDF")]
    MissingPdfInfo { paper_id: u64 },
    /// PDF 页数为零
    #[error("论文 {paper_id} 的 PDF 页数为 0")]
    EmptyPdf { paper_id: u64 },
    /// 缺少页码
    #[error("论文 {paper_id} 尚未分配页码")]
    MissingPages { paper_id: u64 },
    /// 缺少标识符
    #[error("论文 {paper_id} 尚未分配标识符")]
    MissingBibId { paper_id: u64 },
    /// 未知纸张尺寸
    #[error("论文 {paper_id} 的纸张尺寸未知: '{page_size}'")]
    UnknownPaperSize { paper_id: u64, page_size: String },
}

/// 外部工具调用错误
#[derive(Debug, Error)]
pub enum ToolError {
    /// 无法启动程序
    #[error("无法启动 {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// 程序返回非零状态
    #[error("{program} 处理 {target} 失败 (状态: {status})")]
    Failed {
        program: String,
        target: PathBuf,
        status: String,
    },
    /// 输出缺少字段
    #[error("{program} 的输出缺少字段 '{field}' ({target})")]
    MissingField {
        program: String,
        target: PathBuf,
        field: String,
    },
    /// 输出字段无法解析
    #[error("{program} 的字段 '{field}' 无法解析: '{value}'")]
    InvalidField {
        program: String,
        field: String,
        value: String,
    },
    /// 复制文件失败
    #[error("复制 {from} 到 {to} 失败: {source}")]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// 会议年份格式错误
    #[error("会议年份必须是两位数字: '{year}'")]
    InvalidYear { year: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Load(LoadError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Load(LoadError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建外部程序启动失败错误
    pub fn spawn_failed(program: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Tool(ToolError::SpawnFailed {
            program: program.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
