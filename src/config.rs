use crate::error::ConfigError;
use crate::models::loaders::TextEncoding;
use crate::services::identifier::SuffixStyle;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// 未设置 `PROCEEDINGS_CONFIG` 时尝试读取的配置文件
pub const DEFAULT_CONFIG_FILE: &str = "proceedings.toml";

/// 程序配置文件
///
/// 所有会议相关的常量都集中在这里，由编排层传入各个阶段。
/// TOML 中缺省的键使用 [`Config::default`] 的值。
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 会议年份（两位数字，用于标识符）
    pub year: String,
    /// CMT 用户导出文件（FirstName / LastName）
    pub author_file: PathBuf,
    /// CMT 论文导出文件（ID / Title / Abstract / Name (Org) ...）
    pub paper_file: PathBuf,
    /// 两个导出文件的编码
    pub export_encoding: TextEncoding,
    /// 原始论文目录，包含 `Paper <ID>` 子目录
    pub paper_input_dir: PathBuf,
    /// 生成的 LaTeX 源文件目录
    pub latex_source_dir: PathBuf,
    /// 最终论文集输出目录
    pub paper_output_dir: PathBuf,
    /// 标题修正表（bibid<TAB>新标题）
    pub title_fix_file: PathBuf,
    /// 摘要修正表（bibid<TAB>新摘要）
    pub abstract_fix_file: PathBuf,
    /// 输出的 bib 文件
    pub bib_filename: PathBuf,
    /// 输出的摘要集 LaTeX 文件
    pub abstracts_filename: PathBuf,
    /// 论文记录快照（JSON）
    pub snapshot_filename: PathBuf,
    /// 放在论文集最前面的论文ID，按配置顺序排列
    pub notable_paper_ids: Vec<u64>,
    /// bib 文件开头的论文集条目和前言条目
    pub bib_preamble: String,
    /// pdfinfo 的 `Page size` 字符串到纸张名称的映射
    pub page_sizes: BTreeMap<String, String>,
    /// PDF 信息检查程序
    pub pdfinfo_program: String,
    /// LaTeX 编译程序
    pub latex_program: String,
    /// LaTeX 编译参数（放在 tex 文件之前）
    pub latex_args: Vec<String>,
    /// 标识符冲突后缀样式
    pub suffix_style: SuffixStyle,
    /// 只生成 LaTeX 源文件，不编译也不复制
    pub skip_compile: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            year: "14".to_string(),
            author_file: PathBuf::from("cmt_users_2014-03-13.txt"),
            paper_file: PathBuf::from("Camera_Ready_Papers_2014-03-13.txt"),
            export_encoding: TextEncoding::Utf16,
            paper_input_dir: PathBuf::from("myconference/original_papers"),
            latex_source_dir: PathBuf::from("myconference/latex_sources"),
            paper_output_dir: PathBuf::from("myconference/final_proceedings"),
            title_fix_file: PathBuf::from("title_fixes.txt"),
            abstract_fix_file: PathBuf::from("abstract_fixes.txt"),
            bib_filename: PathBuf::from("myconference/final_proceedings/myconference2014.bib"),
            abstracts_filename: PathBuf::from("myconference/abstracts.tex"),
            snapshot_filename: PathBuf::from("myconference/papers.json"),
            notable_paper_ids: vec![283, 46, 43],
            bib_preamble: DEFAULT_BIB_PREAMBLE.to_string(),
            page_sizes: default_page_sizes(),
            pdfinfo_program: "pdfinfo".to_string(),
            latex_program: "pdflatex".to_string(),
            latex_args: vec!["-interaction=nonstopmode".to_string()],
            suffix_style: SuffixStyle::Letters,
            skip_compile: false,
            verbose_logging: false,
            output_log_file: PathBuf::from("output.txt"),
        }
    }
}

impl Config {
    /// 加载配置
    ///
    /// 优先读取 `PROCEEDINGS_CONFIG` 指向的 TOML 文件；未设置时若当前目录存在
    /// `proceedings.toml` 则读取它，否则使用默认值。最后应用环境变量覆盖。
    pub fn load() -> Result<Self, ConfigError> {
        let config = match std::env::var("PROCEEDINGS_CONFIG") {
            Ok(path) => Self::from_toml_file(Path::new(&path))?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_toml_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            Err(_) => Self::default(),
        };

        let config = config.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件读取配置
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 从 TOML 文本解析配置
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 应用环境变量覆盖
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(verbose) = std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()) {
            self.verbose_logging = verbose;
        }
        if let Some(skip) = std::env::var("SKIP_COMPILE").ok().and_then(|v| v.parse().ok()) {
            self.skip_compile = skip;
        }
        if let Ok(path) = std::env::var("OUTPUT_LOG_FILE") {
            self.output_log_file = PathBuf::from(path);
        }
        self
    }

    /// 检查配置是否可用
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.year.len() != 2 || !self.year.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidYear {
                year: self.year.clone(),
            });
        }
        Ok(())
    }
}

const DEFAULT_BIB_PREAMBLE: &str = r#"@Proceedings{AISTATS-2014,
  booktitle = {Proceedings of the Seventeenth International Conference on Artificial Intelligence and Statistics},
  editor = {Samuel Kaski and Jukka Corander},
  volume = {33},
  year = {2014},
  shortname = {AISTATS}
}

@InProceedings{kaski14,
  title = {Preface},
  author = {Kaski, Samuel and Corander, Jukka},
  pages = {i-iv},
  abstract = {Preface to AISTATS 2014}
}

"#;

fn default_page_sizes() -> BTreeMap<String, String> {
    [
        ("595 x 841 pts", "a4"),
        ("595 x 842 pts (A4)", "a4"),
        ("595.22 x 842 pts (A4)", "a4"),
        ("595.27 x 841.82 pts (A4)", "a4"),
        ("595.276 x 841.89 pts (A4)", "a4"),
        ("595.28 x 841.89 pts (A4)", "a4"),
        ("612 x 792 pts (letter)", "letter"),
    ]
    .into_iter()
    .map(|(size, paper)| (size.to_string(), paper.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config = Config::from_toml_str(
            r#"
year = "15"
notable_paper_ids = [7, 3]
suffix_style = "numeric"
"#,
        )
        .unwrap();

        assert_eq!(config.year, "15");
        assert_eq!(config.notable_paper_ids, vec![7, 3]);
        assert_eq!(config.suffix_style, SuffixStyle::Numeric);
        assert_eq!(config.pdfinfo_program, "pdfinfo");
        assert_eq!(config.page_sizes.get("612 x 792 pts (letter)").unwrap(), "letter");
    }

    #[test]
    fn test_validate_rejects_four_digit_year() {
        let config = Config {
            year: "2014".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidYear { .. })
        ));
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_default_preamble_ends_with_blank_line() {
        let config = Config::default();
        assert!(config.bib_preamble.starts_with("@Proceedings{"));
        assert!(config.bib_preamble.ends_with("}\n\n"));
    }
}
