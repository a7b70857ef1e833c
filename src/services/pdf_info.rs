/// PDF 信息服务
///
/// 调用 `pdfinfo` 获取页数、页面尺寸和 PDF 版本
use crate::config::Config;
use crate::error::{AppError, AppResult, ToolError};
use crate::models::PdfInfo;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;
use tokio::process::Command;
use tracing::{debug, warn};

static PDF_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.(\d+)").expect("PDF版本正则无效"));

/// 解析 `pdfinfo` 输出中的 `Key: value` 行
pub fn parse_pdfinfo_fields(stdout: &str) -> BTreeMap<String, String> {
    stdout
        .lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}

/// PDF 版本号的次版本，例如 `1.5` → 5
pub fn pdf_minor_version(version: &str) -> Option<u32> {
    PDF_VERSION_RE
        .captures(version.trim())
        .and_then(|caps| caps.get(2))
        .and_then(|m| m.as_str().parse().ok())
}

/// PDF 信息检查服务
pub struct PdfInspector {
    program: String,
    page_sizes: BTreeMap<String, String>,
}

impl PdfInspector {
    /// 创建检查服务
    pub fn new(config: &Config) -> Self {
        Self {
            program: config.pdfinfo_program.clone(),
            page_sizes: config.page_sizes.clone(),
        }
    }

    /// 检查一个 PDF 文件
    pub async fn inspect(&self, path: &Path) -> AppResult<PdfInfo> {
        let output = Command::new(&self.program)
            .arg(path)
            .output()
            .await
            .map_err(|e| AppError::spawn_failed(&self.program, e))?;

        if !output.status.success() {
            return Err(ToolError::Failed {
                program: self.program.clone(),
                target: path.to_path_buf(),
                status: output.status.to_string(),
            }
            .into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(self.parse_output(path, &stdout)?)
    }

    /// 把 `pdfinfo` 输出转换为 [`PdfInfo`]
    ///
    /// 未知的页面尺寸只记录警告，`paper_size` 为 `None`。
    pub fn parse_output(&self, path: &Path, stdout: &str) -> Result<PdfInfo, ToolError> {
        let mut fields = parse_pdfinfo_fields(stdout);
        let mut required = |field: &str| {
            fields.remove(field).ok_or_else(|| ToolError::MissingField {
                program: self.program.clone(),
                target: path.to_path_buf(),
                field: field.to_string(),
            })
        };

        let raw_pages = required("Pages")?;
        let page_size = required("Page size")?;
        let pdf_version = required("PDF version")?;

        let pages = raw_pages.parse().map_err(|_| ToolError::InvalidField {
            program: self.program.clone(),
            field: "Pages".to_string(),
            value: raw_pages.clone(),
        })?;

        let paper_size = self.page_sizes.get(&page_size).cloned();
        if paper_size.is_none() {
            warn!("⚠️ 未知的页面尺寸: {} ({})", page_size, path.display());
        }

        debug!(
            "{}: {} 页, {} ({:?}), PDF {}",
            path.display(),
            pages,
            page_size,
            paper_size,
            pdf_version
        );

        Ok(PdfInfo {
            pages,
            page_size,
            paper_size,
            pdf_version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PDFINFO_OUTPUT: &str = "Title:          A Paper: With Colon\nCreator:        LaTeX with hyperref\nPages:          8\nEncrypted:      no\nPage size:      612 x 792 pts (letter)\nPage rot:       0\nPDF version:    1.5\n";

    fn inspector() -> PdfInspector {
        PdfInspector::new(&Config::default())
    }

    #[test]
    fn test_parse_fields_splits_on_first_colon() {
        let fields = parse_pdfinfo_fields(PDFINFO_OUTPUT);
        assert_eq!(fields["Title"], "A Paper: With Colon");
        assert_eq!(fields["Pages"], "8");
    }

    #[test]
    fn test_parse_output_maps_paper_size() {
        let info = inspector()
            .parse_output(Path::new("p.pdf"), PDFINFO_OUTPUT)
            .unwrap();
        assert_eq!(info.pages, 8);
        assert_eq!(info.paper_size.as_deref(), Some("letter"));
        assert_eq!(info.pdf_version, "1.5");
    }

    #[test]
    fn test_unknown_page_size_is_not_fatal() {
        let output = PDFINFO_OUTPUT.replace("612 x 792 pts (letter)", "500 x 700 pts");
        let info = inspector()
            .parse_output(Path::new("p.pdf"), &output)
            .unwrap();
        assert_eq!(info.page_size, "500 x 700 pts");
        assert_eq!(info.paper_size, None);
    }

    #[test]
    fn test_missing_pages_field() {
        let err = inspector()
            .parse_output(Path::new("p.pdf"), "Page size: 612 x 792 pts (letter)\n")
            .unwrap_err();
        assert!(matches!(err, ToolError::MissingField { ref field, .. } if field == "Pages"));
    }

    #[test]
    fn test_pdf_minor_version() {
        assert_eq!(pdf_minor_version("1.5"), Some(5));
        assert_eq!(pdf_minor_version("1.3"), Some(3));
        assert_eq!(pdf_minor_version("garbage"), None);
    }

    #[tokio::test]
    #[ignore] // 需要安装 pdfinfo：cargo test -- --ignored
    async fn test_inspect_missing_file_fails() {
        let result = inspector().inspect(Path::new("/nonexistent/file.pdf")).await;
        assert!(result.is_err());
    }
}
