/// 论文文件查找服务
///
/// 每篇论文在 `Paper <ID>` 目录下有正文 PDF，可能还有一个补充材料文件
use crate::error::{AppError, AppResult, LayoutError};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// 文件名中表示补充材料的关键词，按优先级排列
pub const SUPPLEMENT_INDICATORS: [&str; 3] = ["supp", "extra", "appendix"];

/// 一篇论文的输入文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperFiles {
    pub main_pdf: PathBuf,
    pub supp_file: Option<PathBuf>,
}

/// 论文的输入目录
pub fn paper_dir(input_dir: &Path, paper_id: u64) -> PathBuf {
    input_dir.join(format!("Paper {}", paper_id))
}

/// 根据目录中的文件名判断正文和补充材料
///
/// - 只有一个文件：它就是正文
/// - 两个文件：`<ID>.pdf` 是正文；否则按关键词 `supp`、`extra`、`appendix`
///   的顺序找出补充材料，找不到或两个文件都匹配同一个关键词时报错
/// - 其他数量：报错
pub fn classify_files(
    dir: &Path,
    paper_id: u64,
    names: &[String],
) -> Result<PaperFiles, LayoutError> {
    match names {
        [main] => Ok(PaperFiles {
            main_pdf: dir.join(main),
            supp_file: None,
        }),
        [a, b] => {
            let main_name = format!("{}.pdf", paper_id);
            if *a == main_name || *b == main_name {
                let (main, supp) = if *a == main_name { (a, b) } else { (b, a) };
                return Ok(PaperFiles {
                    main_pdf: dir.join(main),
                    supp_file: Some(dir.join(supp)),
                });
            }

            for indicator in SUPPLEMENT_INDICATORS {
                let a_match = a.to_lowercase().contains(indicator);
                let b_match = b.to_lowercase().contains(indicator);
                let (main, supp) = match (a_match, b_match) {
                    (false, false) => continue,
                    (true, true) => break,
                    (true, false) => (b, a),
                    (false, true) => (a, b),
                };
                warn!(
                    "⚠️ 论文 {} 使用非标准文件名: 正文 {}, 补充材料 {}",
                    paper_id, main, supp
                );
                return Ok(PaperFiles {
                    main_pdf: dir.join(main),
                    supp_file: Some(dir.join(supp)),
                });
            }

            Err(LayoutError::AmbiguousSupplement {
                dir: dir.to_path_buf(),
                files: names.to_vec(),
            })
        }
        _ => Err(LayoutError::UnexpectedFileCount {
            dir: dir.to_path_buf(),
            count: names.len(),
        }),
    }
}

/// 查找论文的输入文件
///
/// 以 `.` 开头的隐藏文件不计入。返回的路径是绝对路径，
/// LaTeX 包装文件在其他目录中编译时也能找到原始 PDF。
pub async fn locate_paper_files(input_dir: &Path, paper_id: u64) -> AppResult<PaperFiles> {
    let dir = paper_dir(input_dir, paper_id);
    let dir = fs::canonicalize(&dir)
        .await
        .map_err(|e| AppError::read_failed(&dir, e))?;
    let mut entries = fs::read_dir(&dir)
        .await
        .map_err(|e| AppError::read_failed(&dir, e))?;

    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::read_failed(&dir, e))?
    {
        let name = entry.file_name().to_string_lossy().to_string();
        if !name.starts_with('.') {
            names.push(name);
        }
    }
    names.sort();
    debug!("{}: {:?}", dir.display(), names);

    Ok(classify_files(&dir, paper_id, &names)?)
}
