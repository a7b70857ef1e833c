/// 标识符分配服务
///
/// 根据第一作者的姓和会议年份生成 bib 标识符，并为冲突的标识符追加后缀
use crate::error::IdentifierError;
use crate::models::Paper;
use crate::services::transliteration::{AsciiFolder, Transliterator};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// 冲突后缀样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuffixStyle {
    /// `a`, `b`, …, `z`, `aa`, `ab`, …（双射 26 进制，不会溢出）
    #[default]
    Letters,
    /// `1`, `2`, `3`, …
    Numeric,
}

impl SuffixStyle {
    /// 第 `n` 个后缀（从0开始）
    pub fn suffix(self, n: usize) -> String {
        match self {
            SuffixStyle::Letters => {
                let mut n = n + 1;
                let mut letters = Vec::new();
                while n > 0 {
                    n -= 1;
                    letters.push(b'a' + (n % 26) as u8);
                    n /= 26;
                }
                letters.iter().rev().map(|&b| b as char).collect()
            }
            SuffixStyle::Numeric => (n + 1).to_string(),
        }
    }
}

/// 标识符分配服务
pub struct IdentifierAssigner {
    year: String,
    style: SuffixStyle,
    transliterator: Box<dyn Transliterator>,
}

impl IdentifierAssigner {
    /// 使用默认转写创建
    pub fn new(year: impl Into<String>, style: SuffixStyle) -> Self {
        Self::with_transliterator(year, style, AsciiFolder::new())
    }

    /// 使用自定义转写创建
    pub fn with_transliterator(
        year: impl Into<String>,
        style: SuffixStyle,
        transliterator: impl Transliterator + 'static,
    ) -> Self {
        Self {
            year: year.into(),
            style,
            transliterator: Box::new(transliterator),
        }
    }

    /// 未去冲突的候选标识符：转写后小写的姓 + 年份，去掉空白
    pub fn candidate(&self, lead_author: &str) -> String {
        let name = if lead_author.is_ascii() {
            lead_author.to_lowercase()
        } else {
            let folded = self.transliterator.transliterate(lead_author).to_lowercase();
            debug!("转写标识符: {} -> {}", lead_author, folded);
            folded
        };
        format!("{}{}", name, self.year)
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect()
    }

    /// 为论文列表分配标识符
    ///
    /// 候选标识符相同的论文按列表顺序依次获得后缀（第一篇 `a`，第二篇 `b`…），
    /// 只出现一次的候选标识符不加后缀。结果只取决于列表顺序，
    /// 已经分配过标识符的列表会被拒绝。
    pub fn assign(&self, papers: &mut [Paper]) -> Result<(), IdentifierError> {
        if let Some(paper) = papers.iter().find(|p| p.bibid.is_some()) {
            return Err(IdentifierError::AlreadyAssigned {
                paper_id: paper.id,
                bibid: paper.bibid_str().to_string(),
            });
        }

        let candidates = papers
            .iter()
            .map(|paper| {
                if paper.lead_author.is_empty() {
                    return Err(IdentifierError::MissingLeadAuthor { paper_id: paper.id });
                }
                let candidate = self.candidate(&paper.lead_author);
                if candidate.len() == self.year.len() {
                    return Err(IdentifierError::EmptyIdentifier {
                        paper_id: paper.id,
                        lead_author: paper.lead_author.clone(),
                    });
                }
                Ok(candidate)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut occurrences: HashMap<&str, usize> = HashMap::new();
        for candidate in &candidates {
            *occurrences.entry(candidate.as_str()).or_default() += 1;
        }

        // 带后缀的标识符不能与任何候选标识符重复，重复时跳到下一个后缀
        let mut taken: HashSet<String> = candidates.iter().cloned().collect();
        let mut next_suffix: HashMap<&str, usize> = HashMap::new();
        let mut clashes = 0;
        for (paper, candidate) in papers.iter_mut().zip(&candidates) {
            let bibid = if occurrences[candidate.as_str()] > 1 {
                let n = next_suffix.entry(candidate.as_str()).or_default();
                let bibid = loop {
                    let bibid = format!("{}{}", candidate, self.style.suffix(*n));
                    *n += 1;
                    if taken.insert(bibid.clone()) {
                        break bibid;
                    }
                    debug!("跳过已被占用的标识符: {}", bibid);
                };
                clashes += 1;
                bibid
            } else {
                candidate.clone()
            };
            paper.bibid = Some(bibid);
        }

        info!(
            "✓ 分配了 {} 个标识符，其中 {} 个带冲突后缀",
            papers.len(),
            clashes
        );
        Ok(())
    }
}
