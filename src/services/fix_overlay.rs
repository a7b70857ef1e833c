/// 修正表服务
///
/// 按标识符替换论文的标题或摘要。修正表格式：`bibid<TAB>新文本`，UTF-8 编码。
use crate::models::Paper;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, warn};

/// 被修正的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixField {
    Title,
    Abstract,
}

impl FixField {
    fn slot<'a>(self, paper: &'a mut Paper) -> &'a mut String {
        match self {
            FixField::Title => &mut paper.title,
            FixField::Abstract => &mut paper.abstract_text,
        }
    }
}

/// 修正表（小写 bibid → 替换文本）
#[derive(Debug, Clone, Default)]
pub struct FixTable {
    fixes: HashMap<String, String>,
}

impl FixTable {
    /// 解析修正表文本，没有制表符的行会被跳过
    pub fn parse(text: &str) -> Self {
        let mut fixes = HashMap::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split('\t');
            match (fields.next(), fields.next()) {
                (Some(key), Some(value)) => {
                    fixes.insert(key.trim().to_lowercase(), value.to_string());
                }
                _ => warn!("⚠️ 修正表第 {} 行缺少制表符，已跳过: {}", idx + 1, line),
            }
        }
        Self { fixes }
    }

    /// 读取修正表
    ///
    /// 文件不存在或无法读取时返回空表，只记录警告。
    pub async fn load(path: &Path) -> Self {
        match fs::read_to_string(path).await {
            Ok(text) => {
                let table = Self::parse(&text);
                info!("✓ 修正表 {} 包含 {} 条修正", path.display(), table.len());
                table
            }
            Err(e) => {
                warn!("⚠️ 无法打开修正表 {}，忽略: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn get(&self, bibid: &str) -> Option<&str> {
        self.fixes.get(&bibid.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }

    /// 把修正应用到论文列表，返回被修正的论文数量
    pub fn apply(&self, papers: &mut [Paper], field: FixField) -> usize {
        let mut applied = 0;
        for paper in papers.iter_mut() {
            let Some(bibid) = paper.bibid.as_deref() else {
                continue;
            };
            if let Some(fix) = self.get(bibid) {
                debug!("{} 修正 {:?}", paper, field);
                *field.slot(paper) = fix.to_string();
                applied += 1;
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn papers() -> Vec<Paper> {
        ["smith14a", "jones14"]
            .into_iter()
            .enumerate()
            .map(|(i, bibid)| {
                let mut paper = Paper::new(i as u64, "Old title", "");
                paper.abstract_text = "Old abstract".to_string();
                paper.bibid = Some(bibid.to_string());
                paper
            })
            .collect()
    }

    #[test]
    fn test_parse_lowercases_keys_and_skips_bad_lines() {
        let table = FixTable::parse("Smith14a\tA Better Title\nno tab here\n\n");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("smith14a"), Some("A Better Title"));
    }

    #[test]
    fn test_apply_title_only() {
        let table = FixTable::parse("SMITH14A\tNew title\n");
        let mut papers = papers();
        assert_eq!(table.apply(&mut papers, FixField::Title), 1);
        assert_eq!(papers[0].title, "New title");
        assert_eq!(papers[0].abstract_text, "Old abstract");
        assert_eq!(papers[1].title, "Old title");
    }

    #[test]
    fn test_apply_is_idempotent() {
        let table = FixTable::parse("jones14\tFixed abstract\n");
        let mut once = papers();
        table.apply(&mut once, FixField::Abstract);
        let mut twice = papers();
        table.apply(&mut twice, FixField::Abstract);
        table.apply(&mut twice, FixField::Abstract);
        assert_eq!(once[1].abstract_text, twice[1].abstract_text);
        assert_eq!(twice[1].abstract_text, "Fixed abstract");
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_table() {
        let table = FixTable::load(Path::new("/nonexistent/title_fixes.txt")).await;
        assert!(table.is_empty());
    }
}
