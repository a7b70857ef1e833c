/// 作者规范化服务
///
/// 把论文的原始作者列转换为 bib 格式的作者列表
use crate::error::AuthorError;
use crate::models::{Author, Paper, UserTable};
use crate::services::author_parser::{parse_author_field, ParsedAuthor};
use tracing::debug;

/// 作者规范化服务
pub struct AuthorNormalizer<'a> {
    users: &'a UserTable,
}

impl<'a> AuthorNormalizer<'a> {
    /// 创建规范化服务
    ///
    /// # 参数
    /// - `users`: 用户表，用于区分多词姓名的名和姓
    pub fn new(users: &'a UserTable) -> Self {
        Self { users }
    }

    /// 规范化所有论文
    pub fn normalize_all(&self, papers: &mut [Paper]) -> Result<(), AuthorError> {
        papers.iter_mut().try_for_each(|paper| self.normalize(paper))
    }

    /// 规范化单篇论文的作者
    ///
    /// 填充 `authors`、`bibtex_author`、`lead_author` 和 `linear_author`。
    pub fn normalize(&self, paper: &mut Paper) -> Result<(), AuthorError> {
        let parsed = parse_author_field(&paper.raw_authors).map_err(|(entry, source)| {
            AuthorError::Malformed {
                paper_id: paper.id,
                entry,
                source,
            }
        })?;

        if parsed.is_empty() {
            return Err(AuthorError::NoAuthors { paper_id: paper.id });
        }

        let authors = parsed
            .into_iter()
            .map(|author| self.resolve(paper.id, author))
            .collect::<Result<Vec<_>, _>>()?;

        let bibtex_author = authors
            .iter()
            .map(Author::bibtex_name)
            .collect::<Vec<_>>()
            .join(" and ");
        let lead_author = bibtex_author
            .split(',')
            .next()
            .unwrap_or_default()
            .to_string();
        let linear_author = authors
            .iter()
            .map(|a| a.display_name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        debug!("{} 作者: {}", paper, bibtex_author);

        paper.authors = authors;
        paper.bibtex_author = bibtex_author;
        paper.lead_author = lead_author;
        paper.linear_author = linear_author;
        Ok(())
    }

    /// 确定一位作者的名和姓
    ///
    /// 两个词以内：最后一个词是姓，其余是名。
    /// 多于两个词：无法从字符串判断边界，必须在用户表中精确查找。
    fn resolve(&self, paper_id: u64, parsed: ParsedAuthor) -> Result<Author, AuthorError> {
        let mut tokens = parsed.tokens;
        let last = tokens.len() - 1;
        tokens[0] = capitalize_first(&tokens[0]);
        tokens[last] = capitalize_first(&tokens[last]);
        let display_name = tokens.join(" ");

        let (first_name, last_name) = if tokens.len() > 2 {
            let user = self
                .users
                .get(&display_name)
                .ok_or_else(|| AuthorError::NotInUsers {
                    paper_id,
                    name: display_name.clone(),
                })?;
            (user.first_name.clone(), user.last_name.clone())
        } else {
            (tokens[..last].join(" "), tokens[last].clone())
        };

        Ok(Author {
            first_name,
            last_name,
            display_name,
            corresponding: parsed.corresponding,
            organization: parsed.organization,
        })
    }
}

/// 首字母大写，其余字符保持原样
///
/// 大写形式有多个字符时按标题大小写处理：只有第一个字符大写（`ß` → `Ss`，`ﬁ` → `Fi`）。
pub fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut upper = first.to_uppercase();
            upper
                .next()
                .into_iter()
                .chain(upper.flat_map(char::to_lowercase))
                .chain(chars)
                .collect()
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthorParseError;
    use crate::models::User;

    fn users() -> UserTable {
        [User::new("Maria", "de la Cruz"), User::new("Jan Willem", "Smit")]
            .into_iter()
            .collect()
    }

    fn normalized(raw: &str) -> Result<Paper, AuthorError> {
        let users = users();
        let mut paper = Paper::new(1, "Title", raw);
        AuthorNormalizer::new(&users).normalize(&mut paper)?;
        Ok(paper)
    }

    #[test]
    fn test_two_token_names_capitalized() {
        let paper = normalized("john smith (MIT); ada LOVELACE* (UCL)").unwrap();
        assert_eq!(paper.bibtex_author, "Smith, John and LOVELACE, Ada");
        assert_eq!(paper.lead_author, "Smith");
        assert_eq!(paper.linear_author, "John Smith, Ada LOVELACE");
        assert!(paper.authors[1].corresponding);
    }

    #[test]
    fn test_mixed_case_preserved() {
        let paper = normalized("david MacKay (Cambridge)").unwrap();
        assert_eq!(paper.bibtex_author, "MacKay, David");
    }

    #[test]
    fn test_multi_token_name_from_user_table() {
        let paper = normalized("maria de la cruz (UNAM); Jan Willem smit (TU/e)").unwrap();
        assert_eq!(paper.bibtex_author, "de la Cruz, Maria and Smit, Jan Willem");
        assert_eq!(paper.lead_author, "de la Cruz");
        assert_eq!(paper.linear_author, "Maria de la Cruz, Jan Willem Smit");
    }

    #[test]
    fn test_multi_token_name_missing_from_users() {
        let err = normalized("Juan Carlos Perez (UPM)").unwrap_err();
        assert!(matches!(err, AuthorError::NotInUsers { ref name, .. } if name == "Juan Carlos Perez"));
    }

    #[test]
    fn test_malformed_entry() {
        let err = normalized("Smith, John (MIT)").unwrap_err();
        assert!(matches!(
            err,
            AuthorError::Malformed {
                source: AuthorParseError::UnexpectedChar { found: ',', .. },
                ..
            }
        ));
    }

    #[test]
    fn test_empty_author_field() {
        assert!(matches!(
            normalized("\"\"").unwrap_err(),
            AuthorError::NoAuthors { paper_id: 1 }
        ));
    }

    #[test]
    fn test_lead_author_is_prefix_before_comma() {
        let paper = normalized("ana garcia (X); Bo Li (Y)").unwrap();
        let prefix = paper.bibtex_author.split(',').next().unwrap();
        assert_eq!(paper.lead_author, prefix);
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("ölund"), "Ölund");
        assert_eq!(capitalize_first("d'Alembert"), "D'Alembert");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_capitalize_first_uses_title_case() {
        assert_eq!(capitalize_first("ßmidt"), "Ssmidt");
        assert_eq!(capitalize_first("ﬁscher"), "Fischer");
    }
}
