//! 作者字段解析
//!
//! CMT 的作者列形如 `Name (Org); Name* (Org)`。每个条目的语法：
//!
//! ```text
//! entry   := ws* name ws* marker? ws* ('(' org ')')? ws*
//! name    := token (ws+ token)*
//! token   := (字母 | 数字 | '_' | '-' | '.' | '\'')+
//! marker  := '*'
//! org     := 除 ')' 以外的任意字符
//! ```

use crate::error::AuthorParseError;

/// 解析后的作者条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAuthor {
    /// 姓名中的各个词（连续空白已合并）
    pub tokens: Vec<String>,
    /// 是否带 `*` 标记
    pub corresponding: bool,
    pub organization: Option<String>,
}

/// 把作者列切分成条目
///
/// 去掉首尾引号后按 `;` 切分，末尾的空条目（多余的分号）会被忽略。
pub fn split_author_field(field: &str) -> Vec<&str> {
    let mut entries: Vec<&str> = field.trim().trim_matches('"').split(';').collect();
    while entries.last().is_some_and(|e| e.trim().is_empty()) {
        entries.pop();
    }
    entries
}

/// 解析整个作者列
pub fn parse_author_field(field: &str) -> Result<Vec<ParsedAuthor>, (String, AuthorParseError)> {
    split_author_field(field)
        .into_iter()
        .map(|entry| parse_author_entry(entry).map_err(|e| (entry.trim().to_string(), e)))
        .collect()
}

/// 解析单个作者条目
pub fn parse_author_entry(entry: &str) -> Result<ParsedAuthor, AuthorParseError> {
    let mut cursor = Cursor::new(entry);

    cursor.skip_whitespace();
    if cursor.at_end() {
        return Err(AuthorParseError::EmptyEntry);
    }

    let tokens = cursor.name_tokens()?;

    cursor.skip_whitespace();
    let corresponding = cursor.eat('*');
    cursor.skip_whitespace();

    let organization = if cursor.peek() == Some('(') {
        let org = cursor.organization()?;
        cursor.skip_whitespace();
        Some(org)
    } else {
        None
    };

    if let Some(found) = cursor.peek() {
        let position = cursor.pos;
        return Err(if organization.is_some() {
            AuthorParseError::TrailingInput { position }
        } else {
            AuthorParseError::UnexpectedChar { position, found }
        });
    }

    Ok(ParsedAuthor {
        tokens,
        corresponding,
        organization,
    })
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '\'')
}

struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn token(&mut self) -> Option<String> {
        let start = self.pos;
        while self.peek().is_some_and(is_name_char) {
            self.pos += 1;
        }
        (self.pos > start).then(|| self.chars[start..self.pos].iter().collect())
    }

    fn name_tokens(&mut self) -> Result<Vec<String>, AuthorParseError> {
        let first = self.token().ok_or(AuthorParseError::MissingName { position: self.pos })?;
        let mut tokens = vec![first];

        loop {
            let before_ws = self.pos;
            self.skip_whitespace();
            match self.token() {
                Some(token) => tokens.push(token),
                None => {
                    self.pos = before_ws;
                    break;
                }
            }
        }

        Ok(tokens)
    }

    fn organization(&mut self) -> Result<String, AuthorParseError> {
        let open = self.pos;
        self.pos += 1;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == ')' {
                let org: String = self.chars[start..self.pos].iter().collect();
                self.pos += 1;
                return Ok(org.trim().to_string());
            }
            self.pos += 1;
        }
        Err(AuthorParseError::UnterminatedOrganization { position: open })
    }
}
