use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// CMT 用户记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    /// 导出文件中的其余列
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl User {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            extra: BTreeMap::new(),
        }
    }

    /// 查找用的完整姓名：`FirstName LastName`
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// 以完整姓名为键的用户表
///
/// 只用于区分多于两个词的姓名中哪些是名、哪些是姓。
#[derive(Debug, Clone, Default)]
pub struct UserTable {
    users: HashMap<String, User>,
}

impl UserTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入用户，同名用户以后出现的为准
    pub fn insert(&mut self, user: User) {
        self.users.insert(user.full_name(), user);
    }

    /// 按完整姓名精确查找
    pub fn get(&self, full_name: &str) -> Option<&User> {
        self.users.get(full_name)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl FromIterator<User> for UserTable {
    fn from_iter<I: IntoIterator<Item = User>>(iter: I) -> Self {
        let mut table = UserTable::new();
        for user in iter {
            table.insert(user);
        }
        table
    }
}
