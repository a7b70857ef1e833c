//! 姓名转写
//!
//! 标识符只能包含 ASCII。转写是可替换的一步：实现 [`Transliterator`]
//! 即可替换默认的 [`AsciiFolder`]，闭包 `Fn(&str) -> String` 也可以直接使用。
//!
//! 默认折叠表覆盖：
//! - Latin-1 补充字母（`À`–`ÿ`）
//! - 拉丁扩展-A 全部字母（`Ā`–`ſ`）
//! - 常用拉丁扩展-B（罗马尼亚语逗号下加符、拼音声调字母、`ƒ`）
//! - 排版用引号、破折号和不换行空格
//!
//! 表中没有的非 ASCII 字符会被丢弃并记录警告。

use phf::phf_map;
use tracing::warn;

/// 转写接口
pub trait Transliterator {
    /// 把文本转写为 ASCII
    fn transliterate(&self, text: &str) -> String;
}

impl<F> Transliterator for F
where
    F: Fn(&str) -> String,
{
    fn transliterate(&self, text: &str) -> String {
        self(text)
    }
}

/// 默认转写：ASCII 原样保留，其余字符查折叠表
#[derive(Debug, Clone, Copy)]
pub struct AsciiFolder {
    table: &'static phf::Map<char, &'static str>,
}

impl AsciiFolder {
    pub fn new() -> Self {
        Self {
            table: &FALLBACK_TABLE,
        }
    }

    /// 使用自定义折叠表
    pub fn with_table(table: &'static phf::Map<char, &'static str>) -> Self {
        Self { table }
    }

    /// 转写并返回被丢弃的字符
    pub fn fold(&self, text: &str) -> (String, Vec<char>) {
        let mut folded = String::with_capacity(text.len());
        let mut dropped = Vec::new();
        for c in text.chars() {
            if c.is_ascii() {
                folded.push(c);
            } else if let Some(replacement) = self.table.get(&c) {
                folded.push_str(replacement);
            } else {
                dropped.push(c);
            }
        }
        (folded, dropped)
    }
}

impl Default for AsciiFolder {
    fn default() -> Self {
        Self::new()
    }
}

impl Transliterator for AsciiFolder {
    fn transliterate(&self, text: &str) -> String {
        let (folded, dropped) = self.fold(text);
        if !dropped.is_empty() {
            warn!("⚠️ 转写 '{}' 时丢弃了无法识别的字符: {:?}", text, dropped);
        }
        folded
    }
}

/// 默认折叠表
pub static FALLBACK_TABLE: phf::Map<char, &'static str> = phf_map! {
    // Latin-1 补充
    '\u{A0}' => " ",
    'À' => "A", 'Á' => "A", 'Â' => "A", 'Ã' => "A", 'Ä' => "A", 'Å' => "A", 'Æ' => "AE",
    'Ç' => "C",
    'È' => "E", 'É' => "E", 'Ê' => "E", 'Ë' => "E",
    'Ì' => "I", 'Í' => "I", 'Î' => "I", 'Ï' => "I",
    'Ð' => "D", 'Ñ' => "N",
    'Ò' => "O", 'Ó' => "O", 'Ô' => "O", 'Õ' => "O", 'Ö' => "O", 'Ø' => "O",
    'Ù' => "U", 'Ú' => "U", 'Û' => "U", 'Ü' => "U",
    'Ý' => "Y", 'Þ' => "Th", 'ß' => "ss",
    'à' => "a", 'á' => "a", 'â' => "a", 'ã' => "a", 'ä' => "a", 'å' => "a", 'æ' => "ae",
    'ç' => "c",
    'è' => "e", 'é' => "e", 'ê' => "e", 'ë' => "e",
    'ì' => "i", 'í' => "i", 'î' => "i", 'ï' => "i",
    'ð' => "d", 'ñ' => "n",
    'ò' => "o", 'ó' => "o", 'ô' => "o", 'õ' => "o", 'ö' => "o", 'ø' => "o",
    'ù' => "u", 'ú' => "u", 'û' => "u", 'ü' => "u",
    'ý' => "y", 'þ' => "th", 'ÿ' => "y",
    // 拉丁扩展-A
    'Ā' => "A", 'ā' => "a", 'Ă' => "A", 'ă' => "a", 'Ą' => "A", 'ą' => "a",
    'Ć' => "C", 'ć' => "c", 'Ĉ' => "C", 'ĉ' => "c", 'Ċ' => "C", 'ċ' => "c", 'Č' => "C", 'č' => "c",
    'Ď' => "D", 'ď' => "d", 'Đ' => "D", 'đ' => "d",
    'Ē' => "E", 'ē' => "e", 'Ĕ' => "E", 'ĕ' => "e", 'Ė' => "E", 'ė' => "e",
    'Ę' => "E", 'ę' => "e", 'Ě' => "E", 'ě' => "e",
    'Ĝ' => "G", 'ĝ' => "g", 'Ğ' => "G", 'ğ' => "g", 'Ġ' => "G", 'ġ' => "g", 'Ģ' => "G", 'ģ' => "g",
    'Ĥ' => "H", 'ĥ' => "h", 'Ħ' => "H", 'ħ' => "h",
    'Ĩ' => "I", 'ĩ' => "i", 'Ī' => "I", 'ī' => "i", 'Ĭ' => "I", 'ĭ' => "i",
    'Į' => "I", 'į' => "i", 'İ' => "I", 'ı' => "i",
    'Ĳ' => "IJ", 'ĳ' => "ij", 'Ĵ' => "J", 'ĵ' => "j",
    'Ķ' => "K", 'ķ' => "k", 'ĸ' => "k",
    'Ĺ' => "L", 'ĺ' => "l", 'Ļ' => "L", 'ļ' => "l", 'Ľ' => "L", 'ľ' => "l",
    'Ŀ' => "L", 'ŀ' => "l", 'Ł' => "L", 'ł' => "l",
    'Ń' => "N", 'ń' => "n", 'Ņ' => "N", 'ņ' => "n", 'Ň' => "N", 'ň' => "n",
    'ŉ' => "'n", 'Ŋ' => "NG", 'ŋ' => "ng",
    'Ō' => "O", 'ō' => "o", 'Ŏ' => "O", 'ŏ' => "o", 'Ő' => "O", 'ő' => "o",
    'Œ' => "OE", 'œ' => "oe",
    'Ŕ' => "R", 'ŕ' => "r", 'Ŗ' => "R", 'ŗ' => "r", 'Ř' => "R", 'ř' => "r",
    'Ś' => "S", 'ś' => "s", 'Ŝ' => "S", 'ŝ' => "s", 'Ş' => "S", 'ş' => "s", 'Š' => "S", 'š' => "s",
    'Ţ' => "T", 'ţ' => "t", 'Ť' => "T", 'ť' => "t", 'Ŧ' => "T", 'ŧ' => "t",
    'Ũ' => "U", 'ũ' => "u", 'Ū' => "U", 'ū' => "u", 'Ŭ' => "U", 'ŭ' => "u",
    'Ů' => "U", 'ů' => "u", 'Ű' => "U", 'ű' => "u", 'Ų' => "U", 'ų' => "u",
    'Ŵ' => "W", 'ŵ' => "w",
    'Ŷ' => "Y", 'ŷ' => "y", 'Ÿ' => "Y",
    'Ź' => "Z", 'ź' => "z", 'Ż' => "Z", 'ż' => "z", 'Ž' => "Z", 'ž' => "z",
    'ſ' => "s",
    // 拉丁扩展-B
    'ƒ' => "f",
    'Ǎ' => "A", 'ǎ' => "a", 'Ǐ' => "I", 'ǐ' => "i", 'Ǒ' => "O", 'ǒ' => "o", 'Ǔ' => "U", 'ǔ' => "u",
    'Ș' => "S", 'ș' => "s", 'Ț' => "T", 'ț' => "t",
    // 标点
    '\u{2018}' => "'", '\u{2019}' => "'", '\u{201C}' => "\"", '\u{201D}' => "\"",
    '\u{2013}' => "-", '\u{2014}' => "-",
};
