//! 拼音与汉字的逐字对齐（供渲染端使用）
//!
//! 标注结果可能少于汉字数（无法转写的字会被过滤掉），
//! 多出来的汉字一律视为“无拼音”，不报错。

use serde::Serialize;

use super::classify::is_chinese_char;

/// 单个字符及其拼音
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharReading {
    pub character: char,
    pub pinyin: Option<String>,
}

/// 将空格分隔的拼音按顺序分配给句中的汉字
pub fn align_pinyin(chinese: &str, pinyin: &str) -> Vec<CharReading> {
    let mut tokens = pinyin.split_whitespace();
    chinese
        .chars()
        .map(|character| {
            let pinyin = if is_chinese_char(character) {
                tokens.next().map(str::to_string)
            } else {
                None
            };
            CharReading { character, pinyin }
        })
        .collect()
}
