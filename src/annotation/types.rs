//! 标注管线数据类型

use serde::{Deserialize, Serialize};

/// 句子记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// 原文句子（含句末标点）
    pub chinese: String,

    /// 空格分隔的声调拼音，按位置对应句中汉字
    pub pinyin: String,

    /// 英文译文，失败时为占位文本
    pub english: String,
}

/// 词汇卡片
///
/// 所有字段都必须存在且为字符串，大模型返回的任何一项缺字段
/// 都会导致整批结果被丢弃。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyItem {
    /// 词语本身，也是跨文章去重的键
    pub chinese: String,

    /// 整个词的声调拼音
    pub pinyin: String,

    /// 词典式释义，多个义项用 " / " 分隔
    pub english: String,

    /// 例句
    pub example: String,

    /// 助记 emoji
    pub emoji: String,
}

/// 管线输出，构造后不再修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedArticle {
    pub summary: String,
    pub sentences: Vec<Sentence>,
    pub vocabulary: Vec<VocabularyItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_item_requires_all_fields() {
        let missing_emoji = r#"{"chinese":"学习","pinyin":"xué xí","english":"to study","example":"我学习。"}"#;
        assert!(serde_json::from_str::<VocabularyItem>(missing_emoji).is_err());

        let wrong_type = r#"{"chinese":"学习","pinyin":"xué xí","english":["to study"],"example":"我学习。","emoji":"📚"}"#;
        assert!(serde_json::from_str::<VocabularyItem>(wrong_type).is_err());
    }

    #[test]
    fn test_article_serialization_shape() {
        let article = AnnotatedArticle {
            summary: "s".into(),
            sentences: vec![Sentence {
                chinese: "你好。".into(),
                pinyin: "nǐ hǎo".into(),
                english: "Hello.".into(),
            }],
            vocabulary: vec![],
        };
        let v = serde_json::to_value(&article).unwrap();
        assert_eq!(v["sentences"][0]["pinyin"], "nǐ hǎo");
        assert!(v["vocabulary"].as_array().unwrap().is_empty());
    }
}
