//! 文章标注管线
//!
//! 原文 -> 分句 -> 逐句（拼音, 译文） -> 句子记录；原文 -> 词汇卡片。
//! 外部服务的任何失败都在阶段边界转换为占位文本或空列表，不会抛给调用方。
pub mod pipeline;
pub mod prompts;
pub mod summary;
pub mod translate;
pub mod types;
pub mod vocabulary;

pub use pipeline::{merge_vocabulary, ArticlePipeline, PipelineServices};
pub use summary::{Summarizer, SUMMARY_FAILED, SUMMARY_NOT_CONFIGURED};
pub use translate::{
    LlmDictionaryStrategy, SentenceTranslator, ServiceStrategy, TranslationStrategy,
    TRANSLATION_UNAVAILABLE,
};
pub use types::{AnnotatedArticle, Sentence, VocabularyItem};
pub use vocabulary::VocabularyExtractor;
