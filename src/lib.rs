//! Hanzi Reader 核心库
//!
//! 把一段中文（语音转写或粘贴）加工成带拼音、译文、摘要和词汇卡片的文章。
//! 分句与拼音标注在本地完成；摘要、翻译和词汇依赖外部服务，
//! 失败时降级为占位数据。
pub mod annotation;
pub mod config;
pub mod error;
pub mod hanzi;
pub mod providers;
pub mod utils;

pub use annotation::{
    AnnotatedArticle, ArticlePipeline, PipelineServices, Sentence, VocabularyItem,
};
pub use config::AppConfig;
pub use error::{ServiceError, TransliterationError};
