//! 文章标注管线 - 编排层
//!
//! 顺序执行：摘要 -> 逐句（拼音 + 翻译） -> 词汇。
//! 管线本身无状态，不同文章可以并发处理。
use std::collections::HashSet;
use std::sync::Arc;

use super::summary::Summarizer;
use super::translate::{
    LlmDictionaryStrategy, SentenceTranslator, ServiceStrategy, TranslationStrategy,
};
use super::types::{AnnotatedArticle, Sentence, VocabularyItem};
use super::vocabulary::VocabularyExtractor;
use crate::config::AppConfig;
use crate::error::ServiceError;
use crate::hanzi::pinyin::{PinyinAnnotator, PinyinTransliterator, Transliterator};
use crate::hanzi::segment::segment_sentences;
use crate::providers::{ChatService, LibreTranslateClient, OpenAiChatClient, TranslationService};

/// 管线依赖（由调用方构造并注入）
pub struct PipelineServices {
    /// 大模型服务，`None` 表示未配置
    pub chat: Option<Arc<dyn ChatService>>,
    /// 通用翻译服务，`None` 表示未配置
    pub translation: Option<Arc<dyn TranslationService>>,
    pub transliterator: Arc<dyn Transliterator>,
    pub source_lang: String,
    pub target_lang: String,
    /// 先走大模型词典式翻译，再回退到通用翻译服务
    pub prefer_llm_translation: bool,
}

impl Default for PipelineServices {
    fn default() -> Self {
        Self {
            chat: None,
            translation: None,
            transliterator: Arc::new(PinyinTransliterator::new()),
            source_lang: "zh".into(),
            target_lang: "en".into(),
            prefer_llm_translation: true,
        }
    }
}

#[derive(Clone)]
pub struct ArticlePipeline {
    summarizer: Summarizer,
    annotator: PinyinAnnotator,
    translator: SentenceTranslator,
    extractor: VocabularyExtractor,
}

impl ArticlePipeline {
    pub fn new(services: PipelineServices) -> Self {
        let mut strategies: Vec<Arc<dyn TranslationStrategy>> = Vec::new();
        let llm = services.chat.as_ref().map(|chat| {
            Arc::new(LlmDictionaryStrategy::new(
                chat.clone(),
                &services.source_lang,
                &services.target_lang,
            )) as Arc<dyn TranslationStrategy>
        });
        let generic = services.translation.as_ref().map(|service| {
            Arc::new(ServiceStrategy::new(
                service.clone(),
                &services.source_lang,
                &services.target_lang,
            )) as Arc<dyn TranslationStrategy>
        });
        if services.prefer_llm_translation {
            strategies.extend(llm);
            strategies.extend(generic);
        } else {
            strategies.extend(generic);
            strategies.extend(llm);
        }

        Self {
            summarizer: Summarizer::new(services.chat.clone()),
            annotator: PinyinAnnotator::new(services.transliterator),
            translator: SentenceTranslator::new(strategies),
            extractor: VocabularyExtractor::new(services.chat),
        }
    }

    /// 按配置构造真实客户端；缺少凭据的服务视为未配置
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let client = config.http_client()?;

        let chat: Option<Arc<dyn ChatService>> =
            match OpenAiChatClient::new(client.clone(), &config.llm) {
                Ok(c) => {
                    tracing::info!("[Pipeline] chat service ready: model={}", c.model());
                    Some(Arc::new(c))
                }
                Err(ServiceError::NotConfigured(reason)) => {
                    tracing::info!("[Pipeline] chat service disabled: {}", reason);
                    None
                }
                Err(e) => return Err(e.into()),
            };

        let translation: Option<Arc<dyn TranslationService>> =
            match LibreTranslateClient::new(client, &config.translation) {
                Ok(c) => Some(Arc::new(c)),
                Err(ServiceError::NotConfigured(reason)) => {
                    tracing::info!("[Pipeline] translation service disabled: {}", reason);
                    None
                }
                Err(e) => return Err(e.into()),
            };

        Ok(Self::new(PipelineServices {
            chat,
            translation,
            transliterator: Arc::new(PinyinTransliterator::new()),
            source_lang: config.translation.source_lang.clone(),
            target_lang: config.translation.target_lang.clone(),
            prefer_llm_translation: config.translation.prefer_llm,
        }))
    }

    pub fn segment(&self, text: &str) -> Vec<String> {
        segment_sentences(text)
    }

    pub fn annotate(&self, sentence: &str) -> String {
        self.annotator.annotate(sentence)
    }

    pub async fn summarize(&self, text: &str) -> String {
        self.summarizer.summarize(text).await
    }

    pub async fn translate(&self, sentence: &str) -> String {
        self.translator.translate(sentence).await
    }

    pub async fn extract_vocabulary(&self, text: &str) -> Vec<VocabularyItem> {
        self.extractor.extract(text).await
    }

    /// 处理整篇文章，外部服务故障只会体现为占位数据
    pub async fn process(&self, raw: &str) -> AnnotatedArticle {
        let started = std::time::Instant::now();

        let summary = self.summarize(raw).await;

        let chinese_sentences = self.segment(raw);
        let mut sentences = Vec::with_capacity(chinese_sentences.len());
        for chinese in chinese_sentences {
            let pinyin = self.annotate(&chinese);
            let english = self.translate(&chinese).await;
            sentences.push(Sentence {
                chinese,
                pinyin,
                english,
            });
        }

        let vocabulary = self.extract_vocabulary(raw).await;

        tracing::info!(
            "[Pipeline] processed article: chars={}, sentences={}, vocabulary={}, elapsed={}ms",
            raw.chars().count(),
            sentences.len(),
            vocabulary.len(),
            started.elapsed().as_millis()
        );

        AnnotatedArticle {
            summary,
            sentences,
            vocabulary,
        }
    }
}

/// 按 `chinese` 精确匹配去重合并，先出现的保留
pub fn merge_vocabulary(
    existing: &mut Vec<VocabularyItem>,
    incoming: impl IntoIterator<Item = VocabularyItem>,
) {
    let mut seen: HashSet<String> = existing.iter().map(|v| v.chinese.clone()).collect();
    for item in incoming {
        if seen.insert(item.chinese.clone()) {
            existing.push(item);
        }
    }
}
