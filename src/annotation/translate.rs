//! 逐句翻译
//!
//! 翻译策略按顺序尝试，第一个返回非空译文的策略胜出；
//! 每个策略单独兜错，一个失败不影响尝试下一个。

use std::sync::Arc;

use async_trait::async_trait;

use super::prompts::{dictionary_user_prompt, DICTIONARY_SYSTEM_PROMPT};
use crate::error::ServiceError;
use crate::providers::{ChatService, TranslationService};
use crate::utils::log_preview;

/// 所有策略都失败时的译文占位
pub const TRANSLATION_UNAVAILABLE: &str = "(Translation unavailable)";

/// 单个翻译策略
#[async_trait]
pub trait TranslationStrategy: Send + Sync {
    fn name(&self) -> &str;
    async fn translate(&self, sentence: &str) -> Result<String, ServiceError>;
}

/// 大模型词典式翻译
pub struct LlmDictionaryStrategy {
    chat: Arc<dyn ChatService>,
    source: String,
    target: String,
}

impl LlmDictionaryStrategy {
    pub fn new(chat: Arc<dyn ChatService>, source: &str, target: &str) -> Self {
        Self {
            chat,
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

#[async_trait]
impl TranslationStrategy for LlmDictionaryStrategy {
    fn name(&self) -> &str {
        "llm_dictionary"
    }

    async fn translate(&self, sentence: &str) -> Result<String, ServiceError> {
        self.chat
            .complete(
                DICTIONARY_SYSTEM_PROMPT,
                &dictionary_user_prompt(sentence, &self.source, &self.target),
            )
            .await
    }
}

/// 通用翻译服务
pub struct ServiceStrategy {
    service: Arc<dyn TranslationService>,
    source: String,
    target: String,
}

impl ServiceStrategy {
    pub fn new(service: Arc<dyn TranslationService>, source: &str, target: &str) -> Self {
        Self {
            service,
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

#[async_trait]
impl TranslationStrategy for ServiceStrategy {
    fn name(&self) -> &str {
        self.service.name()
    }

    async fn translate(&self, sentence: &str) -> Result<String, ServiceError> {
        self.service
            .translate(sentence, &self.source, &self.target)
            .await
    }
}

#[derive(Clone, Default)]
pub struct SentenceTranslator {
    strategies: Vec<Arc<dyn TranslationStrategy>>,
}

impl SentenceTranslator {
    pub fn new(strategies: Vec<Arc<dyn TranslationStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// 翻译单句；永不返回错误
    pub async fn translate(&self, sentence: &str) -> String {
        for strategy in &self.strategies {
            match strategy.translate(sentence).await {
                Ok(text) if !text.trim().is_empty() => return text.trim().to_string(),
                Ok(_) => {
                    tracing::warn!(
                        "[Translate] {} returned empty text for {}",
                        strategy.name(),
                        log_preview(sentence, 30)
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        "[Translate] {} failed ({}): {} | sentence={}",
                        strategy.name(),
                        e.hint(),
                        e,
                        log_preview(sentence, 30)
                    );
                }
            }
        }
        TRANSLATION_UNAVAILABLE.to_string()
    }
}
