//! 词汇卡片抽取
//!
//! 单次大模型调用，期望返回 JSON 数组。解析在边界处严格进行：
//! 任何一项字段缺失或类型不符都视为整体失败，返回空列表。

use std::sync::Arc;

use super::prompts::{vocabulary_user_prompt, VOCABULARY_SYSTEM_PROMPT};
use super::types::VocabularyItem;
use crate::error::ServiceError;
use crate::providers::ChatService;
use crate::utils::log_preview;

#[derive(Clone, Default)]
pub struct VocabularyExtractor {
    chat: Option<Arc<dyn ChatService>>,
}

impl VocabularyExtractor {
    pub fn new(chat: Option<Arc<dyn ChatService>>) -> Self {
        Self { chat }
    }

    /// 抽取 5-8 个词汇；未配置、调用失败或响应无法解析时返回空列表
    ///
    /// 不做去重，跨文章去重由调用方负责。
    pub async fn extract(&self, text: &str) -> Vec<VocabularyItem> {
        let Some(chat) = &self.chat else {
            tracing::info!("[Vocabulary] chat service not configured, skipping");
            return Vec::new();
        };
        if text.trim().is_empty() {
            return Vec::new();
        }

        let response = match chat
            .complete(VOCABULARY_SYSTEM_PROMPT, &vocabulary_user_prompt(text))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    "[Vocabulary] {} failed ({}): {}",
                    chat.name(),
                    e.hint(),
                    e
                );
                return Vec::new();
            }
        };

        match parse_vocabulary_response(&response) {
            Ok(items) => {
                tracing::debug!("[Vocabulary] extracted {} items", items.len());
                items
            }
            Err(e) => {
                tracing::warn!(
                    "[Vocabulary] discarding unparseable response: {} | response={}",
                    e,
                    log_preview(&response, 80)
                );
                Vec::new()
            }
        }
    }
}

/// 去掉可能包裹在外面的 markdown 代码块
pub fn strip_code_fence(response: &str) -> &str {
    let text = response.trim();
    if !text.starts_with("```") {
        return text;
    }
    let body = text.trim_start_matches("```");
    // 跳过语言标记，如 ```json
    let body = match body.find('\n') {
        Some(pos) if body[..pos].chars().all(|c| c.is_ascii_alphanumeric()) => &body[pos + 1..],
        _ => body,
    };
    body.trim_end().trim_end_matches("```").trim()
}

/// 严格解码为词汇卡片数组
pub fn parse_vocabulary_response(response: &str) -> Result<Vec<VocabularyItem>, ServiceError> {
    let json_str = strip_code_fence(response);
    Ok(serde_json::from_str::<Vec<VocabularyItem>>(json_str)?)
}
