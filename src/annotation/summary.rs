//! 文章摘要

use std::sync::Arc;

use super::prompts::{summary_user_prompt, SUMMARY_SYSTEM_PROMPT};
use crate::providers::ChatService;
use crate::utils::log_preview;

/// 未配置大模型服务时的摘要占位
pub const SUMMARY_NOT_CONFIGURED: &str = "Summary unavailable: AI service is not configured.";

/// 调用失败时的摘要占位
pub const SUMMARY_FAILED: &str = "Summary generation failed.";

#[derive(Clone, Default)]
pub struct Summarizer {
    chat: Option<Arc<dyn ChatService>>,
}

impl Summarizer {
    pub fn new(chat: Option<Arc<dyn ChatService>>) -> Self {
        Self { chat }
    }

    /// 生成 2-3 句英文摘要；永不返回错误
    pub async fn summarize(&self, text: &str) -> String {
        let Some(chat) = &self.chat else {
            tracing::info!("[Summary] chat service not configured, skipping");
            return SUMMARY_NOT_CONFIGURED.to_string();
        };

        match chat
            .complete(SUMMARY_SYSTEM_PROMPT, &summary_user_prompt(text))
            .await
        {
            Ok(summary) if !summary.trim().is_empty() => summary.trim().to_string(),
            Ok(_) => {
                tracing::warn!("[Summary] {} returned an empty summary", chat.name());
                SUMMARY_FAILED.to_string()
            }
            Err(e) => {
                tracing::warn!(
                    "[Summary] {} failed ({}): {} | text={}",
                    chat.name(),
                    e.hint(),
                    e,
                    log_preview(text, 40)
                );
                SUMMARY_FAILED.to_string()
            }
        }
    }
}
