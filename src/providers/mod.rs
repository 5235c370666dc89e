//! 外部服务客户端
//!
//! - `ChatService`: 大模型对话补全（摘要、词典式翻译、词汇抽取共用）
//! - `translation::TranslationService`: 通用机器翻译
//!
//! 客户端由编排层显式构造并注入，测试中可替换为假实现。
pub mod translation;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::LlmConfig;
use crate::error::ServiceError;

pub use translation::{LibreTranslateClient, TranslationService};

/// 大模型对话服务：(系统指令, 用户提示) -> 补全文本
#[async_trait]
pub trait ChatService: Send + Sync {
    fn name(&self) -> &str;
    async fn complete(&self, system: &str, user: &str) -> Result<String, ServiceError>;
}

/// 构建后的 HTTP 请求
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

/// OpenAI 兼容的 `/chat/completions` 客户端（非流式）
#[derive(Debug, Clone)]
pub struct OpenAiChatClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiChatClient {
    /// 密钥为空时返回 `NotConfigured`
    pub fn new(client: Client, config: &LlmConfig) -> Result<Self, ServiceError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ServiceError::NotConfigured("missing LLM api key".into()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: api_key.to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, system: &str, user: &str) -> ProviderRequest {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        tracing::debug!(
            "[OpenAIChat] build_request: url={}, model={}, api_key={}",
            url,
            self.model,
            mask_key(&self.api_key)
        );

        ProviderRequest {
            url,
            headers: vec![
                (
                    "Authorization".to_string(),
                    format!("Bearer {}", self.api_key),
                ),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            body: json!({
                "model": self.model,
                "messages": [
                    { "role": "system", "content": system },
                    { "role": "user", "content": user },
                ],
                "temperature": self.temperature,
                "max_tokens": self.max_tokens,
                "stream": false,
            }),
        }
    }
}

#[async_trait]
impl ChatService for OpenAiChatClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String, ServiceError> {
        let preq = self.build_request(system, user);

        let mut builder = self.client.post(&preq.url).json(&preq.body);
        for (k, v) in &preq.headers {
            builder = builder.header(k.as_str(), v.as_str());
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                service: "openai",
                status: status.as_u16(),
                body: body.chars().take(512).collect(),
            });
        }

        let text = response.text().await?;
        let response_json: Value = serde_json::from_str(&text)?;
        extract_content(&response_json)
    }
}

/// 读取 `choices[0].message.content`
fn extract_content(response_json: &Value) -> Result<String, ServiceError> {
    response_json["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| {
            ServiceError::MalformedResponse("missing choices[0].message.content".into())
        })
}

/// 日志用的密钥掩码：前 4 个字符 + **** + 长度
pub(crate) fn mask_key(key: &str) -> String {
    if key.is_empty() {
        "EMPTY".to_string()
    } else {
        format!(
            "{}**** (len={})",
            key.chars().take(4).collect::<String>(),
            key.len()
        )
    }
}
