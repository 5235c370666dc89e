//! 通用机器翻译服务
//!
//! 默认实现对接 LibreTranslate 兼容接口：
//! `POST {endpoint}/translate {q, source, target, format}` -> `{translatedText}`

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::TranslationConfig;
use crate::error::ServiceError;

/// 翻译服务：(文本, 源语言, 目标语言) -> 译文
#[async_trait]
pub trait TranslationService: Send + Sync {
    fn name(&self) -> &str;
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ServiceError>;
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: String,
}

#[derive(Debug, Clone)]
pub struct LibreTranslateClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl LibreTranslateClient {
    /// 未配置端点时返回 `NotConfigured`
    pub fn new(client: Client, config: &TranslationConfig) -> Result<Self, ServiceError> {
        let endpoint = config
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| ServiceError::NotConfigured("missing translation endpoint".into()))?;

        url::Url::parse(endpoint).map_err(|e| {
            ServiceError::NotConfigured(format!("invalid translation endpoint {endpoint}: {e}"))
        })?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: config
                .api_key
                .clone()
                .filter(|k| !k.trim().is_empty()),
        })
    }
}

#[async_trait]
impl TranslationService for LibreTranslateClient {
    fn name(&self) -> &str {
        "libretranslate"
    }

    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ServiceError> {
        let url = format!("{}/translate", self.endpoint);
        let body = TranslateRequest {
            q: text,
            source,
            target,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                service: "libretranslate",
                status: status.as_u16(),
                body: body.chars().take(512).collect(),
            });
        }

        let text = response.text().await?;
        let parsed: TranslateResponse = serde_json::from_str(&text)?;
        Ok(parsed.translated_text)
    }
}
