//! 外部服务与转写错误类型
//!
//! 这些错误只在阶段内部流转：每个阶段的公开入口都会把它们转换成
//! 占位文本或空结果，并记录日志。

use thiserror::Error;

/// 外部服务（大模型 / 翻译）调用错误
#[derive(Debug, Error)]
pub enum ServiceError {
    /// 网络层错误（连接失败、超时、响应体读取失败）
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// 缺少凭据或端点
    #[error("service not configured: {0}")]
    NotConfigured(String),

    /// 非 2xx 响应
    #[error("{service} http {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// 响应结构不符合预期
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ServiceError {
    /// 按状态码给出简短的运维提示，不暴露响应正文
    pub fn hint(&self) -> &'static str {
        match self {
            ServiceError::Status { status: 401, .. } => "API key invalid or expired",
            ServiceError::Status { status: 403, .. } => "access denied",
            ServiceError::Status { status: 429, .. } => "rate limited",
            ServiceError::Status {
                status: 500..=599, ..
            } => "upstream unavailable",
            ServiceError::Status { .. } => "request rejected",
            ServiceError::Http(e) if e.is_timeout() => "timed out",
            ServiceError::Http(_) => "network failure",
            ServiceError::NotConfigured(_) => "not configured",
            ServiceError::MalformedResponse(_) => "unexpected response shape",
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self {
        ServiceError::MalformedResponse(e.to_string())
    }
}

/// 拼音转写失败
#[derive(Debug, Error)]
pub enum TransliterationError {
    #[error("transliteration backend failed: {0}")]
    Backend(String),

    #[error("transliteration backend panicked: {0}")]
    Panicked(String),
}
