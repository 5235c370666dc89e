//! 运行配置
//!
//! 加载顺序（后者覆盖前者）：
//! 1. `config/hanzi_reader.toml`（或显式指定的文件）
//! 2. `HANZI_READER__*` 环境变量（`.env` 会先被读入）
//! 3. 常用的直连环境变量兜底：`OPENAI_API_KEY`、`LIBRETRANSLATE_URL` 等

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_CONFIG_FILE: &str = "config/hanzi_reader.toml";
const ENV_PREFIX: &str = "HANZI_READER";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    /// 为空即视为未配置，摘要与词汇抽取直接返回占位结果
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".into(),
            api_key: None,
            model: "gpt-4o-mini".into(),
            temperature: 0.3,
            max_tokens: 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// LibreTranslate 兼容端点，未设置则只走大模型翻译
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub source_lang: String,
    pub target_lang: String,
    /// 先尝试大模型词典式翻译，失败再回退到通用翻译服务
    pub prefer_llm: bool,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            source_lang: "zh".into(),
            target_lang: "en".into(),
            prefer_llm: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub translation: TranslationConfig,
    /// 未设置时使用 HTTP 客户端自身的默认超时
    pub timeout_ms: Option<u64>,
}

impl AppConfig {
    /// 完整加载：配置文件 + 环境变量 + 直连兜底
    pub fn from_env_and_file() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let mut builder = config::Config::builder();
        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            builder = builder.add_source(config::File::from(Path::new(DEFAULT_CONFIG_FILE)));
        }
        Self::finish(builder)
    }

    /// 指定配置文件（必须存在），同样叠加环境变量
    pub fn from_env_and_path(path: &Path) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let builder = config::Config::builder().add_source(config::File::from(path));
        Self::finish(builder)
    }

    /// 只读取配置文件，不读环境变量
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let loaded = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?;
        Ok(loaded.try_deserialize()?)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> anyhow::Result<Self> {
        let loaded = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        let mut cfg: AppConfig = loaded.try_deserialize()?;
        cfg.apply_fallbacks(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    /// 用直连变量填补仍为空的字段
    ///
    /// `get` 按变量名读取值，便于测试时不触碰进程环境。
    pub fn apply_fallbacks(&mut self, get: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        if self.llm.api_key.is_none() {
            self.llm.api_key = get("OPENAI_API_KEY");
        }
        if let Some(base_url) = get("OPENAI_BASE_URL") {
            if self.llm.base_url == LlmConfig::default().base_url {
                self.llm.base_url = base_url;
            }
        }
        if let Some(model) = get("OPENAI_MODEL") {
            if self.llm.model == LlmConfig::default().model {
                self.llm.model = model;
            }
        }
        if self.translation.endpoint.is_none() {
            self.translation.endpoint = get("LIBRETRANSLATE_URL");
        }
        if self.translation.api_key.is_none() {
            self.translation.api_key = get("LIBRETRANSLATE_API_KEY");
        }
    }

    pub fn llm_configured(&self) -> bool {
        self.llm
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// 构建共享的 HTTP 客户端
    pub fn http_client(&self) -> anyhow::Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("hanzi-reader/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = self.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}
