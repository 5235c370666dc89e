//! 标注管线集成测试：用 mockito 模拟大模型与翻译服务

use std::sync::Arc;

use assert_matches::assert_matches;
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

use hanzi_reader_lib::annotation::{
    SUMMARY_FAILED, SUMMARY_NOT_CONFIGURED, TRANSLATION_UNAVAILABLE,
};
use hanzi_reader_lib::config::{LlmConfig, TranslationConfig};
use hanzi_reader_lib::hanzi::{count_chinese_chars, PinyinTransliterator};
use hanzi_reader_lib::providers::{
    ChatService, LibreTranslateClient, OpenAiChatClient, TranslationService,
};
use hanzi_reader_lib::{ArticlePipeline, PipelineServices, ServiceError};

const ARTICLE: &str = "我每天学习中文。他也学习中文。";

const VOCABULARY_JSON: &str = r#"[
  {"chinese":"每天","pinyin":"měi tiān","english":"every day / daily","example":"我每天跑步。","emoji":"📅"},
  {"chinese":"学习","pinyin":"xué xí","english":"to study / to learn","example":"我们一起学习。","emoji":"📚"},
  {"chinese":"中文","pinyin":"zhōng wén","english":"Chinese language","example":"中文很有意思。","emoji":"🀄"}
]"#;

fn chat_body(content: &str) -> String {
    json!({
        "id": "chatcmpl-test",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
    })
    .to_string()
}

fn chat_client(server: &ServerGuard) -> Arc<dyn ChatService> {
    let config = LlmConfig {
        base_url: server.url(),
        api_key: Some("sk-test".into()),
        ..LlmConfig::default()
    };
    Arc::new(OpenAiChatClient::new(reqwest::Client::new(), &config).unwrap())
}

fn translation_client(server: &ServerGuard) -> Arc<dyn TranslationService> {
    let config = TranslationConfig {
        endpoint: Some(server.url()),
        ..TranslationConfig::default()
    };
    Arc::new(LibreTranslateClient::new(reqwest::Client::new(), &config).unwrap())
}

fn services(
    chat: Option<Arc<dyn ChatService>>,
    translation: Option<Arc<dyn TranslationService>>,
) -> PipelineServices {
    PipelineServices {
        chat,
        translation,
        transliterator: Arc::new(PinyinTransliterator::new()),
        ..PipelineServices::default()
    }
}

#[tokio::test]
async fn test_full_pipeline_with_llm() {
    let mut server = Server::new_async().await;

    let summary = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::Regex("Summarize the Chinese article".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_body("Two people study Chinese every day."))
        .create_async()
        .await;
    let dictionary = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("Chinese-English dictionary".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_body("Someone studies Chinese every day."))
        .expect(2)
        .create_async()
        .await;
    let vocabulary = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("vocabulary cards".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_body(&format!("```json\n{}\n```", VOCABULARY_JSON)))
        .create_async()
        .await;

    let pipeline = ArticlePipeline::new(services(Some(chat_client(&server)), None));
    let article = pipeline.process(ARTICLE).await;

    summary.assert_async().await;
    dictionary.assert_async().await;
    vocabulary.assert_async().await;

    assert_eq!(article.summary, "Two people study Chinese every day.");
    assert_eq!(article.sentences.len(), 2);
    assert_eq!(article.sentences[0].chinese, "我每天学习中文。");
    assert_eq!(article.sentences[1].chinese, "他也学习中文。");
    for sentence in &article.sentences {
        assert_eq!(sentence.english, "Someone studies Chinese every day.");
        assert_eq!(
            sentence.pinyin.split(' ').count(),
            count_chinese_chars(&sentence.chinese)
        );
    }

    let words: Vec<&str> = article
        .vocabulary
        .iter()
        .map(|v| v.chinese.as_str())
        .collect();
    assert_eq!(words, vec!["每天", "学习", "中文"]);
    assert_eq!(article.vocabulary[1].english, "to study / to learn");
}

#[tokio::test]
async fn test_dictionary_failure_falls_back_to_translation_service() {
    let mut llm = Server::new_async().await;
    let mut lt = Server::new_async().await;

    let failing = llm
        .mock("POST", "/chat/completions")
        .with_status(500)
        .with_body("internal error")
        .expect_at_least(1)
        .create_async()
        .await;
    let translate = lt
        .mock("POST", "/translate")
        .match_body(Matcher::PartialJson(json!({
            "source": "zh",
            "target": "en",
            "format": "text"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "translatedText": "I study Chinese every day." }).to_string())
        .expect(1)
        .create_async()
        .await;

    let pipeline = ArticlePipeline::new(services(
        Some(chat_client(&llm)),
        Some(translation_client(&lt)),
    ));

    assert_eq!(
        pipeline.translate("我每天学习中文。").await,
        "I study Chinese every day."
    );
    failing.assert_async().await;
    translate.assert_async().await;
}

#[tokio::test]
async fn test_translation_service_first_when_llm_not_preferred() {
    let mut llm = Server::new_async().await;
    let mut lt = Server::new_async().await;

    let unused = llm
        .mock("POST", "/chat/completions")
        .expect(0)
        .create_async()
        .await;
    lt.mock("POST", "/translate")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "translatedText": "Hello." }).to_string())
        .create_async()
        .await;

    let mut svc = services(Some(chat_client(&llm)), Some(translation_client(&lt)));
    svc.prefer_llm_translation = false;
    let pipeline = ArticlePipeline::new(svc);

    assert_eq!(pipeline.translate("你好。").await, "Hello.");
    unused.assert_async().await;
}

#[tokio::test]
async fn test_every_service_down_yields_placeholders() {
    let mut llm = Server::new_async().await;
    let mut lt = Server::new_async().await;

    llm.mock("POST", "/chat/completions")
        .with_status(503)
        .create_async()
        .await;
    lt.mock("POST", "/translate")
        .with_status(502)
        .create_async()
        .await;

    let pipeline = ArticlePipeline::new(services(
        Some(chat_client(&llm)),
        Some(translation_client(&lt)),
    ));
    let article = pipeline.process(ARTICLE).await;

    assert_eq!(article.summary, SUMMARY_FAILED);
    assert!(article.vocabulary.is_empty());
    assert_eq!(article.sentences.len(), 2);
    for sentence in &article.sentences {
        assert_eq!(sentence.english, TRANSLATION_UNAVAILABLE);
        // 拼音不依赖网络服务
        assert!(!sentence.pinyin.is_empty());
    }
}

#[tokio::test]
async fn test_unconfigured_services_never_call_out() {
    let pipeline = ArticlePipeline::new(services(None, None));

    assert_eq!(pipeline.summarize(ARTICLE).await, SUMMARY_NOT_CONFIGURED);
    assert_eq!(pipeline.translate("你好。").await, TRANSLATION_UNAVAILABLE);
    assert!(pipeline.extract_vocabulary(ARTICLE).await.is_empty());
}

#[tokio::test]
async fn test_vocabulary_non_json_is_empty() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_body("学习 (xué xí): to study"))
        .create_async()
        .await;

    let pipeline = ArticlePipeline::new(services(Some(chat_client(&server)), None));
    assert!(pipeline.extract_vocabulary(ARTICLE).await.is_empty());
}

#[tokio::test]
async fn test_vocabulary_shape_mismatch_is_empty() {
    let mut server = Server::new_async().await;
    let partial = r#"[{"chinese":"学习","pinyin":"xué xí","english":"to study","example":"我学习。","emoji":"📚"},{"chinese":"中文"}]"#;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_body(partial))
        .create_async()
        .await;

    let pipeline = ArticlePipeline::new(services(Some(chat_client(&server)), None));
    assert!(pipeline.extract_vocabulary(ARTICLE).await.is_empty());
}

#[tokio::test]
async fn test_chat_client_errors() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .with_body("slow down")
        .create_async()
        .await;

    let err = chat_client(&server).complete("sys", "user").await.unwrap_err();
    assert_matches!(err, ServiceError::Status { status: 429, .. });
    assert_eq!(err.hint(), "rate limited");
}

#[tokio::test]
async fn test_chat_client_malformed_body() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(json!({ "choices": [] }).to_string())
        .create_async()
        .await;

    let err = chat_client(&server).complete("sys", "user").await.unwrap_err();
    assert_matches!(err, ServiceError::MalformedResponse(_));
}

#[tokio::test]
async fn test_translation_client_malformed_body() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/translate")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let err = translation_client(&server)
        .translate("你好", "zh", "en")
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::MalformedResponse(_));
}

#[tokio::test]
async fn test_unreachable_service_is_http_error() {
    let config = LlmConfig {
        base_url: "http://127.0.0.1:9".into(),
        api_key: Some("sk-test".into()),
        ..LlmConfig::default()
    };
    let client = OpenAiChatClient::new(reqwest::Client::new(), &config).unwrap();
    let err = client.complete("sys", "user").await.unwrap_err();
    assert_matches!(err, ServiceError::Http(_));

    let pipeline = ArticlePipeline::new(services(Some(Arc::new(client)), None));
    assert_eq!(pipeline.summarize(ARTICLE).await, SUMMARY_FAILED);
}
