//! 命令行入口
//!
//! `hanzi-reader [FILE ...]`：每个文件作为一篇文章处理，未给文件时读取 stdin。
//! 结果以 JSON 输出到 stdout，日志写到 stderr。

use std::io::Read;
use std::path::PathBuf;

use serde::Serialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use hanzi_reader_lib::annotation::merge_vocabulary;
use hanzi_reader_lib::{AnnotatedArticle, AppConfig, ArticlePipeline, VocabularyItem};

#[derive(Debug, Serialize)]
struct Output {
    articles: Vec<AnnotatedArticle>,
    /// 所有文章的词汇按词语去重合并
    vocabulary: Vec<VocabularyItem>,
}

fn read_inputs() -> anyhow::Result<Vec<String>> {
    let paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(vec![buf]);
    }
    paths
        .iter()
        .map(|p| {
            std::fs::read_to_string(p)
                .map_err(|e| anyhow::anyhow!("failed to read {}: {}", p.display(), e))
        })
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let cfg = AppConfig::from_env_and_file()?;
    let pipeline = ArticlePipeline::from_config(&cfg)?;

    let mut output = Output {
        articles: Vec::new(),
        vocabulary: Vec::new(),
    };
    for text in read_inputs()? {
        let article = pipeline.process(&text).await;
        merge_vocabulary(&mut output.vocabulary, article.vocabulary.iter().cloned());
        output.articles.push(article);
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
