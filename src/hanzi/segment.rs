//! 分句
//!
//! 先按句末标点（。！？）切分，标点归入前一句；
//! 全文没有句末标点时改按逗号、分号切分；仍然切不出句子则整段作为一句。

/// 句末标点
const PRIMARY_TERMINATORS: [char; 3] = ['。', '！', '？'];

/// 次级分隔符，仅在没有句末标点时使用
const SECONDARY_DELIMITERS: [char; 2] = ['，', '；'];

/// 将文章切分为有序的句子列表
///
/// 空文本或纯空白返回空列表。返回的每个句子去除首尾空白后都非空。
pub fn segment_sentences(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let sentences = split_on_terminators(trimmed);
    if !sentences.is_empty() {
        return sentences;
    }

    let clauses = split_on_delimiters(trimmed);
    if !clauses.is_empty() {
        return clauses;
    }

    vec![trimmed.to_string()]
}

/// 按句末标点切分，连续的句末标点（如 "？！"）整体归入前一句
///
/// 没有任何句末标点时返回空列表，由调用方走次级策略。
/// 标点前没有正文的片段整体丢弃。
fn split_on_terminators(text: &str) -> Vec<String> {
    if !text.contains(PRIMARY_TERMINATORS) {
        return Vec::new();
    }

    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if !PRIMARY_TERMINATORS.contains(&c) {
            continue;
        }
        while let Some(&next) = chars.peek() {
            if !PRIMARY_TERMINATORS.contains(&next) {
                break;
            }
            current.push(next);
            chars.next();
        }
        push_sentence(&mut sentences, &current);
        current.clear();
    }

    // 末尾没有句末标点的残句
    push_sentence(&mut sentences, &current);
    sentences
}

fn push_sentence(sentences: &mut Vec<String>, segment: &str) {
    let body = segment.trim_end_matches(PRIMARY_TERMINATORS);
    if body.trim().is_empty() {
        return;
    }
    sentences.push(segment.trim().to_string());
}

fn split_on_delimiters(text: &str) -> Vec<String> {
    text.split(SECONDARY_DELIMITERS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
