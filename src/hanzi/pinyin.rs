//! 拼音转写与标注
//!
//! `Transliterator` 是转写后端的接缝：默认实现基于 `pinyin` 词典加
//! `chinese_segmenter` 分词，测试中可以替换为固定输出的假实现。
//! `PinyinAnnotator` 在后端之上做过滤与拼接，任何失败（包括后端 panic）
//! 都只会得到空字符串。

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, LazyLock, Once};

use pinyin::ToPinyin;
use regex::Regex;

use super::classify::{count_chinese_chars, is_chinese_char};
use crate::error::TransliterationError;

/// 声调输出风格
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneStyle {
    /// 声调符号：zhōng
    ToneMarks,
    /// 数字声调：zhong1
    ToneNumbers,
    /// 无声调：zhong
    Plain,
}

/// 转写后端
///
/// 每个输入单元（汉字、数字串、标点串、拉丁字母串）返回一个候选 token；
/// 无法转写的单元原样透传。
pub trait Transliterator: Send + Sync {
    fn transliterate(
        &self,
        text: &str,
        style: ToneStyle,
        segmented: bool,
    ) -> Result<Vec<String>, TransliterationError>;
}

/// 常见多音字词的读音，按词匹配优先于单字默认读音
const PHRASE_READINGS: &[(&str, &[&str])] = &[
    ("银行", &["yín", "háng"]),
    ("行业", &["háng", "yè"]),
    ("一行", &["yì", "háng"]),
    ("长大", &["zhǎng", "dà"]),
    ("校长", &["xiào", "zhǎng"]),
    ("成长", &["chéng", "zhǎng"]),
    ("音乐", &["yīn", "yuè"]),
    ("乐器", &["yuè", "qì"]),
    ("快乐", &["kuài", "lè"]),
    ("睡觉", &["shuì", "jiào"]),
    ("午觉", &["wǔ", "jiào"]),
    ("觉得", &["jué", "de"]),
    ("还是", &["hái", "shì"]),
    ("还有", &["hái", "yǒu"]),
    ("还要", &["hái", "yào"]),
    ("重要", &["zhòng", "yào"]),
    ("重新", &["chóng", "xīn"]),
    ("的确", &["dí", "què"]),
    ("目的", &["mù", "dì"]),
    ("爱好", &["ài", "hào"]),
    ("好奇", &["hào", "qí"]),
    ("了解", &["liǎo", "jiě"]),
    ("为了", &["wèi", "le"]),
    ("因为", &["yīn", "wèi"]),
    ("地方", &["dì", "fang"]),
    ("东西", &["dōng", "xi"]),
    ("朋友", &["péng", "you"]),
    ("衣服", &["yī", "fu"]),
    ("漂亮", &["piào", "liang"]),
    ("明白", &["míng", "bai"]),
    ("休息", &["xiū", "xi"]),
    ("便宜", &["pián", "yi"]),
    ("方便", &["fāng", "biàn"]),
    ("头发", &["tóu", "fa"]),
    ("出发", &["chū", "fā"]),
    ("几乎", &["jī", "hū"]),
    ("会计", &["kuài", "jì"]),
    ("教书", &["jiāo", "shū"]),
    ("得到", &["dé", "dào"]),
    ("不得不", &["bù", "dé", "bù"]),
    ("差不多", &["chà", "bu", "duō"]),
    ("数学", &["shù", "xué"]),
    ("数一数", &["shǔ", "yi", "shǔ"]),
];

static PHRASE_TABLE: LazyLock<HashMap<&'static str, &'static [&'static str]>> =
    LazyLock::new(|| PHRASE_READINGS.iter().copied().collect());

static MAX_PHRASE_CHARS: LazyLock<usize> = LazyLock::new(|| {
    PHRASE_READINGS
        .iter()
        .map(|(word, _)| word.chars().count())
        .max()
        .unwrap_or(1)
});

static SEGMENTER_INIT: Once = Once::new();

/// 输入单元类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnitKind {
    Chinese,
    Digit,
    Latin,
    Other,
}

fn unit_kind(c: char) -> UnitKind {
    if is_chinese_char(c) {
        UnitKind::Chinese
    } else if c.is_numeric() {
        UnitKind::Digit
    } else if c.is_alphabetic() {
        UnitKind::Latin
    } else {
        UnitKind::Other
    }
}

/// 按类型把文本切成连续单元，空白只作为分隔、不成为单元
fn split_units(text: &str) -> Vec<(UnitKind, &str)> {
    let mut units = Vec::new();
    let mut start: Option<(usize, UnitKind)> = None;

    for (idx, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some((s, kind)) = start.take() {
                units.push((kind, &text[s..idx]));
            }
            continue;
        }
        let kind = unit_kind(c);
        match start {
            Some((_, current)) if current == kind => {}
            Some((s, current)) => {
                units.push((current, &text[s..idx]));
                start = Some((idx, kind));
            }
            None => start = Some((idx, kind)),
        }
    }
    if let Some((s, kind)) = start {
        units.push((kind, &text[s..]));
    }
    units
}

/// 默认转写后端：`pinyin` 单字读音 + 分词后的多音词表
#[derive(Debug, Default, Clone, Copy)]
pub struct PinyinTransliterator;

impl PinyinTransliterator {
    pub fn new() -> Self {
        SEGMENTER_INIT.call_once(chinese_segmenter::initialize);
        Self
    }

    fn transliterate_run(
        &self,
        run: &str,
        style: ToneStyle,
        segmented: bool,
        out: &mut Vec<String>,
    ) {
        if !segmented {
            out.extend(run.chars().map(|c| char_reading(c, style)));
            return;
        }
        SEGMENTER_INIT.call_once(chinese_segmenter::initialize);
        // 分词器会跳过词典外的字，按原文逐段对齐，跳过的片段按字补读音
        let mut pos = 0;
        for word in chinese_segmenter::tokenize(run) {
            let word: &str = &word;
            let Some(offset) = run[pos..].find(word) else {
                continue;
            };
            transliterate_word(&run[pos..pos + offset], style, out);
            transliterate_word(word, style, out);
            pos += offset + word.len();
        }
        transliterate_word(&run[pos..], style, out);
    }
}

impl Transliterator for PinyinTransliterator {
    fn transliterate(
        &self,
        text: &str,
        style: ToneStyle,
        segmented: bool,
    ) -> Result<Vec<String>, TransliterationError> {
        let mut out = Vec::new();
        for (kind, unit) in split_units(text) {
            match kind {
                UnitKind::Chinese => self.transliterate_run(unit, style, segmented, &mut out),
                _ => out.push(unit.to_string()),
            }
        }
        Ok(out)
    }
}

/// 词内做最长匹配，命中多音词表则使用词表读音
fn transliterate_word(word: &str, style: ToneStyle, out: &mut Vec<String>) {
    let chars: Vec<char> = word.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let longest = (*MAX_PHRASE_CHARS).min(chars.len() - i);
        let matched = (2..=longest).rev().find_map(|len| {
            let candidate: String = chars[i..i + len].iter().collect();
            PHRASE_TABLE.get(candidate.as_str()).map(|r| (len, *r))
        });
        match matched {
            Some((len, readings)) => {
                out.extend(readings.iter().map(|r| restyle(r, style)));
                i += len;
            }
            None => {
                out.push(char_reading(chars[i], style));
                i += 1;
            }
        }
    }
}

fn char_reading(c: char, style: ToneStyle) -> String {
    match c.to_pinyin() {
        Some(p) => match style {
            ToneStyle::ToneMarks => p.with_tone().to_string(),
            ToneStyle::ToneNumbers => p.with_tone_num_end().to_string(),
            ToneStyle::Plain => p.plain().to_string(),
        },
        None => c.to_string(),
    }
}

/// 把词表中的声调符号读音转换为目标风格
fn restyle(marked: &str, style: ToneStyle) -> String {
    if style == ToneStyle::ToneMarks {
        return marked.to_string();
    }
    let mut tone = None;
    let base: String = marked
        .chars()
        .map(|c| match strip_tone(c) {
            Some((b, t)) => {
                tone = Some(t);
                b
            }
            None => c,
        })
        .collect();
    match (style, tone) {
        (ToneStyle::ToneNumbers, Some(t)) => format!("{base}{t}"),
        _ => base,
    }
}

fn strip_tone(c: char) -> Option<(char, u8)> {
    let pair = match c {
        'ā' => ('a', 1),
        'á' => ('a', 2),
        'ǎ' => ('a', 3),
        'à' => ('a', 4),
        'ē' => ('e', 1),
        'é' => ('e', 2),
        'ě' => ('e', 3),
        'è' => ('e', 4),
        'ī' => ('i', 1),
        'í' => ('i', 2),
        'ǐ' => ('i', 3),
        'ì' => ('i', 4),
        'ō' => ('o', 1),
        'ó' => ('o', 2),
        'ǒ' => ('o', 3),
        'ò' => ('o', 4),
        'ū' => ('u', 1),
        'ú' => ('u', 2),
        'ǔ' => ('u', 3),
        'ù' => ('u', 4),
        'ǖ' => ('ü', 1),
        'ǘ' => ('ü', 2),
        'ǚ' => ('ü', 3),
        'ǜ' => ('ü', 4),
        _ => return None,
    };
    Some(pair)
}

/// 拼音音节：拉丁字母加声调元音，最长 6 个字符
static SYLLABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-züÜāáǎàēéěèīíǐìōóǒòūúǔùǖǘǚǜńňǹḿ]{1,6}$")
        .expect("syllable pattern is valid")
});

/// 句子拼音标注器
#[derive(Clone)]
pub struct PinyinAnnotator {
    transliterator: Arc<dyn Transliterator>,
}

impl Default for PinyinAnnotator {
    fn default() -> Self {
        Self::new(Arc::new(PinyinTransliterator::new()))
    }
}

impl PinyinAnnotator {
    pub fn new(transliterator: Arc<dyn Transliterator>) -> Self {
        Self { transliterator }
    }

    /// 生成与句中汉字按位置对齐的声调拼音，空格分隔
    ///
    /// 后端失败或 panic 时返回空字符串。token 数不会超过句中汉字数，
    /// 不足时由渲染端把剩余汉字视为无拼音。
    pub fn annotate(&self, sentence: &str) -> String {
        let transliterator = &self.transliterator;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            transliterator.transliterate(sentence, ToneStyle::ToneMarks, true)
        }));

        let tokens = match outcome {
            Ok(Ok(tokens)) => tokens,
            Ok(Err(e)) => {
                tracing::warn!("[Pinyin] transliteration failed: {}", e);
                return String::new();
            }
            Err(payload) => {
                let e = TransliterationError::Panicked(panic_message(payload.as_ref()));
                tracing::warn!("[Pinyin] {}", e);
                return String::new();
            }
        };

        let mut latin_words: Vec<&str> = split_units(sentence)
            .into_iter()
            .filter(|(kind, _)| *kind == UnitKind::Latin)
            .map(|(_, unit)| unit)
            .collect();

        tokens
            .iter()
            .map(|t| t.trim())
            .filter(|t| SYLLABLE_RE.is_match(t))
            // 透传的拉丁单词不算拼音，每个只抵消一次
            .filter(|t| match latin_words.iter().position(|w| w == t) {
                Some(i) => {
                    latin_words.swap_remove(i);
                    false
                }
                None => true,
            })
            .take(count_chinese_chars(sentence))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
