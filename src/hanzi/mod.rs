//! 中文文本处理：汉字判定、分句、拼音标注与对齐
//!
//! 这一层不依赖任何网络服务，外部服务全部故障时依然可用。
pub mod align;
pub mod classify;
pub mod pinyin;
pub mod segment;

pub use align::{align_pinyin, CharReading};
pub use classify::{count_chinese_chars, is_chinese_char};
pub use pinyin::{PinyinAnnotator, PinyinTransliterator, ToneStyle, Transliterator};
pub use segment::segment_sentences;
