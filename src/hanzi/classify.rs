//! 汉字判定
//!
//! 按 Unicode 码点判断，`char` 本身就是标量值，扩展 B 区的字符不会被拆成代理对。

/// 判断码点是否属于已识别的 CJK 统一表意文字区段
///
/// - U+4E00..=U+9FFF 基本区
/// - U+3400..=U+4DBF 扩展 A
/// - U+20000..=U+2A6DF 扩展 B
#[inline]
pub fn is_chinese_char(c: char) -> bool {
    matches!(
        c,
        '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '\u{20000}'..='\u{2A6DF}'
    )
}

/// 统计文本中的汉字个数
pub fn count_chinese_chars(text: &str) -> usize {
    text.chars().filter(|c| is_chinese_char(*c)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_ideographs() {
        assert!(is_chinese_char('中'));
        assert!(is_chinese_char('\u{4E00}'));
        assert!(is_chinese_char('\u{9FFF}'));
        assert!(!is_chinese_char('\u{A000}'));
    }

    #[test]
    fn test_extension_ranges() {
        assert!(is_chinese_char('\u{3400}'));
        assert!(is_chinese_char('\u{4DBF}'));
        // 𠀀 U+20000，UTF-16 下是代理对
        assert!(is_chinese_char('𠀀'));
        assert!(is_chinese_char('\u{2A6DF}'));
        assert!(!is_chinese_char('\u{2A6E0}'));
    }

    #[test]
    fn test_non_chinese() {
        for c in ['a', 'Z', '7', '。', '，', '？', ' ', 'あ', '한', '😀'] {
            assert!(!is_chinese_char(c), "{c:?} should not be chinese");
        }
    }

    #[test]
    fn test_count_mixed_text() {
        assert_eq!(count_chinese_chars("我每天学习中文。"), 7);
        assert_eq!(count_chinese_chars("I love 中国 2024!"), 2);
        assert_eq!(count_chinese_chars("𠀀𠀁好"), 3);
        assert_eq!(count_chinese_chars(""), 0);
    }
}
