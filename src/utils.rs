//! 日志辅助

/// 单行预览：换行与连续空白折叠为一个空格，按字符截断并追加省略号
pub fn log_preview(input: &str, max_chars: usize) -> String {
    let mut collapsed = String::with_capacity(input.len().min(max_chars * 4));
    let mut count = 0;
    for word in input.split_whitespace() {
        if count > 0 {
            if count >= max_chars {
                collapsed.push_str("...");
                return collapsed;
            }
            collapsed.push(' ');
            count += 1;
        }
        for ch in word.chars() {
            if count >= max_chars {
                collapsed.push_str("...");
                return collapsed;
            }
            collapsed.push(ch);
            count += 1;
        }
    }
    collapsed
}
