//! 文本截断
//!
//! 按字符（而非字节）截断文档内容，保证不会切断多字节字符

/// 默认截断长度（字符数）
pub const DEFAULT_TRUNCATE_CHARS: usize = 115_000;

/// 截取前 `max_chars` 个字符
///
/// 字符数不超过 `max_chars` 时原样返回（借用，不分配）
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(truncate_chars("hello world", DEFAULT_TRUNCATE_CHARS), "hello world");
    }

    #[test]
    fn test_exact_boundary_unchanged() {
        let text = "a".repeat(DEFAULT_TRUNCATE_CHARS);
        assert_eq!(truncate_chars(&text, DEFAULT_TRUNCATE_CHARS).len(), DEFAULT_TRUNCATE_CHARS);
    }

    #[test]
    fn test_long_text_cut_to_boundary() {
        let text = "b".repeat(DEFAULT_TRUNCATE_CHARS + 500);
        let cut = truncate_chars(&text, DEFAULT_TRUNCATE_CHARS);
        assert_eq!(cut.chars().count(), DEFAULT_TRUNCATE_CHARS);
        assert!(text.starts_with(cut));
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        // 每个汉字 3 字节
        let text = "文档内容".repeat(40_000);
        let cut = truncate_chars(&text, DEFAULT_TRUNCATE_CHARS);
        assert_eq!(cut.chars().count(), DEFAULT_TRUNCATE_CHARS);
        assert_eq!(cut.len(), DEFAULT_TRUNCATE_CHARS * 3);
    }

    #[test]
    fn test_zero_limit() {
        assert_eq!(truncate_chars("abc", 0), "");
    }
}
