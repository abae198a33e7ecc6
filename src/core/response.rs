//! Response chunking and Discord message utilities
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;

/// Chunk text into fixed-size pieces that fit under the Discord message cap.
///
/// Cuts are plain fixed-size slices, not word-aware, except that a cut never
/// lands inside a UTF-8 code point: characters accumulate until the next one
/// would push the chunk past `max_size` bytes.
pub fn chunk_text(text: &str, max_size: usize) -> Vec<String> {
    if text.len() <= max_size {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if current.len() + ch.len_utf8() > max_size && !current.is_empty() {
            chunks.push(current);
            current = String::new();
        }
        current.push(ch);
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Truncate text to `max` bytes, adding an ellipsis if anything was dropped.
pub fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }

    // Find a safe UTF-8 boundary with room for "..."
    let mut end = max.saturating_sub(3);
    while !text.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_no_chunk() {
        let result = chunk_text("hello", 100);
        assert_eq!(result, vec!["hello"]);
    }

    #[test]
    fn test_fixed_size_cuts() {
        let text = "a".repeat(5000);
        let result = chunk_text(&text, 1900);
        assert_eq!(result.len(), 3);
        assert_eq!(result[0].len(), 1900);
        assert_eq!(result[1].len(), 1900);
        assert_eq!(result[2].len(), 1200);
    }

    #[test]
    fn test_exactly_at_limit() {
        let text = "a".repeat(1900);
        let result = chunk_text(&text, 1900);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].len(), 1900);
    }

    #[test]
    fn test_one_past_limit() {
        let text = "a".repeat(1901);
        let result = chunk_text(&text, 1900);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].len(), 1900);
        assert_eq!(result[1].len(), 1);
    }

    #[test]
    fn test_empty_text() {
        let result = chunk_text("", 100);
        assert_eq!(result, vec![""]);
    }

    #[test]
    fn test_utf8_safety() {
        // Multi-byte characters must never be split mid-code-point
        let text = "世".repeat(2000); // 3 bytes each
        let chunks = chunk_text(&text, 1900);
        for chunk in &chunks {
            assert!(chunk.len() <= 1900);
            assert_eq!(chunk.len() % 3, 0);
        }
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_chunks_preserve_order_and_content() {
        let text: String = (0..3000)
            .map(|i| char::from(b'a' + (i % 26) as u8))
            .collect();
        let chunks = chunk_text(&text, 1000);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_truncate_short() {
        assert_eq!(truncate("short", 100), "short");
    }

    #[test]
    fn test_truncate_long() {
        let text = "a".repeat(200);
        let result = truncate(&text, 100);
        assert!(result.len() <= 100);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_truncate_multibyte_boundary() {
        let text = "é".repeat(100); // 2 bytes each
        let result = truncate(&text, 51);
        assert!(result.len() <= 51);
        assert!(result.ends_with("..."));
    }
}
