//! Truncation Utilities
//! 
//! Display-only shortening that respects UTF-8 boundaries.

const ELLIPSIS: char = '…';

/// Keep at most `max_chars` characters of `content`, marking the cut with an
/// ellipsis. Strings that already fit are returned unchanged.
pub fn truncate_text(content: &str, max_chars: usize) -> String {
    let mut prefix_end = content.len();

    // Find prefix end on a char boundary
    for (count, (idx, _)) in content.char_indices().enumerate() {
        if count == max_chars {
            prefix_end = idx;
            break;
        }
    }

    if prefix_end == content.len() {
        return content.to_string();
    }

    let mut out = String::with_capacity(prefix_end + ELLIPSIS.len_utf8());
    out.push_str(&content[..prefix_end]);
    out.push(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(truncate_text("abc", 3), "abc");
        assert_eq!(truncate_text("", 0), "");
    }

    #[test]
    fn test_truncates_with_ellipsis() {
        assert_eq!(truncate_text("abcdef", 4), "abcd…");
        assert_eq!(truncate_text("abc", 0), "…");
    }

    #[test]
    fn test_respects_utf8_boundaries() {
        assert_eq!(truncate_text("héllo wörld", 7), "héllo w…");
        assert_eq!(truncate_text("日本語テキスト", 3), "日本語…");
    }
}
