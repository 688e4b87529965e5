/// Characters Telegram requires to be escaped in MarkdownV2 plain text.
pub const MARKDOWN_V2_SPECIAL_CHARS: [char; 18] = [
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Escape text for Telegram's MarkdownV2 parse mode.
///
/// Each special character is prefixed with a single backslash. The backslash
/// itself is not in the set, so nothing gets escaped twice.
pub fn escape_markdown_v2(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if MARKDOWN_V2_SPECIAL_CHARS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(escape_markdown_v2("Hello world"), "Hello world");
        assert_eq!(escape_markdown_v2(""), "");
    }

    #[test]
    fn test_every_special_char_escaped() {
        for c in MARKDOWN_V2_SPECIAL_CHARS {
            let input = format!("a{}b", c);
            assert_eq!(escape_markdown_v2(&input), format!("a\\{}b", c));
        }
    }

    #[test]
    fn test_sentence_with_punctuation() {
        assert_eq!(
            escape_markdown_v2("Build #42 done (3.5s) - see [logs]!"),
            "Build \\#42 done \\(3\\.5s\\) \\- see \\[logs\\]\\!"
        );
    }

    #[test]
    fn test_backslash_not_escaped() {
        assert_eq!(escape_markdown_v2(r"C:\path"), r"C:\path");
        assert_eq!(escape_markdown_v2(r"\."), r"\\.");
    }

    #[test]
    fn test_repeated_chars_each_escaped_once() {
        let escaped = escape_markdown_v2("a__b...c");
        assert_eq!(escaped, "a\\_\\_b\\.\\.\\.c");
        // Dropping every backslash restores the input
        assert_eq!(escaped.replace('\\', ""), "a__b...c");
    }

    #[test]
    fn test_unicode_preserved() {
        assert_eq!(escape_markdown_v2("Ciao 👋 ç'è!"), "Ciao 👋 ç'è\\!");
    }
}
