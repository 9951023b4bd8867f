use html_escape::encode_quoted_attribute;
use std::borrow::Cow;

/// Escape `&`, `<`, `>`, `"` and `'` so untrusted text is safe both in
/// element bodies and in quoted attributes.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    encode_quoted_attribute(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_all_markup_characters() {
        let escaped = escape_html(r#"<script>&"'</script>"#);

        assert!(escaped.starts_with("&lt;script&gt;&amp;&quot;"));
        assert!(escaped.ends_with("&lt;/script&gt;"));
        for raw in ['<', '>', '"', '\''] {
            assert!(!escaped.contains(raw), "{raw} left unescaped in {escaped}");
        }
        assert!(escaped.contains("&#x27;") || escaped.contains("&#39;"));
    }

    #[test]
    fn test_plain_text_is_borrowed() {
        assert!(matches!(escape_html("Lisbon (Portugal)"), Cow::Borrowed(_)));
    }
}
