//! HTML entity escaping and decoding shared by both conversion directions.

const NBSP_SENTINEL: &str = "\u{0}nbsp\u{0}";

/// Escapes `&`, `<` and `>` to their entity forms.
///
/// A literal `&nbsp;` already present in the input is preserved as-is, so it
/// is never double-escaped into `&amp;nbsp;`.
pub(crate) fn escape_html(text: &str) -> String {
    let protected = text.replace("&nbsp;", NBSP_SENTINEL);
    protected
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace(NBSP_SENTINEL, "&nbsp;")
}

/// Decodes the entities relevant to plain note text.
///
/// Replacements run in sequence, so a double-escaped entity such as
/// `&amp;lt;` decodes all the way down to `<` in a single pass.
pub(crate) fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
}

#[cfg(test)]
mod tests {
    use super::{decode_entities, escape_html};

    #[test]
    fn escape_covers_the_three_significant_characters() {
        assert_eq!(escape_html("a < b & c > d"), "a &lt; b &amp; c &gt; d");
    }

    #[test]
    fn escape_keeps_existing_nbsp_intact() {
        assert_eq!(escape_html("a&nbsp;b & c"), "a&nbsp;b &amp; c");
    }

    #[test]
    fn decode_maps_nbsp_to_plain_space() {
        assert_eq!(decode_entities("a&nbsp;b"), "a b");
    }

    #[test]
    fn decode_handles_quote_and_apostrophe_forms() {
        assert_eq!(decode_entities("&quot;x&#39;y&apos;z&quot;"), "\"x'y'z\"");
    }

    #[test]
    fn decode_collapses_double_escaping_in_one_pass() {
        assert_eq!(decode_entities("&amp;lt;tag&amp;gt;"), "<tag>");
    }
}
