//! HTML -> Markdown decoder for editor output.
//!
//! # Responsibility
//! - Turn the HTML fragment emitted by the rich-text surface back into the
//!   Markdown form that gets persisted.
//!
//! # Invariants
//! - Entities are decoded up front so tag content is legible, and fence
//!   bodies are decoded once more on extraction so entity-escaped angle
//!   brackets round-trip to literal characters.
//! - Ordered list items are renumbered from 1 regardless of the numbering
//!   the HTML implies.
//! - Unmatched tags never error; whatever the paired rules leave behind is
//!   removed by the final catch-all strip.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::entities::decode_entities;
use super::stash::CodeStash;

static PRE_CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<pre[^>]*><code[^>]*>(.*?)</code></pre>").expect("valid pre regex")
});
static INLINE_CODE_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<code[^>]*>(.*?)</code>").expect("valid code regex"));
static BLOCKQUOTE_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<blockquote[^>]*>(.*?)</blockquote>").expect("valid blockquote regex")
});
static HEADING_RULES: Lazy<Vec<(Regex, String)>> = Lazy::new(|| {
    (1..=6)
        .map(|level| {
            let re = Regex::new(&format!("(?i)<h{level}[^>]*>(.*?)</h{level}>"))
                .expect("valid heading regex");
            (re, format!("{} ${{1}}\n\n", "#".repeat(level)))
        })
        .collect()
});
static ORDERED_LIST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<ol[^>]*>(.*?)</ol>").expect("valid list regex"));
static LIST_ITEM_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<li[^>]*>(.*?)</li>").expect("valid list item regex"));
static UL_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<ul[^>]*>").expect("valid list regex"));
static UL_CLOSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</ul>").expect("valid list regex"));
static ANCHOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<a[^>]*href="([^"]*)"[^>]*>(.*?)</a>"#).expect("valid anchor regex")
});
static IMAGE_WITH_ALT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<img[^>]*src="([^"]*)"[^>]*alt="([^"]*)"[^>]*>"#).expect("valid image regex")
});
static IMAGE_PLAIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<img[^>]*src="([^"]*)"[^>]*>"#).expect("valid image regex"));
static INLINE_STYLE_RULES: Lazy<Vec<(Regex, String)>> = Lazy::new(|| {
    [
        ("strong", "**"),
        ("b", "**"),
        ("em", "*"),
        ("i", "*"),
        ("strike", "~~"),
        ("del", "~~"),
        ("s", "~~"),
    ]
    .iter()
    .map(|(tag, marker)| {
        let re = Regex::new(&format!("(?i)<{tag}[^>]*>(.*?)</{tag}>"))
            .expect("valid inline style regex");
        (re, format!("{marker}${{1}}{marker}"))
    })
    .collect()
});
static HR_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<hr[^>]*>").expect("valid hr regex"));
static P_CLOSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</p>").expect("valid p regex"));
static P_OPEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<p[^>]*>").expect("valid p regex"));
static BR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid br regex"));
static DIV_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<div[^>]*>").expect("valid div regex"));
static DIV_CLOSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</div>").expect("valid div regex"));
static SPAN_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<span[^>]*>").expect("valid span regex"));
static SPAN_CLOSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</span>").expect("valid span regex"));
static ANY_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static MULTI_SPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"  +").expect("valid multi-space regex"));
static SPACE_BEFORE_NEWLINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" +\n").expect("valid whitespace regex"));
static SPACE_AFTER_NEWLINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n +").expect("valid whitespace regex"));
static EXTRA_NEWLINES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("valid newline regex"));

/// Converts an HTML fragment back into Markdown.
///
/// Total over the string domain: unbalanced markup degrades gracefully,
/// empty input yields an empty string, and the result is trimmed.
pub fn html_to_markdown(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let mut stash = CodeStash::new();
    let mut markdown = decode_entities(html);

    // Fence bodies get a second entity pass on extraction and are stashed so
    // literal angle brackets survive the tag catch-all below.
    markdown = PRE_CODE_RE
        .replace_all(&markdown, |caps: &Captures<'_>| {
            let body = decode_entities(&caps[1]);
            format!("\n```\n{}\n```\n\n", stash.put(body.trim().to_string()))
        })
        .into_owned();
    markdown = INLINE_CODE_TAG_RE
        .replace_all(&markdown, |caps: &Captures<'_>| {
            format!("`{}`", stash.put(caps[1].to_string()))
        })
        .into_owned();

    markdown = BLOCKQUOTE_TAG_RE
        .replace_all(&markdown, |caps: &Captures<'_>| {
            let unwrapped = BR_RE.replace_all(&caps[1], "\n");
            let stripped = ANY_TAG_RE.replace_all(&unwrapped, "");
            let quoted = stripped
                .trim()
                .split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(|line| format!("> {line}"))
                .collect::<Vec<_>>()
                .join("\n");
            format!("\n{quoted}\n\n")
        })
        .into_owned();

    for (re, replacement) in HEADING_RULES.iter() {
        markdown = re.replace_all(&markdown, replacement.as_str()).into_owned();
    }

    // Ordered items are renumbered from 1; the HTML numbering is ignored.
    markdown = ORDERED_LIST_RE
        .replace_all(&markdown, |caps: &Captures<'_>| {
            let mut counter = 0u32;
            let items = LIST_ITEM_TAG_RE.replace_all(&caps[1], |item: &Captures<'_>| {
                counter += 1;
                format!("{counter}. {}\n", &item[1])
            });
            format!("\n{items}\n")
        })
        .into_owned();

    markdown = UL_OPEN_RE.replace_all(&markdown, "\n").into_owned();
    markdown = UL_CLOSE_RE.replace_all(&markdown, "\n").into_owned();
    markdown = LIST_ITEM_TAG_RE
        .replace_all(&markdown, "- ${1}\n")
        .into_owned();

    markdown = ANCHOR_RE.replace_all(&markdown, "[${2}](${1})").into_owned();
    markdown = IMAGE_WITH_ALT_RE
        .replace_all(&markdown, "![${2}](${1})")
        .into_owned();
    markdown = IMAGE_PLAIN_RE
        .replace_all(&markdown, "![](${1})")
        .into_owned();

    for (re, replacement) in INLINE_STYLE_RULES.iter() {
        markdown = re.replace_all(&markdown, replacement.as_str()).into_owned();
    }

    markdown = HR_TAG_RE.replace_all(&markdown, "\n\n---\n\n").into_owned();
    markdown = P_CLOSE_RE.replace_all(&markdown, "\n\n").into_owned();
    markdown = P_OPEN_RE.replace_all(&markdown, "").into_owned();
    markdown = BR_RE.replace_all(&markdown, "\n").into_owned();
    markdown = DIV_OPEN_RE.replace_all(&markdown, "").into_owned();
    markdown = DIV_CLOSE_RE.replace_all(&markdown, "\n").into_owned();
    markdown = SPAN_OPEN_RE.replace_all(&markdown, "").into_owned();
    markdown = SPAN_CLOSE_RE.replace_all(&markdown, "").into_owned();

    // Whatever the paired rules could not match is dropped verbatim.
    markdown = ANY_TAG_RE.replace_all(&markdown, "").into_owned();

    // Entities reintroduced by tag stripping, then whitespace normalization.
    markdown = decode_entities(&markdown);
    markdown = MULTI_SPACE_RE.replace_all(&markdown, " ").into_owned();
    markdown = SPACE_BEFORE_NEWLINE_RE
        .replace_all(&markdown, "\n")
        .into_owned();
    markdown = SPACE_AFTER_NEWLINE_RE
        .replace_all(&markdown, "\n")
        .into_owned();
    markdown = EXTRA_NEWLINES_RE.replace_all(&markdown, "\n\n").into_owned();

    stash.restore(markdown.trim())
}
