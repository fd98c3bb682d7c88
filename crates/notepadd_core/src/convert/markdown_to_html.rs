//! Markdown -> HTML encoder for the rich-text editing surface.
//!
//! # Responsibility
//! - Produce an HTML fragment the editor widget can load as initial content.
//!
//! # Invariants
//! - Rewrite passes keep their fixed order: escaping first, code fences
//!   before inline code, bold before italic, images before links, block
//!   grouping before paragraph segmentation.
//! - Code bodies are stashed before the emphasis passes run and restored
//!   last, so fence content is never rewritten.
//! - Unterminated markers stay literal text; no input raises an error.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::entities::escape_html;
use super::stash::CodeStash;

static FENCED_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```([^`]+)```").expect("valid fenced code regex"));
static INLINE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`]+)`").expect("valid inline code regex"));
static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(#{1,6})\s+(.+)$").expect("valid heading regex"));
static HR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(?:---|\*\*\*)$").expect("valid rule regex"));
static BOLD_STARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid bold regex"));
static BOLD_UNDERSCORES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__(.+?)__").expect("valid bold regex"));
static ITALIC_STAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*(.+?)\*").expect("valid italic regex"));
static ITALIC_UNDERSCORE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_(.+?)_").expect("valid italic regex"));
static STRIKE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"~~(.+?)~~").expect("valid strikethrough regex"));
static IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("valid image regex"));
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static BLOCKQUOTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^&gt;\s+(.+)$").expect("valid blockquote regex"));
static UNORDERED_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*+]\s+(.+)$").expect("valid list item regex"));
static ORDERED_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s+(.+)$").expect("valid list item regex"));
static PARAGRAPH_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{2,}").expect("valid paragraph split regex"));
static BLOCK_START_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^<(?:h[1-6]|ul|ol|li|blockquote|pre|hr|div)").expect("valid block start regex")
});
static MULTI_SPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"  +").expect("valid multi-space regex"));

/// Converts a Markdown string into an HTML fragment.
///
/// Total over the string domain: malformed Markdown degrades to literal
/// text, empty input yields an empty fragment.
pub fn markdown_to_html(markdown: &str) -> String {
    if markdown.is_empty() {
        return String::new();
    }

    let mut stash = CodeStash::new();
    let mut html = escape_html(markdown);

    // Code first: fence bodies must be consumed before any other rule can
    // rewrite their content.
    html = FENCED_CODE_RE
        .replace_all(&html, |caps: &Captures<'_>| {
            format!("<pre><code>{}</code></pre>", stash.put(caps[1].to_string()))
        })
        .into_owned();
    html = INLINE_CODE_RE
        .replace_all(&html, |caps: &Captures<'_>| {
            format!("<code>{}</code>", stash.put(caps[1].to_string()))
        })
        .into_owned();

    // The greedy `#{1,6}` marker keeps six hashes from matching as one.
    html = HEADING_RE
        .replace_all(&html, |caps: &Captures<'_>| {
            let level = caps[1].len();
            format!("<h{level}>{}</h{level}>", &caps[2])
        })
        .into_owned();
    html = HR_RE.replace_all(&html, "<hr>").into_owned();

    // Bold before italic: the two-character delimiters must be consumed
    // before single markers are considered.
    html = BOLD_STARS_RE
        .replace_all(&html, "<strong>${1}</strong>")
        .into_owned();
    html = BOLD_UNDERSCORES_RE
        .replace_all(&html, "<strong>${1}</strong>")
        .into_owned();
    html = ITALIC_STAR_RE.replace_all(&html, "<em>${1}</em>").into_owned();
    html = ITALIC_UNDERSCORE_RE
        .replace_all(&html, "<em>${1}</em>")
        .into_owned();
    html = STRIKE_RE
        .replace_all(&html, "<strike>${1}</strike>")
        .into_owned();

    // Images before links: link syntax is a subset of image syntax.
    html = IMAGE_RE
        .replace_all(&html, "<img src=\"${2}\" alt=\"${1}\">")
        .into_owned();
    html = LINK_RE
        .replace_all(&html, "<a href=\"${2}\">${1}</a>")
        .into_owned();

    // The quote marker was escaped to `&gt;` by the entity pass above.
    html = BLOCKQUOTE_RE
        .replace_all(&html, "<blockquote>${1}</blockquote>")
        .into_owned();

    html = wrap_list_runs(&html);
    html = render_paragraphs(&html);

    // Runs of spaces collapse in HTML; keep them visible as entities.
    html = MULTI_SPACE_RE
        .replace_all(&html, |caps: &Captures<'_>| "&nbsp;".repeat(caps[0].len()))
        .into_owned();

    stash.restore(&html)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            Self::Unordered => "ul",
            Self::Ordered => "ol",
        }
    }
}

/// Groups contiguous runs of list-item lines into one `<ul>`/`<ol>` each.
///
/// Only directly adjacent lines of the same marker kind belong to a run; any
/// other line (including a blank one) closes it. Run state lives on the
/// stack of this call, never at module scope.
fn wrap_list_runs(text: &str) -> String {
    fn flush(lines: &mut Vec<String>, items: &mut Vec<String>, kind: &mut Option<ListKind>) {
        if let Some(kind) = kind.take() {
            let tag = kind.tag();
            lines.push(format!("<{tag}>{}</{tag}>", items.join("")));
            items.clear();
        }
    }

    let mut lines: Vec<String> = Vec::new();
    let mut run_items: Vec<String> = Vec::new();
    let mut run_kind: Option<ListKind> = None;

    for line in text.split('\n') {
        let item = UNORDERED_ITEM_RE
            .captures(line)
            .map(|caps| (ListKind::Unordered, caps))
            .or_else(|| {
                ORDERED_ITEM_RE
                    .captures(line)
                    .map(|caps| (ListKind::Ordered, caps))
            });

        match item {
            Some((kind, caps)) => {
                if run_kind != Some(kind) {
                    flush(&mut lines, &mut run_items, &mut run_kind);
                    run_kind = Some(kind);
                }
                run_items.push(format!("<li>{}</li>", &caps[1]));
            }
            None => {
                flush(&mut lines, &mut run_items, &mut run_kind);
                lines.push(line.to_string());
            }
        }
    }
    flush(&mut lines, &mut run_items, &mut run_kind);

    lines.join("\n")
}

/// Splits remaining text on blank lines and wraps non-block segments in
/// `<p>`, turning single newlines inside a segment into `<br>`.
fn render_paragraphs(html: &str) -> String {
    let mut blocks: Vec<String> = Vec::new();

    for block in PARAGRAPH_SPLIT_RE.split(html) {
        let trimmed = block.trim();
        if trimmed.is_empty() {
            continue;
        }

        if BLOCK_START_RE.is_match(trimmed) {
            blocks.push(trimmed.to_string());
        } else {
            let joined = trimmed.split('\n').collect::<Vec<_>>().join("<br>");
            blocks.push(format!("<p>{joined}</p>"));
        }
    }

    blocks.concat()
}
