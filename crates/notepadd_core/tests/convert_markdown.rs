use notepadd_core::markdown_to_html;

#[test]
fn empty_input_returns_empty_fragment() {
    assert_eq!(markdown_to_html(""), "");
}

#[test]
fn escapes_html_significant_characters() {
    let html = markdown_to_html("a < b & c > d");
    assert_eq!(html, "<p>a &lt; b &amp; c &gt; d</p>");
}

#[test]
fn existing_nbsp_is_not_double_escaped() {
    let html = markdown_to_html("fix&nbsp;this");
    assert_eq!(html, "<p>fix&nbsp;this</p>");
    assert!(!html.contains("&amp;nbsp;"));
}

#[test]
fn heading_and_inline_emphasis_compose() {
    let html = markdown_to_html("# Title\n\nSome **bold** and *italic*.");
    assert!(html.contains("<h1>Title</h1>"));
    assert!(html.contains("<p>Some <strong>bold</strong> and <em>italic</em>.</p>"));
}

#[test]
fn heading_levels_map_to_matching_tags() {
    assert_eq!(markdown_to_html("## Two"), "<h2>Two</h2>");
    assert_eq!(markdown_to_html("### Three"), "<h3>Three</h3>");
    assert_eq!(markdown_to_html("###### Six"), "<h6>Six</h6>");
}

#[test]
fn seven_hashes_do_not_become_a_heading() {
    let html = markdown_to_html("####### seven");
    assert_eq!(html, "<p>####### seven</p>");
}

#[test]
fn horizontal_rule_lines_become_hr() {
    assert_eq!(markdown_to_html("a\n\n---\n\nb"), "<p>a</p><hr><p>b</p>");
    assert_eq!(markdown_to_html("***"), "<hr>");
}

#[test]
fn dash_rule_requires_its_own_line() {
    let html = markdown_to_html("not --- a rule");
    assert!(!html.contains("<hr>"));
}

#[test]
fn fenced_code_is_protected_from_inline_rules() {
    let html = markdown_to_html("```\n**not bold** and *not italic*\n```");
    assert!(html.starts_with("<pre><code>"));
    assert!(html.contains("**not bold**"));
    assert!(html.contains("*not italic*"));
    assert!(!html.contains("<strong>"));
    assert!(!html.contains("<em>"));
}

#[test]
fn fenced_code_escapes_angle_brackets() {
    let html = markdown_to_html("```\nfn less(a: i32) -> bool { a < 3 }\n```");
    assert!(html.contains("a &lt; 3"));
}

#[test]
fn inline_code_span_is_converted_and_protected() {
    assert_eq!(
        markdown_to_html("Use `let x` here"),
        "<p>Use <code>let x</code> here</p>"
    );
    assert_eq!(markdown_to_html("`a*b*c`"), "<p><code>a*b*c</code></p>");
}

#[test]
fn bold_markers_of_both_kinds_become_strong() {
    assert_eq!(markdown_to_html("**stars**"), "<p><strong>stars</strong></p>");
    assert_eq!(
        markdown_to_html("__underscores__"),
        "<p><strong>underscores</strong></p>"
    );
}

#[test]
fn italic_markers_of_both_kinds_become_em() {
    assert_eq!(markdown_to_html("*stars*"), "<p><em>stars</em></p>");
    assert_eq!(markdown_to_html("_underscores_"), "<p><em>underscores</em></p>");
}

#[test]
fn strikethrough_becomes_strike() {
    assert_eq!(markdown_to_html("~~gone~~"), "<p><strike>gone</strike></p>");
}

#[test]
fn images_convert_before_links() {
    let html = markdown_to_html("![cover](img.png) and [site](https://example.com)");
    assert!(html.contains("<img src=\"img.png\" alt=\"cover\">"));
    assert!(html.contains("<a href=\"https://example.com\">site</a>"));
}

#[test]
fn blockquote_line_becomes_blockquote_element() {
    assert_eq!(
        markdown_to_html("> wisdom"),
        "<blockquote>wisdom</blockquote>"
    );
}

#[test]
fn adjacent_unordered_items_form_one_list() {
    assert_eq!(
        markdown_to_html("- one\n- two"),
        "<ul><li>one</li><li>two</li></ul>"
    );
}

#[test]
fn all_unordered_marker_kinds_share_a_run() {
    assert_eq!(
        markdown_to_html("- dash\n* star\n+ plus"),
        "<ul><li>dash</li><li>star</li><li>plus</li></ul>"
    );
}

#[test]
fn adjacent_ordered_items_form_one_list() {
    assert_eq!(
        markdown_to_html("1. first\n2. second"),
        "<ol><li>first</li><li>second</li></ol>"
    );
}

#[test]
fn non_list_line_breaks_the_run() {
    let html = markdown_to_html("- a\n\nplain\n\n- b");
    assert_eq!(html.matches("<ul>").count(), 2);
    assert!(html.contains("<p>plain</p>"));
}

#[test]
fn single_newline_becomes_br_inside_paragraph() {
    assert_eq!(
        markdown_to_html("line one\nline two"),
        "<p>line one<br>line two</p>"
    );
}

#[test]
fn blank_lines_split_paragraphs() {
    assert_eq!(
        markdown_to_html("first para\n\nsecond para"),
        "<p>first para</p><p>second para</p>"
    );
}

#[test]
fn space_runs_are_preserved_as_nbsp() {
    assert_eq!(markdown_to_html("a  b"), "<p>a&nbsp;&nbsp;b</p>");
}

#[test]
fn unterminated_bold_marker_stays_literal() {
    assert_eq!(markdown_to_html("lone ** marker"), "<p>lone ** marker</p>");
}
