//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `notepadd_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("notepadd_core version={}", notepadd_core::core_version());

    let sample = "# notepadd\n\nSmoke **check** for the converter.";
    let html = notepadd_core::markdown_to_html(sample);
    println!("markdown_to_html={html}");
    println!("html_to_markdown={:?}", notepadd_core::html_to_markdown(&html));
}
