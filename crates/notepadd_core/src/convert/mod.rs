//! Markdown <-> HTML conversion between stored notes and the rich editor.
//!
//! # Responsibility
//! - Translate stored Markdown into an HTML fragment the rich-text editing
//!   surface can load.
//! - Translate edited HTML fragments back into Markdown for persistence.
//!
//! # Invariants
//! - Both directions are pure, total functions: any input string produces an
//!   output string, malformed markup degrades to literal text.
//! - No state survives a call; concurrent invocations need no coordination.
//! - Rewrite passes run in a fixed order; reordering them corrupts output
//!   (images before links, bold before italic, fenced code before inline).
//!
//! # See also
//! - docs/architecture/note-schema.md

mod entities;
mod html_to_markdown;
mod markdown_to_html;
mod stash;

pub use html_to_markdown::html_to_markdown;
pub use markdown_to_html::markdown_to_html;
