//! Literal-content stash for code spans.
//!
//! Code text must survive every later rewrite pass untouched: a fence body
//! containing `**stars**` or `<angle>` text would otherwise be rewritten by
//! the emphasis rules or stripped by the tag catch-all. Each code body is
//! swapped for an opaque token while the cascade runs and restored at the
//! very end.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static STASH_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("\u{0}code:(\\d+)\u{0}").expect("valid stash token regex"));

/// Per-call store of code bodies, addressed by token index.
pub(crate) struct CodeStash {
    slots: Vec<String>,
}

impl CodeStash {
    pub(crate) fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Stores one code body and returns the token standing in for it.
    pub(crate) fn put(&mut self, body: String) -> String {
        let token = format!("\u{0}code:{}\u{0}", self.slots.len());
        self.slots.push(body);
        token
    }

    /// Replaces every token in `text` with its stored body.
    pub(crate) fn restore(&self, text: &str) -> String {
        STASH_TOKEN_RE
            .replace_all(text, |caps: &Captures<'_>| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| self.slots.get(index).cloned())
                    .unwrap_or_default()
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::CodeStash;

    #[test]
    fn put_and_restore_roundtrip() {
        let mut stash = CodeStash::new();
        let first = stash.put("let x = 1;".to_string());
        let second = stash.put("**raw**".to_string());

        let text = format!("a {first} b {second} c");
        assert_eq!(stash.restore(&text), "a let x = 1; b **raw** c");
    }

    #[test]
    fn tokens_never_collide_with_ordinary_text() {
        let stash = CodeStash::new();
        assert_eq!(stash.restore("1. plain list line"), "1. plain list line");
    }
}
