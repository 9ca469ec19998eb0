//! Hover content shaping
//!
//! Turns an engine quick-info result into the LSP hover payload: a fenced
//! code block with the declaration text, the symbol kind in bold, then any
//! attached documentation.

use tower_lsp::lsp_types::{Hover, HoverContents, LanguageString, MarkedString};

use crate::engine::{display_parts_to_string, QuickInfo};

/// Provider for hover payloads.
pub struct HoverProvider;

impl HoverProvider {
    pub fn new() -> Self {
        Self
    }

    /// Build the three-block hover payload from a quick-info result.
    pub fn hover_for_quick_info(&self, info: &QuickInfo) -> Hover {
        let display = display_parts_to_string(&info.display_parts);

        Hover {
            contents: HoverContents::Array(vec![
                MarkedString::LanguageString(LanguageString {
                    language: "typescript".to_string(),
                    value: strip_overload_prefix(&display).to_string(),
                }),
                MarkedString::String(format!("**{}**", info.kind)),
                MarkedString::String(display_parts_to_string(&info.documentation)),
            ]),
            range: None,
        }
    }
}

impl Default for HoverProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop a leading parenthetical like `(method) ` or `(+2 overloads) ` from
/// display text. Only a non-empty parenthesized group at the very start,
/// followed by whitespace, is removed.
fn strip_overload_prefix(text: &str) -> &str {
    let Some(rest) = text.strip_prefix('(') else {
        return text;
    };
    let Some(close) = rest.find(')') else {
        return text;
    };
    if close == 0 {
        return text;
    }
    let after = &rest[close + 1..];
    let trimmed = after.trim_start();
    if trimmed.len() == after.len() {
        // No whitespace after the group, so it is part of the signature.
        return text;
    }
    trimmed
}
