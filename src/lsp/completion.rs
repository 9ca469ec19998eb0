//! Completion provider
//!
//! The completion list is a fixed two-item placeholder; the query position
//! and document are deliberately not consulted and no engine query occurs.
//! Items carry a numeric correlation tag in `data` so the later resolve
//! request can find the static detail text for the item it belongs to.

use serde_json::{json, Value};
use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind, Documentation};

/// Provider for completion items and completion resolution.
pub struct CompletionProvider;

impl CompletionProvider {
    pub fn new() -> Self {
        Self
    }

    /// The initial completion list. Always the same two items.
    pub fn complete(&self) -> Vec<CompletionItem> {
        vec![
            placeholder_item("TypeScript", 1),
            placeholder_item("JavaScript", 2),
        ]
    }

    /// Fill in `detail` and `documentation` for a previously issued item,
    /// keyed on its correlation tag. Items with an unknown tag pass
    /// through unchanged.
    pub fn resolve(&self, mut item: CompletionItem) -> CompletionItem {
        match item.data.as_ref().and_then(Value::as_i64) {
            Some(1) => {
                item.detail = Some("TypeScript details".to_string());
                item.documentation =
                    Some(Documentation::String("TypeScript documentation".to_string()));
            }
            Some(2) => {
                item.detail = Some("JavaScript details".to_string());
                item.documentation =
                    Some(Documentation::String("JavaScript documentation".to_string()));
            }
            _ => {}
        }
        item
    }
}

impl Default for CompletionProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn placeholder_item(label: &str, tag: i64) -> CompletionItem {
    CompletionItem {
        label: label.to_string(),
        kind: Some(CompletionItemKind::TEXT),
        data: Some(json!(tag)),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_list_is_fixed() {
        let provider = CompletionProvider::new();
        let items = provider.complete();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].label, "TypeScript");
        assert_eq!(items[0].data, Some(json!(1)));
        assert_eq!(items[1].label, "JavaScript");
        assert_eq!(items[1].data, Some(json!(2)));
        assert!(items.iter().all(|i| i.kind == Some(CompletionItemKind::TEXT)));
    }

    #[test]
    fn test_resolve_typescript_item() {
        let provider = CompletionProvider::new();
        let resolved = provider.resolve(placeholder_item("TypeScript", 1));

        assert_eq!(resolved.detail.as_deref(), Some("TypeScript details"));
        assert_eq!(
            resolved.documentation,
            Some(Documentation::String("TypeScript documentation".to_string()))
        );
    }

    #[test]
    fn test_resolve_javascript_item() {
        let provider = CompletionProvider::new();
        let resolved = provider.resolve(placeholder_item("JavaScript", 2));

        assert_eq!(resolved.detail.as_deref(), Some("JavaScript details"));
        assert_eq!(
            resolved.documentation,
            Some(Documentation::String("JavaScript documentation".to_string()))
        );
    }

    #[test]
    fn test_resolve_unknown_tag_is_a_no_op() {
        let provider = CompletionProvider::new();
        let item = placeholder_item("Other", 7);
        let resolved = provider.resolve(item.clone());
        assert_eq!(resolved, item);

        // No tag at all behaves the same way.
        let untagged = CompletionItem {
            label: "Untagged".to_string(),
            ..Default::default()
        };
        assert_eq!(provider.resolve(untagged.clone()), untagged);
    }
}
