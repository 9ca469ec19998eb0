//! Client capability negotiation
//!
//! The client declares what it supports in the initialize request as a
//! deeply nested, fully optional structure. The flags the bridge cares
//! about are resolved here exactly once and cached; the raw capabilities
//! object is never probed again after initialization.

use tower_lsp::lsp_types::ClientCapabilities;

/// Client capability flags the server reads after initialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientCapabilitySet {
    /// Client supports `workspace/configuration` pushes.
    pub configuration: bool,
    /// Client sends workspace-folder change notifications.
    pub workspace_folders: bool,
    /// Client renders related information in diagnostics.
    pub diagnostic_related_information: bool,
}

impl ClientCapabilitySet {
    /// Resolve the flags from the client's declared capabilities. Absent
    /// fields mean unsupported.
    pub fn from_client(capabilities: &ClientCapabilities) -> Self {
        let workspace = capabilities.workspace.as_ref();

        Self {
            configuration: workspace.and_then(|w| w.configuration).unwrap_or(false),
            workspace_folders: workspace.and_then(|w| w.workspace_folders).unwrap_or(false),
            diagnostic_related_information: capabilities
                .text_document
                .as_ref()
                .and_then(|t| t.publish_diagnostics.as_ref())
                .and_then(|p| p.related_information)
                .unwrap_or(false),
        }
    }
}
