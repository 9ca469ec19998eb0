//! LSP server implementation
//!
//! The protocol-facing state machine: capability negotiation on
//! initialize, document lifecycle tracking, and the hover/completion
//! request handlers. Engine access goes through the analysis facade; the
//! server itself never touches engine types beyond the quick-info result.

use dashmap::DashMap;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use super::capabilities::ClientCapabilitySet;
use super::completion::CompletionProvider;
use super::document::Document;
use super::facade::AnalysisFacade;
use super::hover::HoverProvider;

/// The altss language server.
pub struct AltssLanguageServer {
    /// LSP client for sending notifications
    client: Client,

    /// Open documents, keyed by URI (thread-safe)
    documents: DashMap<Url, Document>,

    /// Query surface over the analysis engine
    facade: AnalysisFacade,

    /// Client capability flags, resolved once during initialize
    capabilities: RwLock<ClientCapabilitySet>,

    completion: CompletionProvider,
    hover: HoverProvider,
}

impl AltssLanguageServer {
    /// Create a server over the built-in engine.
    pub fn new(client: Client) -> Self {
        Self::with_facade(client, AnalysisFacade::with_default_engine())
    }

    /// Create a server over an explicitly constructed facade.
    pub fn with_facade(client: Client, facade: AnalysisFacade) -> Self {
        Self {
            client,
            documents: DashMap::new(),
            facade,
            capabilities: RwLock::new(ClientCapabilitySet::default()),
            completion: CompletionProvider::new(),
            hover: HoverProvider::new(),
        }
    }

    /// Get server capabilities
    fn server_capabilities() -> ServerCapabilities {
        ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Options(
                TextDocumentSyncOptions {
                    open_close: Some(true),
                    change: Some(TextDocumentSyncKind::INCREMENTAL),
                    save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
                        include_text: Some(false),
                    })),
                    ..Default::default()
                },
            )),

            completion_provider: Some(CompletionOptions {
                resolve_provider: Some(true),
                trigger_characters: Some(vec![".".to_string()]),
                ..Default::default()
            }),

            hover_provider: Some(HoverProviderCapability::Simple(true)),

            ..Default::default()
        }
    }

    /// Warn on the client console when an engine notification fails. The
    /// document lifecycle must keep flowing regardless.
    async fn warn_engine(&self, what: &str, uri: &Url, err: impl std::fmt::Display) {
        self.client
            .log_message(
                MessageType::WARNING,
                format!("{} failed for {}: {}", what, uri, err),
            )
            .await;
    }
}

/// The path form the engine expects: the URI with its `file://` prefix
/// stripped.
fn engine_path(uri: &Url) -> &str {
    uri.as_str().strip_prefix("file://").unwrap_or(uri.as_str())
}

#[tower_lsp::async_trait]
impl LanguageServer for AltssLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        *self.capabilities.write().await = ClientCapabilitySet::from_client(&params.capabilities);

        Ok(InitializeResult {
            capabilities: Self::server_capabilities(),
            server_info: Some(ServerInfo {
                name: "altss".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        let capabilities = *self.capabilities.read().await;

        if capabilities.workspace_folders {
            let registration = Registration {
                id: "workspace/didChangeWorkspaceFolders".to_string(),
                method: "workspace/didChangeWorkspaceFolders".to_string(),
                register_options: None,
            };
            if let Err(err) = self.client.register_capability(vec![registration]).await {
                self.client
                    .log_message(
                        MessageType::WARNING,
                        format!("workspace folder registration failed: {}", err),
                    )
                    .await;
            }
        }

        self.client
            .log_message(MessageType::INFO, "altss initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    // === Document Synchronization ===

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;

        if self.documents.contains_key(&uri) {
            // Idempotent reopen: keep the registry entry, do not register
            // the file with the engine a second time.
            self.client
                .log_message(
                    MessageType::INFO,
                    format!("Document already open {}", uri),
                )
                .await;
            return;
        }

        let doc = Document::new(params.text_document.text, params.text_document.version);
        self.documents.insert(uri.clone(), doc);

        self.client
            .log_message(MessageType::INFO, format!("Document opened {}", uri))
            .await;

        if let Err(err) = self.facade.notify_file_opened(engine_path(&uri)) {
            self.warn_engine("engine open", &uri, err).await;
        }
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        if let Some(mut doc) = self.documents.get_mut(&uri) {
            for change in params.content_changes {
                doc.apply_change(change, version);
            }
        }

        self.client
            .log_message(MessageType::INFO, format!("Contents changed for {}", uri))
            .await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.documents.remove(&uri);

        self.client
            .log_message(MessageType::INFO, format!("Document closed {}", uri))
            .await;

        if let Err(err) = self.facade.notify_file_closed(engine_path(&uri)) {
            self.warn_engine("engine close", &uri, err).await;
        }
    }

    async fn did_change_watched_files(&self, _params: DidChangeWatchedFilesParams) {
        self.client
            .log_message(MessageType::INFO, "Watched file change event received")
            .await;
    }

    async fn did_change_workspace_folders(&self, _params: DidChangeWorkspaceFoldersParams) {
        self.client
            .log_message(MessageType::INFO, "Workspace folder change event received")
            .await;
    }

    // === Completion ===

    async fn completion(&self, _params: CompletionParams) -> Result<Option<CompletionResponse>> {
        self.client
            .log_message(MessageType::INFO, "Completion request")
            .await;

        Ok(Some(CompletionResponse::Array(self.completion.complete())))
    }

    async fn completion_resolve(&self, item: CompletionItem) -> Result<CompletionItem> {
        Ok(self.completion.resolve(item))
    }

    // === Hover ===

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        match self.facade.quick_info_at(engine_path(&uri), position) {
            Ok(Some(info)) => Ok(Some(self.hover.hover_for_quick_info(&info))),
            Ok(None) => Ok(None),
            Err(err) => {
                // Hover is best effort; engine failures degrade to "no
                // hover" rather than a protocol error.
                self.warn_engine("hover query", &uri, err).await;
                Ok(None)
            }
        }
    }
}
