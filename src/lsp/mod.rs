//! Language Server Protocol bridge layer
//!
//! The LSP-facing half of the crate:
//!
//! - `AltssLanguageServer` - main server struct implementing the protocol
//! - `Document` - in-memory text of an open document (rope-backed)
//! - `ClientCapabilitySet` - client capability flags resolved at initialize
//! - `AnalysisFacade` - path-keyed query surface over the analysis engine,
//!   and the single place LSP coordinates become engine coordinates
//! - hover / completion providers shaping engine results into responses
//!
//! # Architecture
//!
//! Built on `tower-lsp`. Requests flow client -> server handlers ->
//! document registry and/or analysis facade -> engine, then results are
//! shaped back into LSP payloads.
//!
//! # References
//!
//! - LSP Specification: <https://microsoft.github.io/language-server-protocol/>
//! - tower-lsp: <https://docs.rs/tower-lsp/>

pub mod capabilities;
pub mod completion;
pub mod document;
pub mod facade;
pub mod hover;
pub mod server;

pub use server::AltssLanguageServer;
