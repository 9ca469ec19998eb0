//! altss - a Language Server Protocol bridge for TypeScript tooling
//!
//! This crate does not analyze source code itself. It sits between an LSP
//! client (an editor) and a language-analysis engine, translating protocol
//! requests into engine queries and engine results back into protocol
//! payloads:
//!
//! - `lsp` - the LSP-facing layer: server state machine, open-document
//!   registry, capability negotiation, and result shaping for hover and
//!   completion.
//! - `engine` - the contract the bridge consumes from the analysis engine
//!   (project service, script info, quick info), plus a small lexical
//!   stand-in implementation so the server binary works out of the box.
//!
//! The binary entry point lives in `src/bin/lsp.rs` and speaks LSP over
//! stdin/stdout.

pub mod engine;
pub mod lsp;

pub use lsp::AltssLanguageServer;
