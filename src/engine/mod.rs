//! Analysis engine contract
//!
//! The bridge delegates all language analysis to a project service: a
//! construct that tracks client-opened files, groups them into projects,
//! and answers language-service queries per project. This module defines
//! that consumed surface as object-safe traits together with the
//! engine-native data types (normalized paths, one-based line/offset
//! positions, quick-info results).
//!
//! Everything here is convention-bearing: the engine counts lines and
//! offsets from one while LSP counts from zero, and queries address files
//! by normalized OS path rather than by URI. The `lsp::facade` module is
//! the only place those conventions are translated.

pub mod lexical;

use std::io;
use std::sync::Arc;

use thiserror::Error;

/// Error raised inside the analysis engine.
///
/// Lookup misses (unknown file, no owning project, nothing at a position)
/// are *not* errors; they are `None` results. An `EngineError` means the
/// engine itself rejected the input or failed internally.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine could not interpret the given path.
    #[error("engine rejected path `{0}`")]
    BadPath(String),

    /// Unexpected failure inside the engine.
    #[error("engine failure: {0}")]
    Internal(String),
}

/// A file path in the engine's canonical form: forward slashes only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath(String);

impl NormalizedPath {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Convert an OS path string into the engine's canonical form.
pub fn to_normalized_path(path: &str) -> NormalizedPath {
    NormalizedPath(path.replace('\\', "/"))
}

/// A one-based (line, offset) pair, the engine's position convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineOffset {
    pub line: u32,
    pub offset: u32,
}

/// A typed fragment of display text produced by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolDisplayPart {
    pub text: String,
    pub kind: String,
}

impl SymbolDisplayPart {
    pub fn new(text: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: kind.into(),
        }
    }
}

/// Join display parts into plain text, discarding the part kinds.
pub fn display_parts_to_string(parts: &[SymbolDisplayPart]) -> String {
    parts.iter().map(|p| p.text.as_str()).collect()
}

/// Symbol and type information the engine reports for a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickInfo {
    /// Engine-defined kind tag, e.g. `"function"`, `"class"`, `"keyword"`.
    pub kind: String,
    /// Signature / declaration text.
    pub display_parts: Vec<SymbolDisplayPart>,
    /// Attached documentation, if any.
    pub documentation: Vec<SymbolDisplayPart>,
}

/// Per-file state the engine tracks inside a project.
pub trait ScriptInfo: Send + Sync {
    /// The file name the language service expects in queries.
    fn file_name(&self) -> &str;

    /// Convert a one-based line/offset pair into an absolute character
    /// position within the file. `None` if the pair is out of range.
    fn line_offset_to_position(&self, position: LineOffset) -> Option<usize>;
}

/// Language-service queries scoped to one project.
pub trait LanguageService: Send + Sync {
    /// Quick info at an absolute character position, or `None` when the
    /// position carries no bound symbol (whitespace, punctuation).
    fn quick_info_at_position(
        &self,
        file_name: &str,
        position: usize,
    ) -> Result<Option<QuickInfo>, EngineError>;
}

/// A group of files sharing compilation and configuration context.
pub trait Project: Send + Sync {
    fn language_service(&self) -> Arc<dyn LanguageService>;
}

/// The engine's client-file tracking and project discovery surface.
///
/// Note the asymmetry: there is an open call but no close call. Client
/// files stay registered for the life of the service.
pub trait ProjectService: Send + Sync {
    /// Tell the engine a client opened a file so it can lazily construct
    /// the containing project. Paths with no discoverable project are
    /// accepted; later queries for them simply return nothing.
    fn open_client_file(&self, path: &NormalizedPath) -> Result<(), EngineError>;

    /// Per-file tracked state, if the engine knows the file.
    fn script_info_for_normalized_path(&self, path: &NormalizedPath)
        -> Option<Arc<dyn ScriptInfo>>;

    /// The project that owns `path`, if any.
    fn default_project_for_file(
        &self,
        path: &NormalizedPath,
        open_if_closed: bool,
    ) -> Option<Arc<dyn Project>>;
}

/// File-system and OS primitives the engine needs from its host.
pub trait Host: Send + Sync {
    fn read_file(&self, path: &NormalizedPath) -> io::Result<String>;
}

/// Host backed by the real file system.
#[derive(Debug, Default)]
pub struct OsHost;

impl Host for OsHost {
    fn read_file(&self, path: &NormalizedPath) -> io::Result<String> {
        std::fs::read_to_string(path.as_str())
    }
}

/// Cooperative cancellation signal checked by the engine between queries.
pub trait CancellationToken: Send + Sync {
    fn is_cancellation_requested(&self) -> bool;
}

/// Token that never requests cancellation. The bridge runs every query to
/// completion, so this is the token the server is constructed with.
#[derive(Debug, Default)]
pub struct NullCancellationToken;

impl CancellationToken for NullCancellationToken {
    fn is_cancellation_requested(&self) -> bool {
        false
    }
}

/// Project discovery modes for engine construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineOptions {
    /// Collapse all orphan files into one inferred project.
    pub use_single_inferred_project: bool,
    /// One inferred project per project root directory.
    pub use_inferred_project_per_project_root: bool,
}
