//! Analysis facade
//!
//! Owns the process-wide handle to the analysis engine and presents a
//! path-keyed query surface to the protocol layer. This module is the
//! single place where LSP's zero-based line/character coordinates become
//! the engine's one-based line/offset convention.

use std::sync::Arc;

use tower_lsp::lsp_types::Position;

use crate::engine::lexical::LexicalEngine;
use crate::engine::{
    to_normalized_path, EngineError, EngineOptions, LineOffset, NullCancellationToken, OsHost,
    ProjectService, QuickInfo,
};

/// Path-keyed query surface over the analysis engine.
pub struct AnalysisFacade {
    service: Arc<dyn ProjectService>,
}

impl AnalysisFacade {
    pub fn new(service: Arc<dyn ProjectService>) -> Self {
        Self { service }
    }

    /// Construct the facade over the built-in lexical engine: real file
    /// system host, non-cancellable token, inferred-project modes off.
    pub fn with_default_engine() -> Self {
        Self::new(Arc::new(LexicalEngine::new(
            Arc::new(OsHost),
            Arc::new(NullCancellationToken),
            EngineOptions::default(),
        )))
    }

    /// Register `path` with the engine's client-file tracking so it can
    /// construct the containing project.
    pub fn notify_file_opened(&self, path: &str) -> Result<(), EngineError> {
        self.service.open_client_file(&to_normalized_path(path))
    }

    /// Counterpart of [`notify_file_opened`](Self::notify_file_opened) for
    /// document close. The engine surface offers no close operation, so
    /// this re-issues the open call and the engine keeps the file tracked.
    // TODO: issue a real close once the project-service contract grows one.
    pub fn notify_file_closed(&self, path: &str) -> Result<(), EngineError> {
        self.service.open_client_file(&to_normalized_path(path))
    }

    /// Quick info at a zero-based LSP position in `path`.
    ///
    /// `Ok(None)` covers every ordinary miss: untracked file, no owning
    /// project, position out of range, or nothing at the position. An
    /// `Err` means the engine itself failed; callers downgrade that to a
    /// logged warning and a null result.
    pub fn quick_info_at(
        &self,
        path: &str,
        position: Position,
    ) -> Result<Option<QuickInfo>, EngineError> {
        let path = to_normalized_path(path);

        let Some(script) = self.service.script_info_for_normalized_path(&path) else {
            return Ok(None);
        };
        let Some(project) = self.service.default_project_for_file(&path, false) else {
            return Ok(None);
        };
        let Some(offset) = script.line_offset_to_position(to_engine_line_offset(position)) else {
            return Ok(None);
        };

        project
            .language_service()
            .quick_info_at_position(script.file_name(), offset)
    }
}

/// LSP positions are zero-based, the engine's are one-based. Every query
/// crosses that boundary exactly here.
fn to_engine_line_offset(position: Position) -> LineOffset {
    LineOffset {
        line: position.line + 1,
        offset: position.character + 1,
    }
}
