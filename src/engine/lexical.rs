//! Lexical stand-in engine
//!
//! A minimal `ProjectService` implementation that keeps the server usable
//! without an external analysis engine attached. It tracks client files,
//! builds a per-file line index, and answers quick-info queries for
//! language keywords only. There is no parsing, type checking, or symbol
//! resolution here; a full engine plugs in through the same traits.

use std::sync::Arc;

use dashmap::DashMap;

use super::{
    CancellationToken, EngineError, EngineOptions, Host, LanguageService, LineOffset,
    NormalizedPath, Project, ProjectService, QuickInfo, ScriptInfo, SymbolDisplayPart,
};

/// TypeScript keywords recognized by the stand-in engine.
const KEYWORDS: &[&str] = &[
    "abstract", "any", "as", "asserts", "async", "await", "boolean", "break", "case", "catch",
    "class", "const", "continue", "debugger", "declare", "default", "delete", "do", "else",
    "enum", "export", "extends", "false", "finally", "for", "from", "function", "get", "if",
    "implements", "import", "in", "infer", "instanceof", "interface", "is", "keyof", "let",
    "namespace", "never", "new", "null", "number", "object", "of", "package", "private",
    "protected", "public", "readonly", "return", "satisfies", "set", "static", "string",
    "super", "switch", "symbol", "this", "throw", "true", "try", "type", "typeof", "undefined",
    "unique", "unknown", "var", "void", "while", "with", "yield",
];

/// Tracked state for one client file.
#[derive(Debug)]
struct ScriptEntry {
    file_name: String,
    /// File text as characters, the unit the position math works in.
    chars: Vec<char>,
    /// Character offset of each line start.
    line_starts: Vec<usize>,
}

impl ScriptEntry {
    fn new(file_name: String, text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let mut line_starts = vec![0];
        for (i, c) in chars.iter().enumerate() {
            if *c == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            file_name,
            chars,
            line_starts,
        }
    }
}

impl ScriptInfo for ScriptEntry {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn line_offset_to_position(&self, position: LineOffset) -> Option<usize> {
        if position.line == 0 || position.offset == 0 {
            return None;
        }
        let line_start = *self.line_starts.get(position.line as usize - 1)?;
        let absolute = line_start + position.offset as usize - 1;
        if absolute > self.chars.len() {
            return None;
        }
        Some(absolute)
    }
}

/// Keyword-classifying language service shared by every project.
struct LexicalLanguageService {
    files: Arc<DashMap<NormalizedPath, Arc<ScriptEntry>>>,
    token: Arc<dyn CancellationToken>,
}

impl LanguageService for LexicalLanguageService {
    fn quick_info_at_position(
        &self,
        file_name: &str,
        position: usize,
    ) -> Result<Option<QuickInfo>, EngineError> {
        if self.token.is_cancellation_requested() {
            return Ok(None);
        }

        let entry = match self
            .files
            .iter()
            .find(|e| e.value().file_name == file_name)
        {
            Some(e) => Arc::clone(e.value()),
            None => return Ok(None),
        };

        let Some(word) = word_at(&entry.chars, position) else {
            return Ok(None);
        };

        if !KEYWORDS.contains(&word.as_str()) {
            return Ok(None);
        }

        Ok(Some(QuickInfo {
            kind: "keyword".to_string(),
            display_parts: vec![SymbolDisplayPart::new(word, "keyword")],
            documentation: Vec::new(),
        }))
    }
}

struct LexicalProject {
    service: Arc<LexicalLanguageService>,
}

impl Project for LexicalProject {
    fn language_service(&self) -> Arc<dyn LanguageService> {
        Arc::clone(&self.service) as Arc<dyn LanguageService>
    }
}

/// The stand-in project service. All tracked files share one project.
pub struct LexicalEngine {
    host: Arc<dyn Host>,
    files: Arc<DashMap<NormalizedPath, Arc<ScriptEntry>>>,
    service: Arc<LexicalLanguageService>,
}

impl LexicalEngine {
    pub fn new(
        host: Arc<dyn Host>,
        token: Arc<dyn CancellationToken>,
        options: EngineOptions,
    ) -> Self {
        tracing::debug!(
            single_inferred = options.use_single_inferred_project,
            per_root_inferred = options.use_inferred_project_per_project_root,
            "constructing lexical engine"
        );
        let files = Arc::new(DashMap::new());
        let service = Arc::new(LexicalLanguageService {
            files: Arc::clone(&files),
            token,
        });
        Self {
            host,
            files,
            service,
        }
    }
}

impl ProjectService for LexicalEngine {
    fn open_client_file(&self, path: &NormalizedPath) -> Result<(), EngineError> {
        if path.as_str().is_empty() {
            return Err(EngineError::BadPath(path.to_string()));
        }
        if self.files.contains_key(path) {
            return Ok(());
        }
        match self.host.read_file(path) {
            Ok(text) => {
                let entry = Arc::new(ScriptEntry::new(path.as_str().to_string(), &text));
                self.files.insert(path.clone(), entry);
                Ok(())
            }
            Err(err) => {
                // Unreadable files stay untracked; queries for them return
                // nothing rather than failing.
                tracing::debug!(%path, %err, "client file not readable");
                Ok(())
            }
        }
    }

    fn script_info_for_normalized_path(
        &self,
        path: &NormalizedPath,
    ) -> Option<Arc<dyn ScriptInfo>> {
        self.files
            .get(path)
            .map(|e| Arc::clone(e.value()) as Arc<dyn ScriptInfo>)
    }

    fn default_project_for_file(
        &self,
        path: &NormalizedPath,
        _open_if_closed: bool,
    ) -> Option<Arc<dyn Project>> {
        if !self.files.contains_key(path) {
            return None;
        }
        Some(Arc::new(LexicalProject {
            service: Arc::clone(&self.service),
        }))
    }
}

/// The identifier-shaped word covering `position`, if any.
fn word_at(chars: &[char], position: usize) -> Option<String> {
    if position >= chars.len() || !is_word_char(chars[position]) {
        return None;
    }

    let mut start = position;
    while start > 0 && is_word_char(chars[start - 1]) {
        start -= 1;
    }
    let mut end = position;
    while end < chars.len() && is_word_char(chars[end]) {
        end += 1;
    }

    Some(chars[start..end].iter().collect())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{to_normalized_path, NullCancellationToken};
    use std::collections::HashMap;
    use std::io;

    /// In-memory host for tests.
    struct MemoryHost {
        files: HashMap<String, String>,
    }

    impl MemoryHost {
        fn new(files: &[(&str, &str)]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(p, t)| (p.to_string(), t.to_string()))
                    .collect(),
            }
        }
    }

    impl Host for MemoryHost {
        fn read_file(&self, path: &NormalizedPath) -> io::Result<String> {
            self.files
                .get(path.as_str())
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
        }
    }

    fn engine_with(files: &[(&str, &str)]) -> LexicalEngine {
        LexicalEngine::new(
            Arc::new(MemoryHost::new(files)),
            Arc::new(NullCancellationToken),
            EngineOptions::default(),
        )
    }

    #[test]
    fn test_open_then_query_keyword() {
        let engine = engine_with(&[("/a.ts", "class A {}")]);
        let path = to_normalized_path("/a.ts");
        engine.open_client_file(&path).unwrap();

        let script = engine.script_info_for_normalized_path(&path).unwrap();
        let project = engine.default_project_for_file(&path, false).unwrap();

        // Position of the `l` in `class`.
        let offset = script
            .line_offset_to_position(LineOffset { line: 1, offset: 2 })
            .unwrap();
        let info = project
            .language_service()
            .quick_info_at_position(script.file_name(), offset)
            .unwrap()
            .unwrap();

        assert_eq!(info.kind, "keyword");
        assert_eq!(info.display_parts[0].text, "class");
    }

    #[test]
    fn test_query_on_whitespace_returns_none() {
        let engine = engine_with(&[("/a.ts", "class A {}")]);
        let path = to_normalized_path("/a.ts");
        engine.open_client_file(&path).unwrap();

        let project = engine.default_project_for_file(&path, false).unwrap();
        // Offset 5 is the space after `class`.
        let info = project
            .language_service()
            .quick_info_at_position("/a.ts", 5)
            .unwrap();
        assert!(info.is_none());
    }

    #[test]
    fn test_identifier_is_not_a_keyword() {
        let engine = engine_with(&[("/a.ts", "class Widget {}")]);
        let path = to_normalized_path("/a.ts");
        engine.open_client_file(&path).unwrap();

        let project = engine.default_project_for_file(&path, false).unwrap();
        // Offset 7 is inside `Widget`.
        let info = project
            .language_service()
            .quick_info_at_position("/a.ts", 7)
            .unwrap();
        assert!(info.is_none());
    }

    #[test]
    fn test_unreadable_file_is_tolerated() {
        let engine = engine_with(&[]);
        let path = to_normalized_path("/missing.ts");

        engine.open_client_file(&path).unwrap();
        assert!(engine.script_info_for_normalized_path(&path).is_none());
        assert!(engine.default_project_for_file(&path, false).is_none());
    }

    #[test]
    fn test_empty_path_is_rejected() {
        let engine = engine_with(&[]);
        let err = engine.open_client_file(&to_normalized_path("")).unwrap_err();
        assert!(matches!(err, EngineError::BadPath(_)));
    }

    #[test]
    fn test_reopen_is_idempotent() {
        let engine = engine_with(&[("/a.ts", "let x = 1")]);
        let path = to_normalized_path("/a.ts");
        engine.open_client_file(&path).unwrap();
        engine.open_client_file(&path).unwrap();
        assert!(engine.script_info_for_normalized_path(&path).is_some());
    }

    #[test]
    fn test_line_offset_to_position_multiline() {
        let entry = ScriptEntry::new("/a.ts".into(), "let x = 1\nreturn x\n");

        // `return` starts at line 2, offset 1; absolute character 10.
        assert_eq!(
            entry.line_offset_to_position(LineOffset { line: 2, offset: 1 }),
            Some(10)
        );
        // Zero is not a valid one-based coordinate.
        assert_eq!(
            entry.line_offset_to_position(LineOffset { line: 0, offset: 1 }),
            None
        );
        assert_eq!(
            entry.line_offset_to_position(LineOffset { line: 1, offset: 0 }),
            None
        );
        // Past the last line.
        assert_eq!(
            entry.line_offset_to_position(LineOffset { line: 9, offset: 1 }),
            None
        );
    }
}
