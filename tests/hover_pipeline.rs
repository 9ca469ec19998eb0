//! End-to-end tests for the open -> hover pipeline, running the analysis
//! facade against the built-in lexical engine the way the protocol layer
//! does.

use std::collections::HashMap;
use std::io;
use std::sync::Arc;

use tower_lsp::lsp_types::{HoverContents, MarkedString, Position};

use altss::engine::lexical::LexicalEngine;
use altss::engine::{EngineOptions, Host, NormalizedPath, NullCancellationToken};
use altss::lsp::facade::AnalysisFacade;
use altss::lsp::hover::HoverProvider;

struct MemoryHost {
    files: HashMap<String, String>,
}

impl Host for MemoryHost {
    fn read_file(&self, path: &NormalizedPath) -> io::Result<String> {
        self.files
            .get(path.as_str())
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }
}

fn facade_with(files: &[(&str, &str)]) -> AnalysisFacade {
    let host = MemoryHost {
        files: files
            .iter()
            .map(|(p, t)| (p.to_string(), t.to_string()))
            .collect(),
    };
    AnalysisFacade::new(Arc::new(LexicalEngine::new(
        Arc::new(host),
        Arc::new(NullCancellationToken),
        EngineOptions::default(),
    )))
}

#[test]
fn open_then_hover_on_keyword_yields_bold_kind_block() {
    let facade = facade_with(&[("/a.ts", "class A {}")]);
    facade.notify_file_opened("/a.ts").unwrap();

    let info = facade
        .quick_info_at(
            "/a.ts",
            Position {
                line: 0,
                character: 1,
            },
        )
        .unwrap()
        .expect("hover inside `class` should produce quick info");

    let hover = HoverProvider::new().hover_for_quick_info(&info);
    let HoverContents::Array(blocks) = hover.contents else {
        panic!("expected array hover contents");
    };

    assert_eq!(blocks.len(), 3);
    assert!(matches!(
        &blocks[0],
        MarkedString::LanguageString(ls)
            if ls.language == "typescript" && !ls.value.is_empty()
    ));
    assert_eq!(blocks[1], MarkedString::String("**keyword**".to_string()));
}

#[test]
fn hover_on_whitespace_yields_nothing() {
    let facade = facade_with(&[("/a.ts", "class A {}")]);
    facade.notify_file_opened("/a.ts").unwrap();

    let info = facade
        .quick_info_at(
            "/a.ts",
            Position {
                line: 0,
                character: 5,
            },
        )
        .unwrap();
    assert!(info.is_none());
}

#[test]
fn hover_on_never_opened_file_yields_nothing() {
    let facade = facade_with(&[("/a.ts", "class A {}")]);

    let info = facade
        .quick_info_at(
            "/a.ts",
            Position {
                line: 0,
                character: 1,
            },
        )
        .unwrap();
    assert!(info.is_none());
}

#[test]
fn hover_past_end_of_file_yields_nothing() {
    let facade = facade_with(&[("/a.ts", "class A {}")]);
    facade.notify_file_opened("/a.ts").unwrap();

    let info = facade
        .quick_info_at(
            "/a.ts",
            Position {
                line: 12,
                character: 0,
            },
        )
        .unwrap();
    assert!(info.is_none());
}

#[test]
fn open_then_close_then_hover_still_answers() {
    let facade = facade_with(&[("/a.ts", "class A {}")]);
    facade.notify_file_opened("/a.ts").unwrap();
    facade.notify_file_closed("/a.ts").unwrap();

    // Close re-registers the file as open, so the engine keeps answering.
    let info = facade
        .quick_info_at(
            "/a.ts",
            Position {
                line: 0,
                character: 1,
            },
        )
        .unwrap();
    assert!(info.is_some());
}

#[test]
fn hover_on_second_line_uses_engine_line_numbering() {
    let facade = facade_with(&[("/b.ts", "let x = 1\nreturn x\n")]);
    facade.notify_file_opened("/b.ts").unwrap();

    // Inside `return` on the zero-based line 1.
    let info = facade
        .quick_info_at(
            "/b.ts",
            Position {
                line: 1,
                character: 2,
            },
        )
        .unwrap()
        .expect("hover inside `return` should produce quick info");
    assert_eq!(info.kind, "keyword");
    assert_eq!(info.display_parts[0].text, "return");
}
