//! altss language server binary
//!
//! Speaks the Language Server Protocol over stdin/stdout.
//!
//! # Usage
//!
//! ```bash
//! # Standard I/O mode (for editors)
//! altss-lsp --stdio
//!
//! # Show version
//! altss-lsp --version
//! ```
//!
//! Stdout carries the protocol, so all logging goes to stderr. Set
//! `RUST_LOG=altss=debug` to see engine-internal messages.

use tower_lsp::{LspService, Server};
use tracing_subscriber::EnvFilter;

use altss::AltssLanguageServer;

/// Command line arguments
#[derive(Debug)]
struct Args {
    stdio: bool,
    version: bool,
    help: bool,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = std::env::args().collect();

        Self {
            stdio: args.contains(&"--stdio".to_string()),
            version: args.contains(&"--version".to_string()) || args.contains(&"-V".to_string()),
            help: args.contains(&"--help".to_string()) || args.contains(&"-h".to_string()),
        }
    }
}

fn print_help() {
    eprintln!(
        r#"altss Language Server

USAGE:
    altss-lsp [OPTIONS]

OPTIONS:
    --stdio         Use stdio for communication (required for editors)
    --version, -V   Print version information
    --help, -h      Print this help message

DESCRIPTION:
    Bridges LSP clients to a TypeScript-style analysis engine. The server
    communicates with editors via standard input/output.

SUPPORTED FEATURES:
    - Hover information
    - Code completion with resolve
    - Document open/change/close tracking
"#
    );
}

fn print_version() {
    eprintln!("altss-lsp {}", env!("CARGO_PKG_VERSION"));
}

#[tokio::main]
async fn main() {
    // Stdout is the protocol channel; logs must go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.help {
        print_help();
        return;
    }

    if args.version {
        print_version();
        return;
    }

    if args.stdio {
        tracing::info!("altss started!");

        let stdin = tokio::io::stdin();
        let stdout = tokio::io::stdout();

        let (service, socket) = LspService::new(AltssLanguageServer::new);

        Server::new(stdin, stdout, socket).serve(service).await;

        tracing::info!("altss stopped");
    } else {
        eprintln!("altss Language Server v{}", env!("CARGO_PKG_VERSION"));
        eprintln!();
        eprintln!("This server communicates via Language Server Protocol over stdin/stdout.");
        eprintln!();
        eprintln!("Usage: altss-lsp --stdio");
        eprintln!();
        eprintln!("For more information, run: altss-lsp --help");
    }
}
