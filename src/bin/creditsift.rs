//! CLI binary for creditsift.
//!
//! A thin shim over the library crate: by default it serves the HTTP API,
//! and with `--file` it runs a single extraction and prints the JSON
//! envelope to stdout.

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::Parser;
use creditsift::{
    build_router, extract, AppState, ExtractionConfig, ExtractionRequest,
};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Run the service on the default bind address
  creditsift

  # Serve on all interfaces, port 9000
  creditsift --bind 0.0.0.0:9000

  # Extract from a local file and print the JSON envelope
  creditsift --file liner-notes.pdf

  # One-shot with a different model
  creditsift --model claude-haiku-4-20250514 --file split-sheet.txt

  # Submit a request to a running service
  curl -s localhost:8080 -H 'content-type: application/json' \
       -d '{"fileData": "Summer EP, released 2024.", "fileType": "text"}'

ENDPOINTS:
  POST /        Run an extraction.
                Body: {"fileData": ..., "fileType": "text"|"image"|"pdf", "fileName": ...}
  GET  /health  Liveness, uptime, configured model. Never calls the model API.

ENVIRONMENT VARIABLES:
  ANTHROPIC_API_KEY      Messages API credential (environment only, never a flag)
  ANTHROPIC_BASE_URL     API endpoint override (proxies, test mocks)
  CREDITSIFT_BIND        Bind address (default 127.0.0.1:8080)
  CREDITSIFT_MODEL       Model ID (default claude-sonnet-4-20250514)
  CREDITSIFT_MAX_TOKENS  Reply token cap (default 4096)
  RUST_LOG               Tracing filter override (e.g. creditsift=debug)

SETUP:
  1. Set the credential:  export ANTHROPIC_API_KEY=sk-ant-...
  2. Run the service:     creditsift
  3. Health check:        curl localhost:8080/health

  The service starts without the credential; until one is provided each
  extraction fails with HTTP 500 {"error": ..., "fallback": true}.
"#;

/// Extract music-release metadata from credits documents using Vision LLMs.
#[derive(Parser, Debug)]
#[command(
    name = "creditsift",
    version,
    about = "Extract music-release metadata from credits documents using Vision LLMs",
    long_about = "Serve an HTTP API (default) or run one-shot extractions (--file) that forward \
credits documents — plain text, images, or PDFs — to a Vision Language Model and return \
structured release and rights metadata as JSON.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Extract from this local file and print JSON instead of serving.
    ///
    /// The file kind is inferred from the extension: .pdf is a PDF,
    /// .png/.jpg/.jpeg/.webp/.gif are images, everything else is text.
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Bind address for the HTTP service.
    #[arg(long, env = "CREDITSIFT_BIND", default_value = "127.0.0.1:8080")]
    bind: String,

    /// Model ID (e.g. claude-sonnet-4-20250514, claude-haiku-4-20250514).
    #[arg(long, env = "CREDITSIFT_MODEL")]
    model: Option<String>,

    /// Max tokens the model may generate per extraction.
    #[arg(long, env = "CREDITSIFT_MAX_TOKENS", default_value_t = 4096)]
    max_tokens: u32,

    /// Messages API base URL.
    #[arg(long, env = "ANTHROPIC_BASE_URL")]
    api_base_url: Option<String>,

    /// Model API call timeout in seconds. No timeout if unset.
    #[arg(long, env = "CREDITSIFT_API_TIMEOUT")]
    api_timeout: Option<u64>,

    /// Maximum request body size in MiB.
    #[arg(long, env = "CREDITSIFT_MAX_BODY_MB", default_value_t = 32)]
    max_body_mb: usize,

    /// Path to a text file containing a custom extraction instruction.
    #[arg(long, env = "CREDITSIFT_SYSTEM_PROMPT", value_name = "PATH")]
    system_prompt: Option<PathBuf>,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "CREDITSIFT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "CREDITSIFT_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    // Environment first, then CLI flags on top (clap already folded each
    // flag's own env var into its value).
    let mut config = ExtractionConfig::from_env();
    if let Some(ref model) = cli.model {
        config.model = model.clone();
    }
    config.max_tokens = cli.max_tokens.max(1);
    if let Some(ref url) = cli.api_base_url {
        config.base_url = url.clone();
    }
    if let Some(secs) = cli.api_timeout {
        config.api_timeout_secs = Some(secs);
    }
    if let Some(ref path) = cli.system_prompt {
        let prompt = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read system prompt from {}", path.display()))?;
        config.system_prompt = Some(prompt);
    }

    // ── One-shot mode ────────────────────────────────────────────────────
    if let Some(ref path) = cli.file {
        return run_one_shot(path, &config, cli.quiet).await;
    }

    // ── Serve ────────────────────────────────────────────────────────────
    if config.api_key.is_none() {
        warn!("ANTHROPIC_API_KEY is not set; extractions will fail until it is provided");
    }

    let state = AppState::new(&config).context("Failed to initialise the extractor")?;
    let app = build_router(state, cli.max_body_mb * 1024 * 1024);

    let listener = tokio::net::TcpListener::bind(&cli.bind)
        .await
        .with_context(|| format!("Failed to bind {}", cli.bind))?;
    info!(
        "creditsift listening on {} (model: {})",
        listener.local_addr().context("No local address")?,
        config.model
    );

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

/// Extract from a local file and print the JSON envelope to stdout.
async fn run_one_shot(path: &Path, config: &ExtractionConfig, quiet: bool) -> Result<()> {
    let request = request_from_path(path).await?;
    let output = extract(&request, config).await.context("Extraction failed")?;

    println!(
        "{}",
        serde_json::to_string_pretty(&output.envelope()).context("Failed to serialise output")?
    );

    if !quiet {
        eprintln!(
            "{} tokens in / {} tokens out, {}ms ({})",
            output.input_tokens, output.output_tokens, output.duration_ms, output.model
        );
    }
    Ok(())
}

/// Build a request from a local file, inferring the kind from its extension.
async fn request_from_path(path: &Path) -> Result<ExtractionRequest> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("submission")
        .to_string();

    let request = match ext.as_str() {
        "pdf" => {
            let bytes = read_bytes(path).await?;
            ExtractionRequest::pdf(STANDARD.encode(bytes))
        }
        "png" | "jpg" | "jpeg" | "webp" | "gif" => {
            let bytes = read_bytes(path).await?;
            ExtractionRequest::image(STANDARD.encode(bytes), file_name)
        }
        _ => {
            let text = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            ExtractionRequest::text(text)
        }
    };
    Ok(request)
}

async fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}
