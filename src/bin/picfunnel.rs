//! CLI binary for picfunnel.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `IntakeConfig`, drives one `IntakeSession` over the given files, and
//! prints per-file results plus the session history.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use picfunnel::{
    HistoryEntry, IntakeConfig, IntakeFile, IntakeObserver, IntakeSession, IntakeStatus,
};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI status spinner using indicatif ───────────────────────────────────────

/// Terminal observer: renders the session's state walk on a single spinner
/// line. Attempts are strictly sequential, so one line is enough.
struct CliObserver {
    bar: ProgressBar,
}

impl CliObserver {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl IntakeObserver for CliObserver {
    fn on_status(&self, status: IntakeStatus) {
        let msg = match status {
            IntakeStatus::Idle => "idle",
            IntakeStatus::Processing => "processing…",
            IntakeStatus::Uploading => "uploading…",
            IntakeStatus::Success => "done",
            IntakeStatus::Error => "failed",
        };
        self.bar.set_message(msg.to_string());
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Upload a phone photo (HEIC is converted to JPEG first)
  picfunnel photo.heic --endpoint https://uploads.example.com/intake

  # Endpoint from the environment
  export PICFUNNEL_UPLOAD_URL=https://uploads.example.com/intake
  picfunnel scan.pdf

  # Several files, machine-readable summary
  picfunnel a.heic b.webp c.pdf --json > report.json

  # Tighter size limit and lower photo quality
  picfunnel --max-mib 5 --quality 70 pic.png

ENVIRONMENT VARIABLES:
  PICFUNNEL_UPLOAD_URL   Upload endpoint used when --endpoint is not given
  RUST_LOG               Tracing filter (overrides the default level)

ACCEPTED INPUTS:
  Images (image/*), HEIC/HEIF photos, and PDF documents. PDFs are reduced
  to their first page; files over the size limit are rejected untouched.
"#;

/// Normalise images, HEIC photos, and PDF scans to JPEG and upload them.
#[derive(Parser, Debug)]
#[command(
    name = "picfunnel",
    version,
    about = "Normalise images, HEIC photos, and PDF scans to JPEG and upload them",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Files to process, in order. Each runs as one intake attempt.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Upload endpoint URL.
    #[arg(short, long, env = "PICFUNNEL_UPLOAD_URL")]
    endpoint: Option<String>,

    /// Maximum accepted input size in MiB.
    #[arg(long, default_value_t = 10)]
    max_mib: u64,

    /// JPEG quality (1-100) for HEIC and converted images.
    #[arg(long, default_value_t = 80, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// JPEG quality (1-100) for rendered PDF pages.
    #[arg(long, default_value_t = 95, value_parser = clap::value_parser!(u8).range(1..=100))]
    pdf_quality: u8,

    /// Scale factor for the rendered PDF page.
    #[arg(long, default_value_t = 2.0)]
    pdf_scale: f32,

    /// Upload timeout in seconds.
    #[arg(long, default_value_t = 60)]
    timeout: u64,

    /// Print a JSON summary instead of human-readable lines.
    #[arg(long)]
    json: bool,

    /// Disable the status spinner.
    #[arg(long)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Per-file outcome for the `--json` summary.
#[derive(Serialize)]
struct FileReport {
    file: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    entry: Option<HistoryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner owns the terminal while it runs, so library INFO logs
    // stay off unless the user asks for them.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
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
    let observer = if show_progress {
        Some(CliObserver::new())
    } else {
        None
    };

    let mut builder = IntakeConfig::builder()
        .max_input_bytes(cli.max_mib * 1024 * 1024)
        .jpeg_quality(cli.quality)
        .pdf_jpeg_quality(cli.pdf_quality)
        .pdf_scale(cli.pdf_scale)
        .upload_timeout_secs(cli.timeout)
        // The success linger is a widget affordance; a CLI moves on at once.
        .success_linger_ms(0);
    if let Some(ref url) = cli.endpoint {
        builder = builder.endpoint(url.clone());
    }
    if let Some(ref obs) = observer {
        builder = builder.observer(Arc::clone(obs) as Arc<dyn IntakeObserver>);
    }
    let config = builder.build().context("invalid configuration")?;

    let mut session = IntakeSession::new(config).context("could not create intake session")?;

    // ── Drive the session, one attempt per file ──────────────────────────
    let mut reports = Vec::with_capacity(cli.files.len());
    let mut failures = 0usize;

    for path in &cli.files {
        let display = path.display().to_string();

        let outcome = match IntakeFile::from_path(path) {
            Ok(file) => session.submit(file).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(entry) => {
                if !cli.quiet && !cli.json {
                    if let Some(ref obs) = observer {
                        obs.bar.println(format!(
                            "  {} {}  {}",
                            green("✓"),
                            entry.file_name,
                            dim(&display)
                        ));
                    } else {
                        println!("✓ {}  ({display})", entry.file_name);
                    }
                }
                reports.push(FileReport {
                    file: display,
                    ok: true,
                    entry: Some(entry),
                    error: None,
                });
            }
            Err(e) => {
                failures += 1;
                if !cli.quiet && !cli.json {
                    let msg = e.to_string();
                    let first_line = msg.lines().next().unwrap_or("failed");
                    if let Some(ref obs) = observer {
                        obs.bar
                            .println(format!("  {} {}  {}", red("✗"), display, red(first_line)));
                    } else {
                        eprintln!("✗ {display}  {first_line}");
                    }
                }
                reports.push(FileReport {
                    file: display,
                    ok: false,
                    entry: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    if let Some(ref obs) = observer {
        obs.finish();
    }

    // ── Summary ──────────────────────────────────────────────────────────
    if cli.json {
        let summary = serde_json::json!({
            "uploaded": session.history(),
            "results": reports,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if !cli.quiet {
        let ok = reports.len() - failures;
        if failures == 0 {
            eprintln!("{} {} file(s) uploaded", green("✔"), bold(&ok.to_string()));
        } else {
            eprintln!(
                "{} {}/{} file(s) uploaded  ({} failed)",
                if ok == 0 { red("✘") } else { bold("⚠") },
                ok,
                reports.len(),
                red(&failures.to_string()),
            );
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}
