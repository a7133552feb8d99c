//! Veriff bridge developer harness.
//!
//! Runs one configuration map through the bridge exactly as a host would,
//! against a scripted engine that ends every session with a chosen outcome,
//! and prints what the host's pending call settles with.
//!
//! # Usage
//!
//! ```text
//! veriff-bridge [OPTIONS] --config <PATH>
//!
//! Options:
//!   --config <PATH>         JSON configuration map to launch with
//!   --settings <PATH>       Bridge settings TOML [default: veriff-bridge.toml]
//!   --outcome <NAME>        Scripted engine outcome [default: done]
//!   --delay-ms <MS>         Delay before the scripted outcome [default: 500]
//!   --resource-dir <PATH>   Override assets.resource_dir
//!   --log-level <LEVEL>     Override log_level
//!   --resolve-only          Print the resolved descriptors and exit
//!   --print-constants       Print the exported constants and exit
//! ```
//!
//! `--outcome` takes `done`, `canceled`, or an engine error name such as
//! `cameraUnavailable`, `networkError`, or `deprecatedSDKVersion`.
//!
//! # Environment variable overrides
//!
//! | Variable                      | Flag             |
//! |-------------------------------|------------------|
//! | `VERIFF_BRIDGE_CONFIG`        | `--config`       |
//! | `VERIFF_BRIDGE_SETTINGS`      | `--settings`     |
//! | `VERIFF_BRIDGE_OUTCOME`       | `--outcome`      |
//! | `VERIFF_BRIDGE_DELAY_MS`      | `--delay-ms`     |
//! | `VERIFF_BRIDGE_RESOURCE_DIR`  | `--resource-dir` |
//! | `VERIFF_BRIDGE_LOG_LEVEL`     | `--log-level`    |
//!
//! `RUST_LOG`, when set, takes precedence over every log level setting.
//!
//! # Exit status
//!
//! `0` when the call resolves (whatever the payload status), `2` when it is
//! rejected.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

use veriff_bridge::application::{VerificationBridge, VerificationEngine};
use veriff_bridge::domain::BridgeSettings;
use veriff_bridge::infrastructure::{
    AssetResolver, DirectoryCatalog, HttpFetcher, ScriptedEngine, UiContext,
};
use veriff_core::outcome::exported_constants;
use veriff_core::{EngineResult, Rejection};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Veriff verification bridge harness.
///
/// Resolves a host configuration map, launches it against a scripted engine,
/// and prints the settled payload as JSON.
#[derive(Debug, Parser)]
#[command(
    name = "veriff-bridge",
    about = "Launch a verification configuration against a scripted engine",
    version
)]
struct Cli {
    /// JSON file holding the host configuration map.
    #[arg(long, env = "VERIFF_BRIDGE_CONFIG", required_unless_present = "print_constants")]
    config: Option<PathBuf>,

    /// Bridge settings file.  A missing file means "all defaults".
    #[arg(long, default_value = "veriff-bridge.toml", env = "VERIFF_BRIDGE_SETTINGS")]
    settings: PathBuf,

    /// Outcome the scripted engine reports for the session.
    #[arg(long, default_value = "done", env = "VERIFF_BRIDGE_OUTCOME")]
    outcome: String,

    /// Milliseconds the scripted engine waits before reporting.
    #[arg(long, default_value_t = 500, env = "VERIFF_BRIDGE_DELAY_MS")]
    delay_ms: u64,

    /// Directory of bundled logo resources.
    #[arg(long, env = "VERIFF_BRIDGE_RESOURCE_DIR")]
    resource_dir: Option<PathBuf>,

    /// Log level used when `RUST_LOG` is not set.
    #[arg(long, env = "VERIFF_BRIDGE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Print the resolved session and branding instead of launching.
    #[arg(long)]
    resolve_only: bool,

    /// Print the constants exported to hosts and exit.
    #[arg(long)]
    print_constants: bool,
}

impl Cli {
    /// Loads the settings file and applies the CLI overrides on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file exists but cannot be read or
    /// parsed.
    fn load_settings(&self) -> anyhow::Result<BridgeSettings> {
        let mut settings = BridgeSettings::load(&self.settings)
            .with_context(|| format!("loading settings from {}", self.settings.display()))?;
        if let Some(dir) = &self.resource_dir {
            settings.assets.resource_dir = dir.clone();
        }
        if let Some(level) = &self.log_level {
            settings.log_level = level.clone();
        }
        Ok(settings)
    }

    fn engine_outcome(&self) -> anyhow::Result<EngineResult> {
        self.outcome
            .parse()
            .with_context(|| format!("invalid --outcome {:?}", self.outcome))
    }
}

fn read_configuration(path: &Path) -> anyhow::Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading configuration from {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("configuration in {} is not valid JSON", path.display()))
}

fn print_rejection(rejection: &Rejection) -> anyhow::Result<ExitCode> {
    println!("{}", serde_json::to_string(rejection)?);
    Ok(ExitCode::from(2))
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.print_constants {
        println!("{}", serde_json::to_string_pretty(&exported_constants())?);
        return Ok(ExitCode::SUCCESS);
    }

    let settings = cli.load_settings()?;

    // ── Logging setup ─────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli
        .config
        .as_ref()
        .context("--config is required unless --print-constants is given")?;
    let configuration = read_configuration(config_path)?;
    let outcome = cli.engine_outcome()?;

    // ── Wiring ────────────────────────────────────────────────────────────────
    let assets = Arc::new(AssetResolver::new(
        Arc::new(DirectoryCatalog::new(settings.assets.resource_dir.clone())),
        Arc::new(HttpFetcher::new(&settings.assets).context("building HTTP client")?),
    ));
    let (ui, ui_thread) = UiContext::spawn("veriff-ui").context("starting UI context")?;
    let engine = ScriptedEngine::new(
        outcome,
        Duration::from_millis(cli.delay_ms),
        tokio::runtime::Handle::current(),
    );
    let bridge = VerificationBridge::new(
        &settings,
        Arc::new(engine) as Arc<dyn VerificationEngine>,
        assets,
        ui.clone(),
    );

    let exit = if cli.resolve_only {
        match bridge.resolve_configuration(&configuration) {
            Ok(resolved) => {
                println!("{}", serde_json::to_string_pretty(&resolved)?);
                ExitCode::SUCCESS
            }
            Err(err) => print_rejection(&err.into())?,
        }
    } else {
        info!("launching with scripted outcome {outcome}");
        match bridge.launch_verification(&configuration).await {
            Ok(payload) => {
                println!("{}", serde_json::to_string(&payload)?);
                ExitCode::SUCCESS
            }
            Err(rejection) => print_rejection(&rejection)?,
        }
    };

    // ── Shutdown ──────────────────────────────────────────────────────────────
    ui.shutdown();
    drop(bridge);
    tokio::task::spawn_blocking(move || ui_thread.join())
        .await
        .context("joining UI thread")?;

    Ok(exit)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
