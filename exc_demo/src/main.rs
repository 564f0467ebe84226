//! # exc Demonstration Binary
//!
//! Runs a three-stage nested pipeline (scratch buffer → spool file →
//! input stream) through the scoped error-propagation contract and exits
//! with the propagated raw code.
//!
//! # Usage
//!
//! ```bash
//! # Clean run with defaults
//! exc_demo
//!
//! # Load a config file, verbose logging
//! exc_demo --config demo.toml -v
//!
//! # Inject a simulated allocation failure (exit code = ENOMEM)
//! exc_demo --fail-alloc
//!
//! # JSON logs
//! exc_demo --json
//! ```

use clap::Parser;
use exc::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod scenario;

use scenario::{DemoConfig, run_pipeline};

/// exc demo - nested scope pipeline with deterministic fault injection
#[derive(Parser, Debug)]
#[command(name = "exc_demo")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Scoped error-propagation demo pipeline")]
#[command(long_about = None)]
struct Args {
    /// Path to the demo configuration file (TOML). Missing file falls
    /// back to built-in defaults.
    #[arg(short, long, default_value = "demo.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,

    /// Fail the buffer stage (exit code = ENOMEM)
    #[arg(long)]
    fail_alloc: bool,

    /// Fail the spool stage (exit code = EACCES)
    #[arg(long)]
    fail_spool: bool,

    /// Raise a cancellation mid-pipeline (recovered in stage 2)
    #[arg(long)]
    throw_midway: bool,
}

fn main() {
    let raw = run();
    if raw != 0 {
        std::process::exit(raw);
    }
}

fn run() -> i32 {
    let args = Args::parse();

    let mut config = match load_config(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("exc_demo: {e}");
            return ErrorCode::EINVAL.to_raw();
        }
    };

    // CLI fault switches override the config file.
    config.faults.fail_alloc |= args.fail_alloc;
    config.faults.fail_spool |= args.fail_spool;
    config.faults.throw_midway |= args.throw_midway;

    setup_tracing(&args, config.shared.log_level);

    info!(
        service = config.shared.service_name,
        "exc demo v{} starting...",
        env!("CARGO_PKG_VERSION")
    );
    let _shutdown = defer(|| info!("exc demo shut down"));

    let outcome = run_pipeline(&config);
    match outcome {
        Ok(()) => info!("pipeline completed"),
        Err(code) => error!(
            code = code.name(),
            raw = code.to_raw(),
            "pipeline failed: {code}"
        ),
    }
    outcome_to_raw(outcome)
}

/// Load the demo config, falling back to defaults when the file is absent.
fn load_config(path: &Path) -> Result<DemoConfig, ConfigError> {
    match DemoConfig::load(path) {
        Ok(config) => {
            config.shared.validate()?;
            Ok(config)
        }
        Err(ConfigError::NotFound { path }) => {
            // Logging is not up yet; keep the notice on stderr.
            eprintln!("exc_demo: no config at {path}, using defaults");
            Ok(DemoConfig::default())
        }
        Err(e) => Err(e),
    }
}

/// Initialize tracing from CLI flags and the configured log level.
fn setup_tracing(args: &Args, level: LogLevel) {
    let directive = if args.verbose { "trace" } else { level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    if args.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
