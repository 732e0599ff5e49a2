//! Terminal demo (CLI binary).
//!
//! Thin wrapper around the `neon_flicker` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Rendering one sign on the terminal until the duration elapses or Ctrl-C
//!
//! All sequencing is implemented in the library crate.

use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use neon_flicker::initialization::init_logger_with;
use neon_flicker::{NeonFlicker, Opt, Page, TerminalTarget};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    match run(opt).await {
        Ok(faults) => {
            println!();
            if faults > 0 {
                println!("Sign torn down ({} swallowed fault(s))", faults);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("neon_flicker error: {:#}", e);
            process::exit(1);
        }
    }
}

async fn run(opt: Opt) -> Result<usize> {
    let config = opt.flicker_config().context("Invalid sign configuration")?;
    let page = Page::with_reduced_motion(opt.reduced_motion);

    let sign = NeonFlicker::builder(config)
        .page(&page)
        .on_fault(|fault| warn!("Neon sequence fault: {}", fault))
        .attach(Some(TerminalTarget::stdout()));

    if sign.is_static() {
        info!("Reduced motion is active; the sign stays lit without flicker");
    }

    tokio::select! {
        _ = tokio::time::sleep(Duration::from_secs(opt.duration_secs)) => {
            info!("Demo finished after {}s", opt.duration_secs);
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl-C")?;
            info!("Interrupted");
        }
    }

    let faults = sign.fault_stats().map(|s| s.total()).unwrap_or(0);
    sign.destroy();
    Ok(faults)
}
