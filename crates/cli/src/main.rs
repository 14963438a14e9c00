// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! lcd - ten-digit calculator and clock on a simulated LCD panel
//!
//! Reads key scripts from stdin, one line at a time, and prints the panel
//! to stdout after each line. Logs go to stderr.

mod keymap;

use anyhow::{Context, Result};
use clap::Parser;
use keymap::Action;
use lcd_adapters::{IntervalTimer, LcdDisplay, TracedDisplay};
use lcd_core::{Control, DeviceConfig, OpState, System};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(
    name = "lcd",
    version,
    about = "Ten-digit calculator and clock on a simulated LCD"
)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip the display self-test on start
    #[arg(long)]
    no_probe: bool,

    /// Self-test tick interval in milliseconds
    #[arg(long, value_name = "MS")]
    tick_ms: Option<u64>,
}

fn load_config(cli: &Cli) -> Result<DeviceConfig> {
    let mut config = match &cli.config {
        Some(path) => DeviceConfig::load(path)?,
        None => DeviceConfig::default(),
    };
    if cli.no_probe {
        config = config.with_probe(false);
    }
    if let Some(ms) = cli.tick_ms {
        config = config.with_interval(Duration::from_millis(ms));
    }
    Ok(config)
}

fn setup_logging(config: &DeviceConfig) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // RUST_LOG wins over the configured filter
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_frame(lcd: &LcdDisplay) {
    println!("{}", lcd.render());
}

/// Apply one typed line; returns false once the device has exited
fn apply_line(system: &System, line: &str) -> bool {
    for ch in line.chars().filter(|c| !c.is_whitespace()) {
        match keymap::action_for(ch) {
            Some(Action::Press(key)) => system.press(key),
            Some(Action::Control(control)) => system.control(control),
            None => tracing::warn!(%ch, "unmapped key"),
        }
        if system.has_exited() {
            return false;
        }
    }
    true
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    setup_logging(&config);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let lcd = LcdDisplay::new();
    let system = System::build(
        &config,
        Arc::new(TracedDisplay::new(lcd.clone())),
        Arc::new(IntervalTimer::new(tx)),
    );

    system.start();
    if system.is_running() {
        print_frame(&lcd);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        // Typed keys wait while the self-test owns the panel
        let probing = system.main().state() == OpState::Probing;

        tokio::select! {
            Some(event) = rx.recv() => {
                let was_running = system.is_running();
                system.dispatch(&event);
                if !was_running && system.is_running() {
                    print_frame(&lcd);
                }
            }
            line = lines.next_line(), if !probing => {
                let Some(line) = line.context("failed to read stdin")? else {
                    tracing::debug!("stdin closed");
                    break;
                };
                if !apply_line(&system, &line) {
                    break;
                }
                print_frame(&lcd);
            }
            else => break,
        }
    }

    if !system.has_exited() {
        system.control(Control::Exit);
    }
    system.teardown();
    Ok(())
}
