// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use anyhow::{Context, Result};
use clap::Parser;
use dd_memwatch::{Args, Config, ProcFs, Watcher, interval_ticks};
use log::info;
use std::sync::Arc;
use tokio::signal::unix::{SignalKind, signal};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    simple_logger::init_with_level(args.log_level)?;
    let config = Arc::new(Config::from_args(&args)?);
    info!(
        "dd-memwatchd starting (version {})",
        env!("CARGO_PKG_VERSION")
    );

    let source = ProcFs::from_env();
    info!("reading processes from {}", source.root().display());
    let mut watcher = Watcher::new(Arc::clone(&config));

    let mut sigterm = signal(SignalKind::terminate()).context("Failed to setup SIGTERM handler")?;
    let mut sigint = signal(SignalKind::interrupt()).context("Failed to setup SIGINT handler")?;

    tokio::select! {
        _ = watcher.run(interval_ticks(config.poll_interval), &source) => {}
        _ = sigterm.recv() => info!("received SIGTERM"),
        _ = sigint.recv() => info!("received SIGINT"),
    }

    info!("dd-memwatchd shutting down");
    Ok(())
}
