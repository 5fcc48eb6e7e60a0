// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Daemon configuration.
//!
//! Every option can be given as a flag or through the environment, which is
//! how the daemon is usually configured when it runs as a container sidecar.

use crate::level::Thresholds;
use crate::signals::SignalSet;
use anyhow::{Context, Result, bail};
use clap::Parser;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_WARNING_THRESHOLD: u64 = 85;
pub const DEFAULT_CRITICAL_THRESHOLD: u64 = 95;
pub const DEFAULT_COOLDOWN_SECS: u64 = 1;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 1;

#[derive(Debug, Parser)]
#[command(
    name = "dd-memwatchd",
    version,
    about = "Signals processes when their container memory usage crosses a threshold"
)]
pub struct Args {
    /// Memory usage percentage above which the warning signal is sent
    #[arg(long = "warning", env = "WARNING_THRESHOLD", default_value_t = DEFAULT_WARNING_THRESHOLD)]
    pub warning_threshold: u64,

    /// Memory usage percentage above which the critical signal is sent
    #[arg(long = "critical", env = "CRITICAL_THRESHOLD", default_value_t = DEFAULT_CRITICAL_THRESHOLD)]
    pub critical_threshold: u64,

    /// Minimum seconds between two notifications of the same level to a process
    #[arg(long, env = "COOLDOWN", default_value_t = DEFAULT_COOLDOWN_SECS)]
    pub cooldown: u64,

    /// Seconds between two memory usage checks
    #[arg(long, env = "POLL_INTERVAL", default_value_t = DEFAULT_POLL_INTERVAL_SECS)]
    pub poll_interval: u64,

    /// Signal sent on warning (defaults to SIGUSR1)
    #[arg(long, env = "WARNING_SIGNAL")]
    pub warning_signal: Option<String>,

    /// Signal sent on critical (defaults to SIGUSR2)
    #[arg(long, env = "CRITICAL_SIGNAL")]
    pub critical_signal: Option<String>,

    #[arg(long, env = "DD_LOG_LEVEL", default_value_t = log::Level::Info)]
    pub log_level: log::Level,
}

/// Immutable runtime configuration, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub thresholds: Thresholds,
    pub cooldown: Duration,
    pub poll_interval: Duration,
    pub signals: SignalSet,
}

impl Config {
    pub fn from_args(args: &Args) -> Result<Self> {
        let thresholds = Thresholds::new(args.warning_threshold, args.critical_threshold)
            .context("invalid thresholds")?;
        if args.poll_interval == 0 {
            bail!("poll interval must be at least 1 second");
        }
        Ok(Self {
            thresholds,
            cooldown: Duration::from_secs(args.cooldown),
            poll_interval: Duration::from_secs(args.poll_interval),
            signals: SignalSet::resolve(
                args.warning_signal.as_deref(),
                args.critical_signal.as_deref(),
            ),
        })
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "warning={}% ({}), critical={}% ({}), cooldown={}s, poll_interval={}s",
            self.thresholds.warning(),
            self.signals.warning,
            self.thresholds.critical(),
            self.signals.critical,
            self.cooldown.as_secs(),
            self.poll_interval.as_secs()
        )
    }
}
