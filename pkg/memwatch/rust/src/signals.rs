// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use crate::level::Level;
use log::warn;
use nix::sys::signal::Signal;
use phf::phf_map;

pub const DEFAULT_WARNING_SIGNAL: Signal = Signal::SIGUSR1;
pub const DEFAULT_CRITICAL_SIGNAL: Signal = Signal::SIGUSR2;

/// Signal names accepted as overrides. Anything else falls back to the default.
static SUPPORTED_SIGNALS: phf::Map<&'static str, Signal> = phf_map! {
    "SIGABRT" => Signal::SIGABRT,
    "SIGCONT" => Signal::SIGCONT,
    "SIGHUP" => Signal::SIGHUP,
    "SIGINT" => Signal::SIGINT,
    // SIGIOT is an alias of SIGABRT on every platform we ship on.
    "SIGIOT" => Signal::SIGABRT,
    "SIGKILL" => Signal::SIGKILL,
    "SIGQUIT" => Signal::SIGQUIT,
    "SIGSTOP" => Signal::SIGSTOP,
    "SIGTERM" => Signal::SIGTERM,
    "SIGTSTP" => Signal::SIGTSTP,
    "SIGUSR1" => Signal::SIGUSR1,
    "SIGUSR2" => Signal::SIGUSR2,
};

pub fn lookup(name: &str) -> Option<Signal> {
    SUPPORTED_SIGNALS.get(name).copied()
}

fn default_for(level: Level) -> Option<Signal> {
    match level {
        Level::None => None,
        Level::Warning => Some(DEFAULT_WARNING_SIGNAL),
        Level::Critical => Some(DEFAULT_CRITICAL_SIGNAL),
    }
}

/// Resolve the signal delivered for `level`, honoring `override_name` when it
/// is on the allow-list. Returns `None` only for [`Level::None`].
pub fn resolve_signal(level: Level, override_name: Option<&str>) -> Option<Signal> {
    let default = default_for(level)?;
    let Some(name) = override_name.map(str::trim).filter(|n| !n.is_empty()) else {
        return Some(default);
    };
    match lookup(name) {
        Some(sig) => Some(sig),
        None => {
            warn!("unsupported {level} signal {name:?}, using {default}");
            Some(default)
        }
    }
}

/// Signals delivered for each alerting level, resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalSet {
    pub warning: Signal,
    pub critical: Signal,
}

impl Default for SignalSet {
    fn default() -> Self {
        Self {
            warning: DEFAULT_WARNING_SIGNAL,
            critical: DEFAULT_CRITICAL_SIGNAL,
        }
    }
}

impl SignalSet {
    pub fn resolve(warning_override: Option<&str>, critical_override: Option<&str>) -> Self {
        Self {
            warning: resolve_signal(Level::Warning, warning_override)
                .unwrap_or(DEFAULT_WARNING_SIGNAL),
            critical: resolve_signal(Level::Critical, critical_override)
                .unwrap_or(DEFAULT_CRITICAL_SIGNAL),
        }
    }

    pub fn for_level(&self, level: Level) -> Option<Signal> {
        match level {
            Level::None => None,
            Level::Warning => Some(self.warning),
            Level::Critical => Some(self.critical),
        }
    }
}
