// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

// Correctness
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![deny(clippy::string_slice)]
#![deny(clippy::undocumented_unsafe_blocks)]
// Panicking code
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![deny(clippy::unimplemented)]
#![deny(clippy::todo)]
// Debug code that shouldn't be in production
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]

pub mod cgroup;
pub mod config;
pub mod cooldown;
mod errors;
pub mod level;
pub mod process;
pub mod procfs;
pub mod signals;
pub mod watcher;


pub use config::{Args, Config};
pub use cooldown::CooldownTracker;
pub use errors::{Error, Result};
pub use level::{Level, Thresholds};
pub use process::{OsProcess, Process, ProcessSource};
pub use procfs::ProcFs;
pub use signals::{SignalSet, resolve_signal};
pub use watcher::{TickReport, Watcher, interval_ticks};
