// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use nix::sys::signal::Signal;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unexpected content in {}: {value:?}", path.display())]
    Parse { path: PathBuf, value: String },

    #[error("memory limit for pid {pid} is not set or is set to 0")]
    LimitNotSet { pid: i32 },

    #[error("failed to send {signal} to pid {pid}: {source}")]
    Signal {
        pid: i32,
        signal: Signal,
        #[source]
        source: nix::Error,
    },

    #[error("unable to find any process")]
    NoProcesses,

    #[error("warning threshold ({warning}%) must not exceed critical threshold ({critical}%)")]
    InvalidThresholds { warning: u64, critical: u64 },
}

pub type Result<T> = std::result::Result<T, Error>;
