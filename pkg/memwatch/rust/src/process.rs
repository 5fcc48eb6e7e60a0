// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use crate::cgroup;
use crate::errors::{Error, Result};
use crate::procfs;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use std::path::PathBuf;

/// A process the watcher can observe and notify.
pub trait Process: Send + Sync {
    fn pid(&self) -> i32;

    fn signal(&self, sig: Signal) -> Result<()>;

    /// Current memory usage as a percentage of the process's memory limit.
    fn memory_usage_percent(&self) -> Result<u64>;

    /// Human readable command line, used for log context only.
    fn cmdline(&self) -> Option<String> {
        None
    }
}

/// Re-fetchable set of processes to watch.
pub trait ProcessSource: Send + Sync {
    fn list(&self) -> Result<Vec<Box<dyn Process>>>;
}

impl<F> ProcessSource for F
where
    F: Fn() -> Result<Vec<Box<dyn Process>>> + Send + Sync,
{
    fn list(&self) -> Result<Vec<Box<dyn Process>>> {
        self()
    }
}

/// A live OS process, inspected through a proc filesystem.
#[derive(Debug, Clone)]
pub struct OsProcess {
    pid: i32,
    proc_root: PathBuf,
}

impl OsProcess {
    pub fn new(pid: i32, proc_root: impl Into<PathBuf>) -> Self {
        Self {
            pid,
            proc_root: proc_root.into(),
        }
    }
}

impl Process for OsProcess {
    fn pid(&self) -> i32 {
        self.pid
    }

    fn signal(&self, sig: Signal) -> Result<()> {
        signal::kill(Pid::from_raw(self.pid), sig).map_err(|source| Error::Signal {
            pid: self.pid,
            signal: sig,
            source,
        })
    }

    fn memory_usage_percent(&self) -> Result<u64> {
        let (limit, usage) =
            cgroup::limit_and_usage(&cgroup::cgroup_root_for(&self.proc_root, self.pid))?;
        cgroup::usage_percent(self.pid, limit, usage)
    }

    fn cmdline(&self) -> Option<String> {
        procfs::cmdline(&self.proc_root, self.pid).ok()
    }
}
