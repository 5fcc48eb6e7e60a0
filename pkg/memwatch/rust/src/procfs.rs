// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use crate::errors::{Error, Result};
use crate::process::{OsProcess, Process, ProcessSource};
use log::debug;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static PROC_ROOT: OnceLock<PathBuf> = OnceLock::new();

pub fn root_path() -> &'static Path {
    PROC_ROOT.get_or_init(|| {
        if let Ok(v) = env::var("HOST_PROC") {
            return v.into();
        }
        "/proc".into()
    })
}

/// Command line of `pid` with arguments separated by spaces.
pub fn cmdline(proc_root: &Path, pid: i32) -> Result<String> {
    let path = proc_root.join(pid.to_string()).join("cmdline");
    let raw = fs::read(&path).map_err(|source| Error::Io { path, source })?;
    let cmdline = String::from_utf8_lossy(&raw);
    Ok(cmdline
        .trim_end_matches(['\0', '\n'])
        .replace('\0', " "))
}

/// Lists every process of a proc filesystem except the current one.
#[derive(Debug, Clone)]
pub struct ProcFs {
    root: PathBuf,
    own_pid: i32,
}

impl ProcFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            own_pid: std::process::id() as i32,
        }
    }

    pub fn from_env() -> Self {
        Self::new(root_path())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn pids(&self) -> Result<Vec<i32>> {
        let entries = fs::read_dir(&self.root).map_err(|source| Error::Io {
            path: self.root.clone(),
            source,
        })?;

        let mut pids: Vec<i32> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_ok_and(|t| t.is_dir()))
            .filter_map(|e| e.file_name().to_str()?.parse::<i32>().ok())
            .filter(|&pid| pid != self.own_pid)
            .collect();
        pids.sort_unstable();

        if pids.is_empty() {
            return Err(Error::NoProcesses);
        }
        Ok(pids)
    }
}

impl ProcessSource for ProcFs {
    fn list(&self) -> Result<Vec<Box<dyn Process>>> {
        let pids = self.pids()?;
        debug!("found {} process(es) in {}", pids.len(), self.root.display());
        Ok(pids
            .into_iter()
            .map(|pid| Box::new(OsProcess::new(pid, &self.root)) as Box<dyn Process>)
            .collect())
    }
}
