// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Memory accounting as seen from inside a process's container.
//!
//! The cgroup hierarchy is read through `/proc/<pid>/root`, so the files are
//! the ones the target itself would see at `/sys/fs/cgroup`. Both the unified
//! (v2) and the legacy memory controller (v1) layouts are supported.

use crate::errors::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Mount point of the cgroup filesystem relative to a root filesystem.
pub const CGROUP_MOUNT: &str = "sys/fs/cgroup";

/// cgroup v1 reports "no limit" as `PAGE_COUNTER_MAX` scaled to bytes, which
/// is this value rounded down to the page size.
const V1_UNLIMITED: u64 = 0x7FFF_FFFF_FFFF_F000;

const V2_LIMIT: &str = "memory.max";
const V2_USAGE: &str = "memory.current";
const V1_LIMIT: &str = "memory/memory.limit_in_bytes";
const V1_USAGE: &str = "memory/memory.usage_in_bytes";

/// Path of the cgroup mount visible to `pid`.
pub fn cgroup_root_for(proc_root: &Path, pid: i32) -> PathBuf {
    proc_root
        .join(pid.to_string())
        .join("root")
        .join(CGROUP_MOUNT)
}

fn read_trimmed(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn parse_u64(path: &Path, value: &str) -> Result<u64> {
    value.parse().map_err(|_| Error::Parse {
        path: path.to_path_buf(),
        value: value.to_string(),
    })
}

fn read_u64(path: &Path) -> Result<u64> {
    let value = read_trimmed(path)?;
    parse_u64(path, &value)
}

/// Read `(limit, usage)` in bytes from a cgroup mount. An unlimited cgroup is
/// reported with a limit of 0.
pub fn limit_and_usage(cgroup_root: &Path) -> Result<(u64, u64)> {
    let v2_limit = cgroup_root.join(V2_LIMIT);
    if v2_limit.exists() {
        let raw = read_trimmed(&v2_limit)?;
        let limit = if raw == "max" {
            0
        } else {
            parse_u64(&v2_limit, &raw)?
        };
        let usage = read_u64(&cgroup_root.join(V2_USAGE))?;
        return Ok((limit, usage));
    }

    let limit = read_u64(&cgroup_root.join(V1_LIMIT))?;
    let limit = if limit >= V1_UNLIMITED { 0 } else { limit };
    let usage = read_u64(&cgroup_root.join(V1_USAGE))?;
    Ok((limit, usage))
}

/// Usage as an integer percentage of the limit. May exceed 100.
pub fn usage_percent(pid: i32, limit: u64, usage: u64) -> Result<u64> {
    if limit == 0 {
        return Err(Error::LimitNotSet { pid });
    }
    let pct = u128::from(usage) * 100 / u128::from(limit);
    Ok(u64::try_from(pct).unwrap_or(u64::MAX))
}
