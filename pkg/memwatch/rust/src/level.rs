// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use crate::errors::{Error, Result};
use std::fmt;

/// Alert level derived from a single memory usage reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Usage at or below the warning threshold.
    None,
    /// Usage above the warning threshold, at or below the critical one.
    Warning,
    /// Usage above the critical threshold.
    Critical,
}

impl Level {
    pub fn is_alert(self) -> bool {
        self != Level::None
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::None => write!(f, "none"),
            Level::Warning => write!(f, "warning"),
            Level::Critical => write!(f, "critical"),
        }
    }
}

/// Usage percentages above which a process is notified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    warning: u64,
    critical: u64,
}

impl Thresholds {
    pub fn new(warning: u64, critical: u64) -> Result<Self> {
        if warning > critical {
            return Err(Error::InvalidThresholds { warning, critical });
        }
        Ok(Self { warning, critical })
    }

    pub fn warning(&self) -> u64 {
        self.warning
    }

    pub fn critical(&self) -> u64 {
        self.critical
    }

    /// Classify a usage percentage. A value equal to a threshold is not over it,
    /// and critical wins when both thresholds are exceeded.
    pub fn classify(&self, usage_percent: u64) -> Level {
        if usage_percent > self.critical {
            Level::Critical
        } else if usage_percent > self.warning {
            Level::Warning
        } else {
            Level::None
        }
    }
}
