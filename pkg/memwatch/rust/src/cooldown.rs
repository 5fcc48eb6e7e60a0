// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use crate::level::Level;
use std::time::{Duration, Instant};

/// Per-process notification bookkeeping. Each alerting level keeps its own
/// last-fired timestamp; the two never influence each other.
#[derive(Debug, Default, Clone)]
pub struct CooldownTracker {
    warning: Option<Instant>,
    critical: Option<Instant>,
}

impl CooldownTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, level: Level) -> Option<&Option<Instant>> {
        match level {
            Level::None => None,
            Level::Warning => Some(&self.warning),
            Level::Critical => Some(&self.critical),
        }
    }

    pub fn last_fired(&self, level: Level) -> Option<Instant> {
        self.slot(level).copied().flatten()
    }

    /// Whether a notification for `level` is due at `now`. Never mutates state;
    /// call [`CooldownTracker::record`] once the notification was delivered.
    pub fn should_fire(&self, level: Level, now: Instant, cooldown: Duration) -> bool {
        match self.slot(level) {
            None => false,
            Some(None) => true,
            Some(Some(last)) => now.saturating_duration_since(*last) >= cooldown,
        }
    }

    pub fn record(&mut self, level: Level, now: Instant) {
        match level {
            Level::None => {}
            Level::Warning => self.warning = Some(now),
            Level::Critical => self.critical = Some(now),
        }
    }
}
