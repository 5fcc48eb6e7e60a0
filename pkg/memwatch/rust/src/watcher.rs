// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! The polling loop.
//!
//! Every tick re-enumerates the watched processes, classifies each one's
//! memory usage and signals it when the level's cooldown allows. All timing
//! uses the timestamp carried by the tick, never the wall clock, so a slow
//! tick cannot skew cooldown accounting.

use crate::config::Config;
use crate::cooldown::CooldownTracker;
use crate::process::{Process, ProcessSource};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;
use tokio_stream::wrappers::IntervalStream;
use tokio_stream::{Stream, StreamExt};

/// Counters describing one tick, mostly useful for logging and tests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Process enumeration failed and the tick was skipped.
    pub enumeration_failed: bool,
    pub listed: usize,
    /// Processes whose usage could not be read.
    pub skipped: usize,
    pub notified: usize,
    /// Notifications that could not be delivered.
    pub failed: usize,
}

enum Outcome {
    Quiet,
    Skipped,
    Notified,
    Failed,
}

#[derive(Debug)]
struct TrackedProcess {
    cooldown: CooldownTracker,
    /// Generation of the last tick that enumerated this pid.
    seen: u64,
}

pub struct Watcher {
    config: Arc<Config>,
    tracked: HashMap<i32, TrackedProcess>,
    generation: u64,
}

impl Watcher {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            tracked: HashMap::new(),
            generation: 0,
        }
    }

    /// Number of pids with cooldown state.
    pub fn tracked_pids(&self) -> usize {
        self.tracked.len()
    }

    pub fn cooldown_state(&self, pid: i32) -> Option<&CooldownTracker> {
        self.tracked.get(&pid).map(|t| &t.cooldown)
    }

    /// Evaluate processes on every tick until `ticks` ends.
    pub async fn run<S, P>(&mut self, mut ticks: S, source: &P)
    where
        S: Stream<Item = Instant> + Unpin,
        P: ProcessSource + ?Sized,
    {
        info!("watching processes ({})", self.config);
        while let Some(now) = ticks.next().await {
            let report = self.tick(now, source);
            debug!(
                "tick: listed={} skipped={} notified={} failed={} tracked={}",
                report.listed,
                report.skipped,
                report.notified,
                report.failed,
                self.tracked.len()
            );
        }
        info!("tick source closed, watcher stopped");
    }

    /// Run a single evaluation at `now`.
    pub fn tick<P>(&mut self, now: Instant, source: &P) -> TickReport
    where
        P: ProcessSource + ?Sized,
    {
        let processes = match source.list() {
            Ok(processes) => processes,
            Err(e) => {
                warn!("failed to list processes, skipping tick: {e}");
                return TickReport {
                    enumeration_failed: true,
                    ..Default::default()
                };
            }
        };

        self.generation += 1;
        let mut report = TickReport {
            listed: processes.len(),
            ..Default::default()
        };

        for process in &processes {
            match self.evaluate(process.as_ref(), now) {
                Outcome::Quiet => {}
                Outcome::Skipped => report.skipped += 1,
                Outcome::Notified => report.notified += 1,
                Outcome::Failed => report.failed += 1,
            }
        }

        self.evict_stale();
        report
    }

    fn evaluate(&mut self, process: &dyn Process, now: Instant) -> Outcome {
        let pid = process.pid();
        let tracked = self.tracked.entry(pid).or_insert_with(|| TrackedProcess {
            cooldown: CooldownTracker::new(),
            seen: self.generation,
        });
        tracked.seen = self.generation;

        let usage = match process.memory_usage_percent() {
            Ok(usage) => usage,
            Err(e) => {
                debug!("[pid {pid}] skipping: {e}");
                return Outcome::Skipped;
            }
        };

        let level = self.config.thresholds.classify(usage);
        if !tracked.cooldown.should_fire(level, now, self.config.cooldown) {
            return Outcome::Quiet;
        }
        let Some(sig) = self.config.signals.for_level(level) else {
            return Outcome::Quiet;
        };

        let cmdline = process.cmdline().unwrap_or_default();
        match process.signal(sig) {
            Ok(()) => {
                tracked.cooldown.record(level, now);
                info!("[pid {pid}] memory usage {usage}% is {level}, sent {sig} ({cmdline})");
                Outcome::Notified
            }
            Err(e) => {
                warn!("[pid {pid}] memory usage {usage}% is {level}, delivery failed: {e}");
                Outcome::Failed
            }
        }
    }

    /// Drop state for pids missing from more than one consecutive enumeration.
    fn evict_stale(&mut self) {
        let generation = self.generation;
        let before = self.tracked.len();
        self.tracked.retain(|_, t| generation - t.seen <= 1);
        let evicted = before - self.tracked.len();
        if evicted > 0 {
            debug!("evicted cooldown state of {evicted} vanished process(es)");
        }
    }
}

/// Production tick source: one timestamp per `period`, the first immediately.
pub fn interval_ticks(period: Duration) -> impl Stream<Item = Instant> + Unpin {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    IntervalStream::new(interval).map(|t| t.into_std())
}
