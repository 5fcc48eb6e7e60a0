// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

#![allow(dead_code)]

use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const CONFIG_VARS: [&str; 7] = [
    "WARNING_THRESHOLD",
    "CRITICAL_THRESHOLD",
    "COOLDOWN",
    "POLL_INTERVAL",
    "WARNING_SIGNAL",
    "CRITICAL_SIGNAL",
    "DD_LOG_LEVEL",
];

/// Collects the lines a child writes to a pipe.
#[derive(Clone, Default)]
struct Lines(Arc<Mutex<Vec<String>>>);

impl Lines {
    fn follow(&self, stream: impl Read + Send + 'static, prefix: &'static str) {
        let lines = self.clone();
        std::thread::spawn(move || {
            for line in BufReader::new(stream).lines() {
                match line {
                    Ok(l) => {
                        eprintln!("[{prefix}] {l}");
                        lines.0.lock().unwrap().push(l);
                    }
                    Err(_) => break,
                }
            }
        });
    }

    fn count(&self, pattern: &str) -> usize {
        let lines = self.0.lock().unwrap();
        lines.iter().filter(|l| l.contains(pattern)).count()
    }

    fn wait_for_count(&self, pattern: &str, n: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.count(pattern) >= n {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            std::thread::sleep(Duration::from_millis(50));
        }
    }
}

fn wait_with_timeout(child: &mut Child, timeout: Duration) -> std::process::ExitStatus {
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait().expect("failed to check child status") {
            Some(status) => return status,
            None => {
                if Instant::now() >= deadline {
                    child.kill().ok();
                    return child.wait().expect("failed to wait on killed child");
                }
                std::thread::sleep(Duration::from_millis(50));
            }
        }
    }
}

/// Handle to a running dd-memwatchd daemon process.
pub struct DaemonHandle {
    child: Child,
    log_lines: Lines,
}

impl DaemonHandle {
    /// Start the daemon reading processes from `proc_root`, with `env` on top of
    /// a clean configuration environment.
    pub fn start(proc_root: &Path, env: &[(&str, &str)]) -> Self {
        let bin = env!("CARGO_BIN_EXE_dd-memwatchd");
        let mut cmd = Command::new(bin);
        for var in CONFIG_VARS {
            cmd.env_remove(var);
        }
        let mut child = cmd
            .env("HOST_PROC", proc_root)
            .envs(env.iter().copied())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to start dd-memwatchd");

        // simple_logger writes INFO to stdout, WARN/ERROR to stderr.
        let log_lines = Lines::default();
        log_lines.follow(child.stdout.take().expect("failed to capture stdout"), "daemon");
        log_lines.follow(
            child.stderr.take().expect("failed to capture stderr"),
            "daemon:err",
        );

        Self { child, log_lines }
    }

    pub fn wait_for_log(&self, pattern: &str, timeout: Duration) -> bool {
        self.log_lines.wait_for_count(pattern, 1, timeout)
    }

    pub fn wait_for_log_default(&self, pattern: &str) -> bool {
        self.wait_for_log(pattern, DEFAULT_TIMEOUT)
    }

    pub fn wait_for_log_count(&self, pattern: &str, n: usize, timeout: Duration) -> bool {
        self.log_lines.wait_for_count(pattern, n, timeout)
    }

    pub fn count_log_matches(&self, pattern: &str) -> usize {
        self.log_lines.count(pattern)
    }

    /// Send SIGTERM and wait for the daemon to exit. Returns the exit status.
    pub fn stop(&mut self) -> std::process::ExitStatus {
        let pid = self.child.id() as i32;
        signal::kill(Pid::from_raw(pid), Signal::SIGTERM).expect("failed to signal daemon");
        self.wait_with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn wait_with_timeout(&mut self, timeout: Duration) -> std::process::ExitStatus {
        wait_with_timeout(&mut self.child, timeout)
    }
}

impl Drop for DaemonHandle {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// A shell process that reports every SIGUSR1/SIGUSR2 it receives on stdout.
pub struct TrappingProcess {
    child: Child,
    output: Lines,
}

impl TrappingProcess {
    pub fn start() -> Self {
        let script = "trap 'echo got USR1' USR1; trap 'echo got USR2' USR2; \
                      echo ready; while :; do sleep 0.1; done";
        let mut child = Command::new("/bin/sh")
            .args(["-c", script])
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("failed to start trapping process");

        let output = Lines::default();
        output.follow(child.stdout.take().expect("failed to capture stdout"), "target");
        assert!(
            output.wait_for_count("ready", 1, DEFAULT_TIMEOUT),
            "trapping process should install its handlers"
        );
        Self { child, output }
    }

    pub fn pid(&self) -> i32 {
        self.child.id() as i32
    }

    pub fn received(&self, name: &str) -> usize {
        self.output.count(&format!("got {name}"))
    }

    pub fn wait_for_signal(&self, name: &str, timeout: Duration) -> bool {
        self.output.wait_for_count(&format!("got {name}"), 1, timeout)
    }
}

impl Drop for TrappingProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Populate `proc_root/<pid>` with a cgroup v2 memory controller and a cmdline.
pub fn write_fake_process(proc_root: &Path, pid: i32, limit: &str, usage: u64) {
    let pid_dir = proc_root.join(pid.to_string());
    let cgroup = pid_dir.join("root/sys/fs/cgroup");
    std::fs::create_dir_all(&cgroup).expect("failed to create fake cgroup");
    std::fs::write(cgroup.join("memory.max"), format!("{limit}\n")).unwrap();
    std::fs::write(cgroup.join("memory.current"), format!("{usage}\n")).unwrap();
    std::fs::write(pid_dir.join("cmdline"), b"/bin/sh\0-c\0trap\0").unwrap();
}
