// SPDX-License-Identifier: MIT
//! Simple in-process counters exposed as `GET /api/metrics` in Prometheus
//! text format. No external library needed — all counters are `AtomicU64`
//! incremented inline.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// In-process performance counters shared across all connections.
#[derive(Debug)]
pub struct ServerMetrics {
    /// Total AI façade requests (all operations) since server start.
    pub ai_requests: AtomicU64,
    /// Total AI façade requests that failed upstream since server start.
    pub ai_failures: AtomicU64,
    /// Total simulated code executions (HTTP + terminal) since server start.
    pub executions: AtomicU64,
    /// Total deployments submitted since server start.
    pub deployments_started: AtomicU64,
    /// Total terminal commands received over WebSocket since server start.
    pub terminal_commands: AtomicU64,
    /// Server start time — used to calculate uptime in the metrics response.
    pub started_at: Instant,
}

impl ServerMetrics {
    pub fn new() -> Self {
        Self {
            ai_requests: AtomicU64::new(0),
            ai_failures: AtomicU64::new(0),
            executions: AtomicU64::new(0),
            deployments_started: AtomicU64::new(0),
            terminal_commands: AtomicU64::new(0),
            started_at: Instant::now(),
        }
    }

    pub fn inc_ai_requests(&self) {
        self.ai_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_ai_failures(&self) {
        self.ai_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_executions(&self) {
        self.executions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_deployments_started(&self) {
        self.deployments_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_terminal_commands(&self) {
        self.terminal_commands.fetch_add(1, Ordering::Relaxed);
    }

    /// Render counters in Prometheus text format.
    pub fn render_prometheus(&self) -> String {
        let uptime = self.started_at.elapsed().as_secs();
        let ai_requests = self.ai_requests.load(Ordering::Relaxed);
        let ai_failures = self.ai_failures.load(Ordering::Relaxed);
        let executions = self.executions.load(Ordering::Relaxed);
        let deployments_started = self.deployments_started.load(Ordering::Relaxed);
        let terminal_commands = self.terminal_commands.load(Ordering::Relaxed);

        format!(
            "# HELP nimbusd_uptime_seconds Server uptime in seconds.\n\
             # TYPE nimbusd_uptime_seconds gauge\n\
             nimbusd_uptime_seconds {uptime}\n\
             # HELP nimbusd_ai_requests_total AI façade requests since start.\n\
             # TYPE nimbusd_ai_requests_total counter\n\
             nimbusd_ai_requests_total {ai_requests}\n\
             # HELP nimbusd_ai_failures_total AI upstream failures since start.\n\
             # TYPE nimbusd_ai_failures_total counter\n\
             nimbusd_ai_failures_total {ai_failures}\n\
             # HELP nimbusd_executions_total Simulated code executions since start.\n\
             # TYPE nimbusd_executions_total counter\n\
             nimbusd_executions_total {executions}\n\
             # HELP nimbusd_deployments_started_total Deployments submitted since start.\n\
             # TYPE nimbusd_deployments_started_total counter\n\
             nimbusd_deployments_started_total {deployments_started}\n\
             # HELP nimbusd_terminal_commands_total Terminal commands received since start.\n\
             # TYPE nimbusd_terminal_commands_total counter\n\
             nimbusd_terminal_commands_total {terminal_commands}\n"
        )
    }
}

impl Default for ServerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle — cheaply clonable.
pub type SharedMetrics = Arc<ServerMetrics>;
