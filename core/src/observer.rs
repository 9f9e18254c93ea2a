//! Progress and timing hooks for loading and traversal.
//!
//! The core never prints. Callers pass an [`Observer`] into the load and
//! BFS entry points; [`TracingObserver`] forwards everything to `tracing`,
//! [`NoopObserver`] drops it.

use std::time::Duration;

use tracing::{debug, info};

use crate::graph::{whole_mb, NodeId};

/// Summary of a completed load.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub nodes: usize,
    pub edges: usize,
    pub malformed_lines: usize,
    pub memory_bytes: usize,
    pub elapsed: Duration,
}

impl LoadReport {
    /// Memory estimate in whole MB, never reported as 0.
    pub fn memory_mb(&self) -> usize {
        whole_mb(self.memory_bytes)
    }
}

/// Summary of a completed bounded BFS.
#[derive(Debug, Clone)]
pub struct BfsReport {
    pub start: NodeId,
    pub max_depth: i64,
    pub visited: usize,
    pub elapsed: Duration,
}

/// Diagnostic sink. Every hook defaults to doing nothing.
pub trait Observer {
    fn load_started(&self, _source: &str) {}
    fn load_finished(&self, _report: &LoadReport) {}
    fn bfs_finished(&self, _report: &BfsReport) {}
}

/// Discards all diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

/// Emits diagnostics as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn load_started(&self, source: &str) {
        info!(source, "loading edge list");
    }

    fn load_finished(&self, report: &LoadReport) {
        info!(
            nodes = report.nodes,
            edges = report.edges,
            "load complete"
        );
        info!(memory_mb = report.memory_mb(), "CSR structure built");
        if report.malformed_lines > 0 {
            debug!(skipped = report.malformed_lines, "malformed lines ignored");
        }
        debug!(elapsed_ms = report.elapsed.as_secs_f64() * 1000.0, "load timing");
    }

    fn bfs_finished(&self, report: &BfsReport) {
        info!(
            start = report.start,
            max_depth = report.max_depth,
            found = report.visited,
            elapsed_ms = report.elapsed.as_secs_f64() * 1000.0,
            "bounded BFS finished"
        );
    }
}
