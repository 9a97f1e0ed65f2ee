// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Periodic jemalloc heap reporting while serving.

#![cfg(not(target_env = "msvc"))]

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const REPORT_INTERVAL: Duration = Duration::from_secs(60);

/// Heap figures read from jemalloc, in bytes.
#[derive(Debug, Clone, Copy)]
pub struct HeapStats {
    pub allocated: usize,
    pub resident: usize,
}

/// Reads fresh jemalloc statistics. Unreadable counters report as zero.
pub fn heap_stats() -> HeapStats {
    let _ = tikv_jemalloc_ctl::epoch::advance();
    HeapStats {
        allocated: tikv_jemalloc_ctl::stats::allocated::read().unwrap_or(0),
        resident: tikv_jemalloc_ctl::stats::resident::read().unwrap_or(0),
    }
}

/// Logs heap usage every minute until `cancel` fires.
pub async fn memory_monitor(cancel: CancellationToken) {
    let mut interval = tokio::time::interval(REPORT_INTERVAL);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let stats = heap_stats();
                debug!(
                    allocated_kb = stats.allocated / 1024,
                    resident_kb = stats.resident / 1024,
                    "heap usage"
                );
            }
            _ = cancel.cancelled() => {
                info!("memory monitor shutting down");
                break;
            }
        }
    }
}
