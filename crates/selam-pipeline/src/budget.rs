// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-request wall-clock budget.

use std::time::Duration;

use tokio::time::Instant;

/// Tracks elapsed and remaining time for one request against a fixed ceiling.
///
/// Uses tokio's clock, so paused-time tests advance it deterministically.
#[derive(Debug, Clone, Copy)]
pub struct TimeBudget {
    started: Instant,
    ceiling: Duration,
}

impl TimeBudget {
    /// Starts the clock now.
    pub fn start(ceiling: Duration) -> Self {
        Self {
            started: Instant::now(),
            ceiling,
        }
    }

    pub fn ceiling(&self) -> Duration {
        self.ceiling
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Time left before the ceiling, saturating at zero.
    pub fn remaining(&self) -> Duration {
        self.ceiling.saturating_sub(self.elapsed())
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Caps `limit` so it never reaches past the ceiling.
    pub fn cap(&self, limit: Duration) -> Duration {
        limit.min(self.remaining())
    }
}
