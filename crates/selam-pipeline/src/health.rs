// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded health probes of the pipeline's adapters.

use std::time::Duration;

use selam_core::types::{AdapterType, HealthStatus};
use selam_core::{PluginAdapter, SelamError};
use tracing::warn;

/// Upper bound for one adapter's health check.
pub const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Identity and status of one adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterHealth {
    pub name: String,
    pub version: semver::Version,
    pub adapter_type: AdapterType,
    pub status: HealthStatus,
}

impl AdapterHealth {
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

/// Runs `adapter.health_check()` for at most `limit`.
///
/// Errors and timeouts are reported as [`HealthStatus::Unhealthy`].
pub async fn check_adapter<A>(adapter: &A, limit: Duration) -> AdapterHealth
where
    A: PluginAdapter + ?Sized,
{
    let status = match tokio::time::timeout(limit, adapter.health_check()).await {
        Ok(Ok(status)) => status,
        Ok(Err(e)) => HealthStatus::Unhealthy(e.to_string()),
        Err(_) => HealthStatus::Unhealthy(SelamError::Timeout { duration: limit }.to_string()),
    };
    if status != HealthStatus::Healthy {
        warn!(adapter = adapter.name(), status = ?status, "adapter health check failed");
    }

    AdapterHealth {
        name: adapter.name().to_string(),
        version: adapter.version(),
        adapter_type: adapter.adapter_type(),
        status,
    }
}
