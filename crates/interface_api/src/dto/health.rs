//! Health DTOs

use std::collections::BTreeMap;

use core_kernel::{AdapterHealth, HealthCheckResult, RegistryHealthReport};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Readiness with a per-collaborator breakdown
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: AdapterHealth,
    pub version: String,
    pub healthy_count: usize,
    pub total_count: usize,
    pub collaborators: BTreeMap<String, HealthCheckResult>,
}

impl From<RegistryHealthReport> for ReadinessResponse {
    fn from(report: RegistryHealthReport) -> Self {
        Self {
            status: report.overall_status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            healthy_count: report.healthy_count,
            total_count: report.total_count,
            collaborators: report.collaborator_health.into_iter().collect(),
        }
    }
}
