use axum::{extract::State, Json};
use serde::Serialize;
use sysinfo::System;
use tracing::debug;

use crate::adapters::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub provider: String,
    pub config: HealthConfigInfo,
    pub metrics: SystemMetrics,
}

#[derive(Debug, Serialize)]
pub struct SystemMetrics {
    #[serde(rename = "cpuUsagePercent")]
    pub cpu_usage_percent: f32,
    #[serde(rename = "memoryUsedBytes")]
    pub memory_used_bytes: u64,
    #[serde(rename = "memoryTotalBytes")]
    pub memory_total_bytes: u64,
    #[serde(rename = "memoryUsagePercent")]
    pub memory_usage_percent: f32,
}

#[derive(Debug, Serialize)]
pub struct HealthConfigInfo {
    #[serde(rename = "maxUploadBytes")]
    pub max_upload_bytes: usize,
    #[serde(rename = "tokenTtlSeconds")]
    pub token_ttl_seconds: u64,
}

pub struct HealthController;

impl HealthController {
    /// GET /api/health
    pub async fn health_check(State(app_state): State<AppState>) -> Json<HealthResponse> {
        debug!("Health check requested");

        let config = &app_state.config;

        // Only refresh what is reported.
        let mut sys = System::new();
        sys.refresh_cpu_usage();
        sys.refresh_memory();

        let memory_used = sys.used_memory();
        let memory_total = sys.total_memory();
        let memory_usage_percent = if memory_total > 0 {
            (memory_used as f32 / memory_total as f32) * 100.0
        } else {
            0.0
        };

        Json(HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            provider: config.storage.provider.as_str().to_string(),
            config: HealthConfigInfo {
                max_upload_bytes: config.max_upload_bytes,
                token_ttl_seconds: config.token_ttl_seconds,
            },
            metrics: SystemMetrics {
                cpu_usage_percent: sys.global_cpu_usage(),
                memory_used_bytes: memory_used,
                memory_total_bytes: memory_total,
                memory_usage_percent,
            },
        })
    }
}
