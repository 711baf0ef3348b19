use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// Log stream whose volume is reported as a named subset of the total.
pub const CAI_TEMPORAL_ASSET_LOG: &str = "cloudasset.googleapis.com/temporal_asset";

/// Half-open [start, end) metrics interval. Built once per project and shared
/// by both volume queries so they never observe different windows.
#[derive(Debug, Clone, Copy)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn trailing_days(days: i64) -> Self {
        let end = Utc::now();
        Self {
            start: end - Duration::days(days),
            end,
        }
    }

    pub fn length_secs(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }
}

// 표준 Sink 모델: camelCase 직렬화/역직렬화
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SinkDescriptor {
    pub name: String,
    pub writer_identity: String,
    pub destination: String,
    /// Empty means the sink matches all logs.
    pub inclusion_filter: String,
    pub exclusions: Vec<ExclusionRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusionRule {
    pub name: String,
    pub filter: String,
}

/// Run totals, updated once per project, consumed once for the footer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrgReport {
    pub found: usize,
    pub scanned: usize,
    pub skipped: usize,
    pub total_bytes: u64,
    pub cai_bytes: u64,
}

// Collaborator 인터페이스
#[async_trait]
pub trait ProjectDirectory: Send + Sync {
    /// Project ids of every ACTIVE project under the organization,
    /// in listing order.
    async fn list_active_projects(&self, org_id: &str) -> Result<Vec<String>>;
}

#[async_trait]
pub trait ServiceEnablement: Send + Sync {
    async fn monitoring_enabled(&self, project_id: &str) -> Result<bool>;
}

#[async_trait]
pub trait MetricsReader: Send + Sync {
    /// Total ingested bytes over the window, optionally narrowed to a single
    /// log stream by its `metric.label.log` value.
    async fn ingest_volume(
        &self,
        project_id: &str,
        window: &TimeWindow,
        log_id: Option<&str>,
    ) -> Result<u64>;
}

#[async_trait]
pub trait SinkRegistry: Send + Sync {
    async fn list_sinks(&self, project_id: &str) -> Result<Vec<SinkDescriptor>>;
}

/// The four upstream seams the aggregator runs against.
pub struct Collaborators {
    pub directory: Arc<dyn ProjectDirectory>,
    pub enablement: Arc<dyn ServiceEnablement>,
    pub metrics: Arc<dyn MetricsReader>,
    pub sinks: Arc<dyn SinkRegistry>,
}
