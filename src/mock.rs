use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::collector_core::{
    Collaborators, MetricsReader, ProjectDirectory, ServiceEnablement, SinkDescriptor,
    SinkRegistry, TimeWindow, CAI_TEMPORAL_ASSET_LOG,
};

const GIB: u64 = 1024 * 1024 * 1024;

pub struct MockDirectory {
    pub projects: Vec<String>,
}

#[async_trait]
impl ProjectDirectory for MockDirectory {
    async fn list_active_projects(&self, _org_id: &str) -> Result<Vec<String>> {
        Ok(self.projects.clone())
    }
}

pub struct MockEnablement {
    pub enabled: HashMap<String, bool>,
}

#[async_trait]
impl ServiceEnablement for MockEnablement {
    async fn monitoring_enabled(&self, project_id: &str) -> Result<bool> {
        Ok(*self.enabled.get(project_id).unwrap_or(&false))
    }
}

pub struct MockMetrics {
    pub volumes: HashMap<(String, Option<String>), u64>,
}

#[async_trait]
impl MetricsReader for MockMetrics {
    async fn ingest_volume(
        &self,
        project_id: &str,
        _window: &TimeWindow,
        log_id: Option<&str>,
    ) -> Result<u64> {
        Ok(*self
            .volumes
            .get(&(project_id.to_string(), log_id.map(str::to_string)))
            .unwrap_or(&0))
    }
}

pub struct MockSinks {
    pub sinks: HashMap<String, Vec<SinkDescriptor>>,
}

#[async_trait]
impl SinkRegistry for MockSinks {
    async fn list_sinks(&self, project_id: &str) -> Result<Vec<SinkDescriptor>> {
        Ok(self.sinks.get(project_id).cloned().unwrap_or_default())
    }
}

// Mock 모드: 빠른 로컬 테스트 용. 네트워크/자격증명 불필요.
pub fn demo_collaborators() -> Collaborators {
    let mut enabled = HashMap::new();
    enabled.insert("demo-prod".to_string(), true);
    enabled.insert("demo-sandbox".to_string(), false);

    let mut volumes = HashMap::new();
    volumes.insert(("demo-prod".to_string(), None), 3 * GIB);
    volumes.insert(
        (
            "demo-prod".to_string(),
            Some(CAI_TEMPORAL_ASSET_LOG.to_string()),
        ),
        GIB,
    );

    Collaborators {
        directory: Arc::new(MockDirectory {
            projects: vec!["demo-prod".to_string(), "demo-sandbox".to_string()],
        }),
        enablement: Arc::new(MockEnablement { enabled }),
        metrics: Arc::new(MockMetrics { volumes }),
        sinks: Arc::new(MockSinks {
            sinks: HashMap::new(),
        }),
    }
}
