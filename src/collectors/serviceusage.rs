use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use crate::collector_core::ServiceEnablement;
use crate::gcp::GcpApi;

const BASE: &str = "https://serviceusage.googleapis.com/v1";
const MONITORING_SERVICE: &str = "monitoring.googleapis.com";

pub struct ServiceUsageEnablement {
    api: GcpApi,
}

impl ServiceUsageEnablement {
    pub fn new(api: GcpApi) -> Self {
        Self { api }
    }
}

#[derive(Debug, Deserialize)]
struct Service {
    state: Option<String>,
}

#[async_trait]
impl ServiceEnablement for ServiceUsageEnablement {
    async fn monitoring_enabled(&self, project_id: &str) -> Result<bool> {
        let url = format!("{BASE}/projects/{project_id}/services/{MONITORING_SERVICE}");
        let svc: Service = self.api.get_json(&url, &[]).await?;
        Ok(svc.state.as_deref() == Some("ENABLED"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_gates_enablement() {
        let enabled: Service =
            serde_json::from_str(r#"{"name": "projects/1/services/monitoring.googleapis.com", "state": "ENABLED"}"#)
                .unwrap();
        assert_eq!(enabled.state.as_deref(), Some("ENABLED"));

        let disabled: Service = serde_json::from_str(r#"{"state": "DISABLED"}"#).unwrap();
        assert_ne!(disabled.state.as_deref(), Some("ENABLED"));

        // STATE_UNSPECIFIED or missing state never counts as enabled
        let unspecified: Service = serde_json::from_str(r#"{}"#).unwrap();
        assert!(unspecified.state.is_none());
    }
}
