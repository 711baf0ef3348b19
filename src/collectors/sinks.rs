use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use crate::collector_core::{ExclusionRule, SinkDescriptor, SinkRegistry};
use crate::gcp::GcpApi;

const BASE: &str = "https://logging.googleapis.com/v2";

pub struct LogRouterSinks {
    api: GcpApi,
}

impl LogRouterSinks {
    pub fn new(api: GcpApi) -> Self {
        Self { api }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListSinksResponse {
    #[serde(default)]
    sinks: Vec<LogSink>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogSink {
    name: String,
    #[serde(default)]
    destination: String,
    #[serde(default)]
    filter: String,
    #[serde(default)]
    writer_identity: String,
    #[serde(default)]
    exclusions: Vec<LogExclusion>,
}

#[derive(Debug, Deserialize)]
struct LogExclusion {
    name: String,
    #[serde(default)]
    filter: String,
}

impl From<LogSink> for SinkDescriptor {
    fn from(s: LogSink) -> Self {
        SinkDescriptor {
            name: s.name,
            writer_identity: s.writer_identity,
            destination: s.destination,
            inclusion_filter: s.filter,
            exclusions: s
                .exclusions
                .into_iter()
                .map(|e| ExclusionRule {
                    name: e.name,
                    filter: e.filter,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl SinkRegistry for LogRouterSinks {
    async fn list_sinks(&self, project_id: &str) -> Result<Vec<SinkDescriptor>> {
        let url = format!("{BASE}/projects/{project_id}/sinks");

        let mut out = Vec::new();
        let mut next: Option<String> = None;
        loop {
            let mut params: Vec<(&str, String)> = Vec::new();
            if let Some(token) = next.take() {
                params.push(("pageToken", token));
            }
            let resp: ListSinksResponse = self.api.get_json(&url, &params).await?;
            out.extend(resp.sinks.into_iter().map(SinkDescriptor::from));
            if resp.next_page_token.is_none() {
                break;
            }
            next = resp.next_page_token;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_router_fields() {
        let raw = r#"{
            "sinks": [{
                "name": "_Default",
                "destination": "logging.googleapis.com/projects/p/locations/global/buckets/_Default",
                "filter": "NOT LOG_ID(\"cloudaudit.googleapis.com/activity\")",
                "writerIdentity": "serviceAccount:p123@gcp-sa-logging.iam.gserviceaccount.com",
                "exclusions": [{"name": "noisy-gke", "filter": "resource.type=\"k8s_container\""}]
            }]
        }"#;
        let resp: ListSinksResponse = serde_json::from_str(raw).unwrap();
        let sink: SinkDescriptor = resp.sinks.into_iter().next().unwrap().into();
        assert_eq!(sink.name, "_Default");
        assert!(sink.writer_identity.starts_with("serviceAccount:"));
        assert_eq!(sink.exclusions.len(), 1);
        assert_eq!(sink.exclusions[0].name, "noisy-gke");
    }

    #[test]
    fn missing_optionals_default_to_empty() {
        let resp: ListSinksResponse =
            serde_json::from_str(r#"{"sinks": [{"name": "bare"}]}"#).unwrap();
        let sink: SinkDescriptor = resp.sinks.into_iter().next().unwrap().into();
        assert!(sink.inclusion_filter.is_empty());
        assert!(sink.exclusions.is_empty());
    }
}
