use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use crate::collector_core::ProjectDirectory;
use crate::gcp::GcpApi;

const BASE: &str = "https://cloudresourcemanager.googleapis.com/v3";

pub struct ResourceManagerDirectory {
    api: GcpApi,
}

impl ResourceManagerDirectory {
    pub fn new(api: GcpApi) -> Self {
        Self { api }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchProjectsResponse {
    #[serde(default)]
    projects: Vec<Project>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Project {
    project_id: Option<String>,
}

#[async_trait]
impl ProjectDirectory for ResourceManagerDirectory {
    async fn list_active_projects(&self, org_id: &str) -> Result<Vec<String>> {
        let url = format!("{BASE}/projects:search");
        let query = format!("parent.type:organization parent.id:{org_id} state:ACTIVE");

        let mut out = Vec::new();
        let mut next: Option<String> = None;
        loop {
            let mut params = vec![("query", query.clone())];
            if let Some(token) = next.take() {
                params.push(("pageToken", token));
            }
            let resp: SearchProjectsResponse = self.api.get_json(&url, &params).await?;
            out.extend(resp.projects.into_iter().filter_map(|p| p.project_id));
            if resp.next_page_token.is_none() {
                break;
            }
            next = resp.next_page_token;
        }
        Ok(out)
    }
}
