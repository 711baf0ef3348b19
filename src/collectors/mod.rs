mod metrics;
mod projects;
mod serviceusage;
mod sinks;

use std::sync::Arc;

use crate::collector_core::Collaborators;
use crate::gcp::GcpApi;

pub use metrics::MonitoringMetrics;
pub use projects::ResourceManagerDirectory;
pub use serviceusage::ServiceUsageEnablement;
pub use sinks::LogRouterSinks;

/// Production collaborator set, all backed by the same API handle.
pub fn build_collaborators(api: &GcpApi) -> Collaborators {
    Collaborators {
        directory: Arc::new(ResourceManagerDirectory::new(api.clone())),
        enablement: Arc::new(ServiceUsageEnablement::new(api.clone())),
        metrics: Arc::new(MonitoringMetrics::new(api.clone())),
        sinks: Arc::new(LogRouterSinks::new(api.clone())),
    }
}
