use std::io::Write;

use anyhow::{bail, Result};

use crate::collector_core::{Collaborators, OrgReport, TimeWindow, CAI_TEMPORAL_ASSET_LOG};
use crate::report;

const WINDOW_DAYS: i64 = 30;

/// One sequential pass over the organization: resolve the project list,
/// then per project check enablement, query both volumes, and render the
/// sink inventory. Only the directory lookup is fatal; every other failure
/// stays contained in its project's iteration.
pub async fn scan_org(
    org_id: &str,
    collab: &Collaborators,
    out: &mut dyn Write,
) -> Result<OrgReport> {
    writeln!(out, "Searching for active projects in Org ID: {org_id}...")?;

    let projects = match collab.directory.list_active_projects(org_id).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Tip: Ensure your account has 'Organization Viewer' or 'Folder Viewer' permissions.");
            return Err(e.context("Error listing projects"));
        }
    };
    writeln!(out, "Found {} active projects.", projects.len())?;

    if projects.is_empty() {
        bail!("No active projects found.");
    }

    let mut report = OrgReport {
        found: projects.len(),
        ..Default::default()
    };

    writeln!(out, "\nProcessing projects... (This may take a moment)\n")?;

    for pid in &projects {
        report::write_project_header(out, pid)?;

        let enabled = match collab.enablement.monitoring_enabled(pid).await {
            Ok(enabled) => enabled,
            Err(e) => {
                // skip notice on stdout stays identical to true disablement
                eprintln!("[{pid}] enablement check failed: {e:#}");
                false
            }
        };

        if !enabled {
            report.skipped += 1;
            report::write_skip_notice(out)?;
            continue;
        }

        report.scanned += 1;

        // Same window for both queries so the CAI subset is a subset in time too.
        let window = TimeWindow::trailing_days(WINDOW_DAYS);
        let total_bytes = volume_or_zero(collab, pid, &window, None).await;
        let cai_bytes = volume_or_zero(collab, pid, &window, Some(CAI_TEMPORAL_ASSET_LOG)).await;

        report.total_bytes += total_bytes;
        report.cai_bytes += cai_bytes;

        report::write_volume_lines(out, total_bytes, cai_bytes)?;

        writeln!(out, "  SINK CONFIGURATION:")?;
        match collab.sinks.list_sinks(pid).await {
            Ok(sinks) => report::write_sink_details(out, &sinks)?,
            Err(e) => report::write_sink_error(out, &e)?,
        }
    }

    report::write_summary(out, &report)?;
    Ok(report)
}

async fn volume_or_zero(
    collab: &Collaborators,
    project_id: &str,
    window: &TimeWindow,
    log_id: Option<&str>,
) -> u64 {
    match collab.metrics.ingest_volume(project_id, window, log_id).await {
        Ok(bytes) => bytes,
        Err(e) => {
            // indistinguishable from zero usage in the report itself
            eprintln!("[{project_id}] volume query failed: {e:#}");
            0
        }
    }
}
