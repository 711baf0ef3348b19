use anyhow::Result;
use async_trait::async_trait;
use chrono::SecondsFormat;
use serde::Deserialize;

use crate::collector_core::{MetricsReader, TimeWindow};
use crate::gcp::GcpApi;

const BASE: &str = "https://monitoring.googleapis.com/v3";
const BYTE_COUNT_METRIC: &str = "logging.googleapis.com/byte_count";

pub struct MonitoringMetrics {
    api: GcpApi,
}

impl MonitoringMetrics {
    pub fn new(api: GcpApi) -> Self {
        Self { api }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListTimeSeriesResponse {
    #[serde(default)]
    time_series: Vec<TimeSeries>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimeSeries {
    #[serde(default)]
    points: Vec<Point>,
}

#[derive(Debug, Deserialize)]
struct Point {
    value: TypedValue,
}

// protobuf JSON은 int64를 문자열로 인코딩
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TypedValue {
    int64_value: Option<String>,
    double_value: Option<f64>,
}

fn metric_filter(log_id: Option<&str>) -> String {
    let mut f = format!("metric.type = \"{BYTE_COUNT_METRIC}\"");
    if let Some(log) = log_id {
        f.push_str(&format!(" AND metric.label.log = \"{log}\""));
    }
    f
}

fn sum_points(resp: &ListTimeSeriesResponse) -> i64 {
    resp.time_series
        .iter()
        .flat_map(|s| &s.points)
        .map(|p| match &p.value {
            TypedValue {
                int64_value: Some(v),
                ..
            } => v.parse::<i64>().unwrap_or(0),
            TypedValue {
                double_value: Some(v),
                ..
            } => *v as i64,
            _ => 0,
        })
        .sum()
}

#[async_trait]
impl MetricsReader for MonitoringMetrics {
    async fn ingest_volume(
        &self,
        project_id: &str,
        window: &TimeWindow,
        log_id: Option<&str>,
    ) -> Result<u64> {
        let url = format!("{BASE}/projects/{project_id}/timeSeries");

        // One aligned bucket spanning the whole window, summed across series.
        let base_params = vec![
            ("filter", metric_filter(log_id)),
            (
                "interval.startTime",
                window.start.to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
            (
                "interval.endTime",
                window.end.to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
            (
                "aggregation.alignmentPeriod",
                format!("{}s", window.length_secs()),
            ),
            ("aggregation.perSeriesAligner", "ALIGN_SUM".to_string()),
            ("aggregation.crossSeriesReducer", "REDUCE_SUM".to_string()),
            ("view", "FULL".to_string()),
        ];

        let mut total: i64 = 0;
        let mut next: Option<String> = None;
        loop {
            let mut params = base_params.clone();
            if let Some(token) = next.take() {
                params.push(("pageToken", token));
            }
            let resp: ListTimeSeriesResponse = self.api.get_json(&url, &params).await?;
            total += sum_points(&resp);
            if resp.next_page_token.is_none() {
                break;
            }
            next = resp.next_page_token;
        }
        Ok(total.max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_targets_byte_count() {
        assert_eq!(
            metric_filter(None),
            "metric.type = \"logging.googleapis.com/byte_count\""
        );
        assert_eq!(
            metric_filter(Some("cloudasset.googleapis.com/temporal_asset")),
            "metric.type = \"logging.googleapis.com/byte_count\" AND metric.label.log = \"cloudasset.googleapis.com/temporal_asset\""
        );
    }

    #[test]
    fn sums_every_point_of_every_series() {
        let raw = r#"{
            "timeSeries": [
                {"points": [{"value": {"int64Value": "1073741824"}}, {"value": {"int64Value": "10"}}]},
                {"points": [{"value": {"int64Value": "32"}}]}
            ]
        }"#;
        let resp: ListTimeSeriesResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(sum_points(&resp), 1073741824 + 10 + 32);
    }

    #[test]
    fn empty_response_is_zero() {
        let resp: ListTimeSeriesResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(sum_points(&resp), 0);
    }

    #[test]
    fn unparseable_values_count_as_zero() {
        let raw = r#"{"timeSeries": [{"points": [
            {"value": {"int64Value": "not-a-number"}},
            {"value": {"doubleValue": 12.9}},
            {"value": {}}
        ]}]}"#;
        let resp: ListTimeSeriesResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(sum_points(&resp), 12);
    }
}
