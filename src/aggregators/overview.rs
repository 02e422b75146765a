use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::error;

use super::{engagement_minutes, DailyMetric, DataSource};
use crate::date_range::{resolve, DateRange, TimeRange};
use crate::fallback;
use crate::gateway::{OrderBy, ReportSpec, ReportingGateway, RawReportRow};
use crate::normalize::parse_report_date;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub success: bool,
    pub data: Vec<DailyMetric>,
    pub source: DataSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<OverviewMetadata>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewMetadata {
    pub total_views: i64,
    pub data_points: usize,
    pub date_range: DateRange,
    /// Span of dates actually present in the returned rows, which can be
    /// narrower than the queried range on sparse properties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_date: Option<NaiveDate>,
}

/// Daily views/clicks/engagement series over the selected range.
pub struct OverviewAggregator {
    gateway: Option<Arc<ReportingGateway>>,
    click_event_ratio: f64,
}

impl OverviewAggregator {
    pub fn new(state: &AppState) -> Self {
        OverviewAggregator {
            gateway: state.gateway.clone(),
            click_event_ratio: state.config.click_event_ratio,
        }
    }

    pub async fn fetch(&self, range: TimeRange, today: NaiveDate) -> OverviewResponse {
        let date_range = resolve(range, today);

        let Some(gateway) = &self.gateway else {
            return fallback_response(None);
        };

        let spec = ReportSpec::new(
            date_range,
            ["date"],
            ["screenPageViews", "eventCount", "userEngagementDuration"],
        )
        .order_by(OrderBy::dimension_asc("date"));

        match gateway.run_report(&spec).await {
            Ok(rows) => {
                let data = build_series(&rows, self.click_event_ratio);
                let (first_date, last_date) = data_span(&data);
                let metadata = OverviewMetadata {
                    total_views: data.iter().map(|d| d.views).sum(),
                    data_points: data.len(),
                    date_range,
                    first_date,
                    last_date,
                };
                OverviewResponse {
                    success: true,
                    data,
                    source: DataSource::Live,
                    error: None,
                    metadata: Some(metadata),
                }
            }
            Err(e) => {
                error!("overview report failed: {e}");
                fallback_response(Some(e.to_string()))
            }
        }
    }
}

fn fallback_response(error: Option<String>) -> OverviewResponse {
    OverviewResponse {
        success: true,
        data: fallback::overview_series(),
        source: DataSource::Fallback,
        error,
        metadata: None,
    }
}

/// Rows arrive date-ascending from the query; the series keeps that order.
pub fn build_series(rows: &[RawReportRow], click_event_ratio: f64) -> Vec<DailyMetric> {
    rows.iter()
        .map(|row| {
            let views = row.metric_i64(0);
            let events = row.metric_i64(1);
            let engagement_seconds = row.metric_i64(2);
            DailyMetric {
                date: row.dimension(0).to_string(),
                views,
                clicks: (events as f64 * click_event_ratio).floor() as i64,
                engagement: engagement_minutes(engagement_seconds as f64),
            }
        })
        .collect()
}

/// Min/max of the dates present in the series, going through the dual-path
/// date parser so compact and dashed forms behave identically.
pub fn data_span(data: &[DailyMetric]) -> (Option<NaiveDate>, Option<NaiveDate>) {
    let mut dates = data
        .iter()
        .filter_map(|d| parse_report_date(&d.date))
        .collect::<Vec<_>>();
    dates.sort_unstable();
    (dates.first().copied(), dates.last().copied())
}
