use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::error;

use super::{engagement_minutes, round2, ArticleMetric, DataSource};
use crate::date_range::{resolve, DateRange, TimeRange};
use crate::fallback;
use crate::gateway::{FilterExpression, OrderBy, RawReportRow, ReportSpec, ReportingGateway};
use crate::normalize::category_from_path;
use crate::AppState;

const TOP_ARTICLES_LIMIT: i64 = 3;
const PAGES_LIMIT: i64 = 50;

#[derive(Debug, Serialize)]
pub struct PagesResponse {
    pub success: bool,
    pub data: Vec<ArticleMetric>,
    pub source: DataSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TopArticlesResponse {
    pub success: bool,
    pub data: Vec<ArticleMetric>,
    pub source: DataSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "timeRange")]
    pub time_range: DateRange,
}

/// Ranked blog pages: the top-3 spotlight and the full article table share
/// one query shape and differ only in the row cap and the date stamped on
/// each row.
pub struct PagesAggregator {
    gateway: Option<Arc<ReportingGateway>>,
    click_view_ratio: f64,
}

impl PagesAggregator {
    pub fn new(state: &AppState) -> Self {
        PagesAggregator {
            gateway: state.gateway.clone(),
            click_view_ratio: state.config.click_view_ratio,
        }
    }

    pub async fn fetch_top_articles(
        &self,
        range: TimeRange,
        today: NaiveDate,
    ) -> TopArticlesResponse {
        let date_range = resolve(range, today);

        let Some(gateway) = &self.gateway else {
            return TopArticlesResponse {
                success: true,
                data: fallback::top_articles(today),
                source: DataSource::Fallback,
                error: None,
                time_range: date_range,
            };
        };

        match gateway.run_report(&spec(date_range, TOP_ARTICLES_LIMIT)).await {
            Ok(rows) => TopArticlesResponse {
                success: true,
                // Top articles are dated at the range end, the last complete
                // day the ranking covers.
                data: build_articles(&rows, self.click_view_ratio, date_range.end_date),
                source: DataSource::Live,
                error: None,
                time_range: date_range,
            },
            Err(e) => {
                error!("top-articles report failed: {e}");
                TopArticlesResponse {
                    success: true,
                    data: fallback::top_articles(today),
                    source: DataSource::Fallback,
                    error: Some(e.to_string()),
                    time_range: date_range,
                }
            }
        }
    }

    pub async fn fetch_pages(&self, range: TimeRange, today: NaiveDate) -> PagesResponse {
        let date_range = resolve(range, today);

        let Some(gateway) = &self.gateway else {
            return PagesResponse {
                success: true,
                data: fallback::article_pages(today),
                source: DataSource::Fallback,
                error: None,
            };
        };

        match gateway.run_report(&spec(date_range, PAGES_LIMIT)).await {
            Ok(rows) => PagesResponse {
                success: true,
                data: build_articles(&rows, self.click_view_ratio, today),
                source: DataSource::Live,
                error: None,
            },
            Err(e) => {
                error!("pages report failed: {e}");
                PagesResponse {
                    success: true,
                    data: fallback::article_pages(today),
                    source: DataSource::Fallback,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

fn spec(date_range: DateRange, limit: i64) -> ReportSpec {
    ReportSpec::new(
        date_range,
        ["pageTitle", "pagePath"],
        [
            "screenPageViews",
            "averageSessionDuration",
            "bounceRate",
            "activeUsers",
        ],
    )
    .filter(FilterExpression::contains("pagePath", "/blog/"))
    .order_by(OrderBy::metric_desc("screenPageViews"))
    .limit(limit)
}

/// Rows arrive pre-ordered by views and pre-limited; ids are assigned by
/// position in that order.
pub fn build_articles(
    rows: &[RawReportRow],
    click_view_ratio: f64,
    date: NaiveDate,
) -> Vec<ArticleMetric> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let title = row.dimension(0);
            let path = row.dimension(1);
            let views = row.metric_i64(0);
            let avg_duration = row.metric_f64(1);
            let bounce_rate = row.metric_f64(2);
            let active_users = row.metric_i64(3);

            ArticleMetric {
                id: index + 1,
                title: if title.is_empty() {
                    "Untitled".to_string()
                } else {
                    title.to_string()
                },
                category: category_from_path(path),
                views,
                clicks: (views as f64 * click_view_ratio).floor() as i64,
                engagement: engagement_minutes(avg_duration),
                date,
                path: path.to_string(),
                bounce_rate: round2(bounce_rate * 100.0),
                active_users,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(title: &str, path: &str, metrics: &[&str]) -> RawReportRow {
        RawReportRow {
            dimensions: vec![title.to_string(), path.to_string()],
            metrics: metrics.iter().map(|m| m.to_string()).collect(),
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 14).unwrap()
    }

    #[test]
    fn articles_keep_rank_order_and_derive_categories() {
        let rows = vec![
            row(
                "Intro to Rust",
                "/blog/ai-tools/intro-to-rust",
                &["1000", "120", "0.352", "890"],
            ),
            row("About", "/about", &["400", "60", "0.5", "120"]),
        ];
        let articles = build_articles(&rows, 0.15, day());

        assert_eq!(articles[0].id, 1);
        assert_eq!(articles[0].category, "Ai Tools");
        assert_eq!(articles[1].id, 2);
        assert_eq!(articles[1].category, "Uncategorized");
    }

    #[test]
    fn clicks_are_floored_view_fractions() {
        let rows = vec![row("A", "/blog/x/a", &["1001", "0", "0", "0"])];
        let articles = build_articles(&rows, 0.15, day());
        // floor(1001 * 0.15) = floor(150.15)
        assert_eq!(articles[0].clicks, 150);
    }

    #[test]
    fn bounce_rate_scales_to_percentage() {
        let rows = vec![row("A", "/blog/x/a", &["10", "0", "0.3518", "5"])];
        let articles = build_articles(&rows, 0.15, day());
        assert_eq!(articles[0].bounce_rate, 35.18);
    }

    #[test]
    fn engagement_is_minutes_from_average_duration() {
        let rows = vec![row("A", "/blog/x/a", &["10", "273", "0", "5"])];
        let articles = build_articles(&rows, 0.15, day());
        assert_eq!(articles[0].engagement, 4.6);
    }

    #[test]
    fn empty_titles_become_untitled() {
        let rows = vec![row("", "/blog/x/a", &["10", "0", "0", "5"])];
        let articles = build_articles(&rows, 0.15, day());
        assert_eq!(articles[0].title, "Untitled");
    }

    #[test]
    fn identical_rows_build_identical_output() {
        let rows = vec![row(
            "Intro",
            "/blog/tech/intro",
            &["1000", "120", "0.35", "890"],
        )];
        assert_eq!(
            build_articles(&rows, 0.15, day()),
            build_articles(&rows, 0.15, day())
        );
    }

    #[tokio::test]
    async fn unconfigured_gateway_serves_fallback_articles() {
        let state = crate::aggregators::test_support::test_state(None);
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let aggregator = PagesAggregator::new(&state);

        let top = aggregator.fetch_top_articles(TimeRange::Last7Days, today).await;
        assert!(top.success);
        assert_eq!(top.source, DataSource::Fallback);
        assert!(top.error.is_none());
        assert_eq!(top.data.len(), 3);
        assert!(top.data.iter().all(|a| a.date == today));
        assert_eq!(top.time_range.end_date, today.pred_opt().unwrap());

        let pages = aggregator.fetch_pages(TimeRange::Last7Days, today).await;
        assert_eq!(pages.source, DataSource::Fallback);
        assert_eq!(pages.data.len(), 8);
    }

    #[tokio::test]
    async fn live_failure_falls_back_with_the_error_message() {
        let server = wiremock::MockServer::start().await;
        let gateway = crate::gateway::ReportingGateway::new(
            crate::gateway::test_support::test_key(&server.uri()),
            "123".to_string(),
        )
        .with_api_base(&server.uri());
        let state = crate::aggregators::test_support::test_state(Some(gateway));

        let response = PagesAggregator::new(&state)
            .fetch_top_articles(
                TimeRange::Last7Days,
                NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            )
            .await;

        assert!(response.success);
        assert_eq!(response.source, DataSource::Fallback);
        assert!(response.error.is_some());
        assert_eq!(response.data.len(), 3);
    }
}
