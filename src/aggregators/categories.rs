use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::error;

use super::{CategoryMetric, DataSource};
use crate::date_range::{resolve, TimeRange};
use crate::fallback;
use crate::gateway::{FilterExpression, OrderBy, RawReportRow, ReportSpec, ReportingGateway};
use crate::normalize::blog_category;
use crate::AppState;

const CATEGORY_ROW_LIMIT: i64 = 100;

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub data: Vec<CategoryMetric>,
    pub source: DataSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Blog traffic rolled up by the category segment of the page path.
pub struct CategoriesAggregator {
    gateway: Option<Arc<ReportingGateway>>,
}

impl CategoriesAggregator {
    pub fn new(state: &AppState) -> Self {
        CategoriesAggregator {
            gateway: state.gateway.clone(),
        }
    }

    pub async fn fetch(&self, range: TimeRange, today: NaiveDate) -> CategoriesResponse {
        let date_range = resolve(range, today);

        let Some(gateway) = &self.gateway else {
            return fallback_response(None);
        };

        let spec = ReportSpec::new(date_range, ["pagePath"], ["screenPageViews", "sessions"])
            .filter(FilterExpression::contains("pagePath", "/blog/"))
            .order_by(OrderBy::metric_desc("screenPageViews"))
            .limit(CATEGORY_ROW_LIMIT);

        match gateway.run_report(&spec).await {
            Ok(rows) => CategoriesResponse {
                success: true,
                data: build_categories(&rows),
                source: DataSource::Live,
                error: None,
            },
            Err(e) => {
                error!("categories report failed: {e}");
                fallback_response(Some(e.to_string()))
            }
        }
    }
}

fn fallback_response(error: Option<String>) -> CategoriesResponse {
    CategoriesResponse {
        success: true,
        data: fallback::category_stats(),
        source: DataSource::Fallback,
        error,
    }
}

#[derive(Default)]
struct CategoryAccumulator {
    views: i64,
    sessions: i64,
    paths: BTreeSet<String>,
}

/// Groups rows by derived category. Rows whose path has no `/blog/{slug}`
/// segment are skipped. Output is sorted by views descending; the ordered
/// grouping map makes ties deterministic (alphabetical).
pub fn build_categories(rows: &[RawReportRow]) -> Vec<CategoryMetric> {
    let mut groups: BTreeMap<String, CategoryAccumulator> = BTreeMap::new();

    for row in rows {
        let path = row.dimension(0);
        let Some(category) = blog_category(path) else {
            continue;
        };
        let entry = groups.entry(category).or_default();
        entry.views += row.metric_i64(0);
        entry.sessions += row.metric_i64(1);
        entry.paths.insert(path.to_string());
    }

    let mut categories: Vec<CategoryMetric> = groups
        .into_iter()
        .map(|(name, acc)| CategoryMetric {
            name,
            views: acc.views,
            articles: acc.paths.len(),
            avg_ctr: if acc.views > 0 {
                format!("{:.1}", acc.sessions as f64 / acc.views as f64 * 100.0)
            } else {
                "0.0".to_string()
            },
        })
        .collect();

    categories.sort_by(|a, b| b.views.cmp(&a.views));
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(path: &str, views: &str, sessions: &str) -> RawReportRow {
        RawReportRow {
            dimensions: vec![path.to_string()],
            metrics: vec![views.to_string(), sessions.to_string()],
        }
    }

    #[test]
    fn same_category_rows_accumulate() {
        let rows = vec![
            row("/blog/ai-tools/post-one", "100", "10"),
            row("/blog/ai-tools/post-two", "50", "5"),
        ];
        let categories = build_categories(&rows);

        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Ai Tools");
        assert_eq!(categories[0].views, 150);
        assert_eq!(categories[0].articles, 2);
        assert_eq!(categories[0].avg_ctr, "10.0");
    }

    #[test]
    fn duplicate_paths_count_as_one_article() {
        let rows = vec![
            row("/blog/tech/post", "100", "10"),
            row("/blog/tech/post", "40", "4"),
        ];
        let categories = build_categories(&rows);
        assert_eq!(categories[0].articles, 1);
        assert_eq!(categories[0].views, 140);
    }

    #[test]
    fn non_blog_rows_are_skipped() {
        let rows = vec![
            row("/about", "9999", "10"),
            row("/blog/tech/post", "100", "10"),
        ];
        let categories = build_categories(&rows);
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Tech");
    }

    #[test]
    fn zero_view_categories_report_zero_ctr() {
        let rows = vec![row("/blog/tech/post", "0", "10")];
        let categories = build_categories(&rows);
        assert_eq!(categories[0].avg_ctr, "0.0");
    }

    #[test]
    fn output_is_sorted_by_views_descending() {
        let rows = vec![
            row("/blog/css/a", "10", "1"),
            row("/blog/react/b", "300", "20"),
            row("/blog/devops/c", "120", "9"),
        ];
        let names: Vec<_> = build_categories(&rows)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["React", "Devops", "Css"]);
    }

    #[test]
    fn identical_rows_build_identical_output() {
        let rows = vec![
            row("/blog/tech/a", "100", "10"),
            row("/blog/css/b", "100", "8"),
        ];
        assert_eq!(build_categories(&rows), build_categories(&rows));
    }

    #[tokio::test]
    async fn unconfigured_gateway_serves_fallback_stats() {
        let state = crate::aggregators::test_support::test_state(None);
        let response = CategoriesAggregator::new(&state)
            .fetch(
                TimeRange::Last30Days,
                NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            )
            .await;

        assert!(response.success);
        assert_eq!(response.source, DataSource::Fallback);
        assert!(response.error.is_none());
        assert_eq!(response.data.len(), 7);
    }

    #[tokio::test]
    async fn live_failure_falls_back_with_the_error_message() {
        let server = wiremock::MockServer::start().await;
        let gateway = ReportingGateway::new(
            crate::gateway::test_support::test_key(&server.uri()),
            "123".to_string(),
        )
        .with_api_base(&server.uri());
        let state = crate::aggregators::test_support::test_state(Some(gateway));

        let response = CategoriesAggregator::new(&state)
            .fetch(
                TimeRange::Last7Days,
                NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            )
            .await;

        assert!(response.success);
        assert_eq!(response.source, DataSource::Fallback);
        assert!(response.error.is_some());
    }
}
