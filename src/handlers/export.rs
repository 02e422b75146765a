use axum::{
    body::Body,
    extract::{Query, State},
    http::Response,
    response::IntoResponse,
};
use chrono::Utc;

use super::analytics::AnalyticsParams;
use crate::aggregators::{ArticleMetric, PagesAggregator};
use crate::AppState;

/// CSV download of the ranked article table for the selected range. Works
/// off the same envelope as the JSON endpoint, so it degrades to the
/// fallback dataset the same way.
pub async fn export_top_articles(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> impl IntoResponse {
    let range = params.range();
    let today = Utc::now().date_naive();
    let response = PagesAggregator::new(&state).fetch_pages(range, today).await;

    let filename = format!("presslytics-analytics-{}.csv", today.format("%Y-%m-%d"));

    Response::builder()
        .header("Content-Type", "text/csv")
        .header(
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::from(articles_to_csv(&response.data)))
        .unwrap()
}

/// Title cells are double-quoted so embedded commas survive; embedded
/// quotes are doubled per the CSV convention.
pub fn articles_to_csv(articles: &[ArticleMetric]) -> String {
    let mut lines = vec!["Rank,Title,Category,Views,Clicks,CTR".to_string()];
    for article in articles {
        let ctr = if article.views > 0 {
            format!(
                "{:.2}",
                article.clicks as f64 / article.views as f64 * 100.0
            )
        } else {
            "0.00".to_string()
        };
        lines.push(format!(
            "{},\"{}\",{},{},{},{}",
            article.id,
            article.title.replace('"', "\"\""),
            article.category,
            article.views,
            article.clicks,
            ctr,
        ));
    }
    lines.join("\n")
}
