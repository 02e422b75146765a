use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::debug;

use crate::aggregators::categories::CategoriesResponse;
use crate::aggregators::overview::OverviewResponse;
use crate::aggregators::pages::{PagesResponse, TopArticlesResponse};
use crate::aggregators::social::SocialResponse;
use crate::aggregators::{
    CategoriesAggregator, OverviewAggregator, PagesAggregator, SocialAggregator,
};
use crate::date_range::TimeRange;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyticsParams {
    #[serde(rename = "timeRange")]
    pub time_range: Option<String>,
}

impl AnalyticsParams {
    pub fn range(&self) -> TimeRange {
        TimeRange::parse(self.time_range.as_deref().unwrap_or("7d"))
    }
}

pub async fn get_overview(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> Json<OverviewResponse> {
    let range = params.range();
    debug!("fetching overview analytics for {range:?}");
    let response = OverviewAggregator::new(&state)
        .fetch(range, Utc::now().date_naive())
        .await;
    Json(response)
}

pub async fn get_pages(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> Json<PagesResponse> {
    let range = params.range();
    debug!("fetching page analytics for {range:?}");
    let response = PagesAggregator::new(&state)
        .fetch_pages(range, Utc::now().date_naive())
        .await;
    Json(response)
}

pub async fn get_top_articles(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> Json<TopArticlesResponse> {
    let range = params.range();
    debug!("fetching top articles for {range:?}");
    let response = PagesAggregator::new(&state)
        .fetch_top_articles(range, Utc::now().date_naive())
        .await;
    Json(response)
}

pub async fn get_categories(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> Json<CategoriesResponse> {
    let range = params.range();
    debug!("fetching category analytics for {range:?}");
    let response = CategoriesAggregator::new(&state)
        .fetch(range, Utc::now().date_naive())
        .await;
    Json(response)
}

pub async fn get_social(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> Json<SocialResponse> {
    let range = params.range();
    debug!("fetching social analytics for {range:?}");
    let response = SocialAggregator::new(&state)
        .fetch(range, Utc::now().date_naive())
        .await;
    Json(response)
}
