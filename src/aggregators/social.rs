use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::error;

use super::{round1, DataSource, PlatformDailyMetric, TrendDirection};
use crate::date_range::{resolve, TimeRange};
use crate::fallback;
use crate::gateway::{FilterExpression, OrderBy, RawReportRow, ReportSpec, ReportingGateway};
use crate::normalize::{SocialPlatform, KNOWN_SOCIAL_SOURCES, PLATFORMS};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SocialResponse {
    pub success: bool,
    pub data: Vec<PlatformDailyMetric>,
    pub source: DataSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<SocialStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialStats {
    pub total_visits: i64,
    pub avg_engagement: f64,
    pub best_performer: BestPerformer,
    pub platforms: Vec<PlatformSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BestPerformer {
    pub name: String,
    pub visits: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlatformSummary {
    pub platform: &'static str,
    pub visits: i64,
    pub trend: f64,
    pub direction: TrendDirection,
}

/// Daily social-referral matrix plus range-wide platform stats. Unlike the
/// other aggregators this one does not substitute data on a live failure:
/// fabricated platform numbers would be actively misleading, so the caller
/// gets an explicit empty error state instead.
pub struct SocialAggregator {
    gateway: Option<Arc<ReportingGateway>>,
}

impl SocialAggregator {
    pub fn new(state: &AppState) -> Self {
        SocialAggregator {
            gateway: state.gateway.clone(),
        }
    }

    pub async fn fetch(&self, range: TimeRange, today: NaiveDate) -> SocialResponse {
        let date_range = resolve(range, today);

        let Some(gateway) = &self.gateway else {
            let data = fallback::social_series();
            let stats = build_stats(&data);
            return SocialResponse {
                success: true,
                data,
                source: DataSource::Fallback,
                error: None,
                stats,
                message: None,
            };
        };

        let spec = ReportSpec::new(
            date_range,
            ["date", "sessionSource", "sessionMedium"],
            ["sessions", "engagedSessions"],
        )
        .filter(FilterExpression::any(vec![
            FilterExpression::exact("sessionMedium", "social"),
            FilterExpression::in_list("sessionSource", KNOWN_SOCIAL_SOURCES),
        ]))
        .order_by(OrderBy::dimension_asc("date"));

        match gateway.run_report(&spec).await {
            Ok(rows) => {
                let data = build_daily_matrix(&rows);
                if data.is_empty() {
                    return SocialResponse {
                        success: true,
                        data,
                        source: DataSource::Live,
                        error: None,
                        stats: None,
                        message: Some(
                            "No social media traffic found in the selected time range".to_string(),
                        ),
                    };
                }
                let stats = build_stats(&data);
                SocialResponse {
                    success: true,
                    data,
                    source: DataSource::Live,
                    error: None,
                    stats,
                    message: None,
                }
            }
            Err(e) => {
                error!("social report failed: {e}");
                SocialResponse {
                    success: false,
                    data: Vec::new(),
                    source: DataSource::Error,
                    error: Some(e.to_string()),
                    stats: None,
                    message: None,
                }
            }
        }
    }
}

/// Sums sessions per (day, platform). Sources that normalize to no known
/// platform are dropped entirely, and days where everything was dropped emit
/// no row. Keying on the raw date string keeps the output chronological for
/// both date shapes the source produces.
pub fn build_daily_matrix(rows: &[RawReportRow]) -> Vec<PlatformDailyMetric> {
    let mut days: BTreeMap<String, PlatformDailyMetric> = BTreeMap::new();

    for row in rows {
        let date = row.dimension(0);
        let source = row.dimension(1);
        let sessions = row.metric_i64(0);

        let Some(platform) = SocialPlatform::from_source(source) else {
            continue;
        };

        days.entry(date.to_string())
            .or_insert_with(|| PlatformDailyMetric::new(date))
            .add(platform, sessions);
    }

    days.into_values().collect()
}

/// Range-wide rollup of the daily matrix. `None` when the matrix is empty.
pub fn build_stats(days: &[PlatformDailyMetric]) -> Option<SocialStats> {
    if days.is_empty() {
        return None;
    }

    let total_for =
        |platform: SocialPlatform| days.iter().map(|d| d.sessions_for(platform)).sum::<i64>();

    let totals: Vec<(SocialPlatform, i64)> = PLATFORMS.iter().map(|&p| (p, total_for(p))).collect();
    let total_visits: i64 = totals.iter().map(|(_, t)| t).sum();

    let linkedin = total_for(SocialPlatform::Linkedin);
    let facebook = total_for(SocialPlatform::Facebook);
    let avg_engagement = if total_visits > 0 {
        round1((linkedin + facebook) as f64 / total_visits as f64 * 100.0)
    } else {
        0.0
    };

    // First strictly-greater total wins, so ties resolve to the earlier
    // platform in the fixed order.
    let mut best = (PLATFORMS[0], 0);
    for &(platform, total) in &totals {
        if total > best.1 {
            best = (platform, total);
        }
    }

    let platforms = totals
        .iter()
        .map(|&(platform, visits)| {
            let (first, second) = half_totals(days, platform);
            let (trend, direction) = trend_for(first, second);
            PlatformSummary {
                platform: platform.key(),
                visits,
                trend,
                direction,
            }
        })
        .collect();

    Some(SocialStats {
        total_visits,
        avg_engagement,
        best_performer: BestPerformer {
            name: best.0.display_name().to_string(),
            visits: best.1,
        },
        platforms,
    })
}

/// Splits the chronological day list at floor(n/2) and totals each half.
fn half_totals(days: &[PlatformDailyMetric], platform: SocialPlatform) -> (i64, i64) {
    let mid = days.len() / 2;
    let first = days[..mid].iter().map(|d| d.sessions_for(platform)).sum();
    let second = days[mid..].iter().map(|d| d.sessions_for(platform)).sum();
    (first, second)
}

/// Percentage change between half-range totals. A platform appearing from
/// nothing reads as +100%; thresholds of +/-5 separate a real movement from
/// noise.
pub fn trend_for(first_half: i64, second_half: i64) -> (f64, TrendDirection) {
    let trend = if first_half > 0 {
        round1((second_half - first_half) as f64 / first_half as f64 * 100.0)
    } else if second_half > 0 {
        100.0
    } else {
        0.0
    };

    let direction = if trend > 5.0 {
        TrendDirection::Up
    } else if trend < -5.0 {
        TrendDirection::Down
    } else {
        TrendDirection::Neutral
    };

    (trend, direction)
}
