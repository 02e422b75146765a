use chrono::NaiveDate;
use serde::Serialize;

use crate::normalize::SocialPlatform;

pub mod categories;
pub mod overview;
pub mod pages;
pub mod social;

pub use categories::CategoriesAggregator;
pub use overview::OverviewAggregator;
pub use pages::PagesAggregator;
pub use social::SocialAggregator;

/// Where an envelope's data came from. The dashboard shows a "live data"
/// indicator off this field, so it must always be reported faithfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Fallback,
    Error,
}

/// One calendar day of site-wide traffic. `clicks` is an estimate derived
/// from the event count, not a measured quantity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyMetric {
    pub date: String,
    pub views: i64,
    pub clicks: i64,
    pub engagement: f64,
}

/// One ranked page/article row. `id` is the 1-based position within the
/// result set, not a stable key: re-querying can renumber articles when the
/// ranking shifts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleMetric {
    pub id: usize,
    pub title: String,
    pub category: String,
    pub views: i64,
    pub clicks: i64,
    pub engagement: f64,
    pub date: NaiveDate,
    pub path: String,
    pub bounce_rate: f64,
    pub active_users: i64,
}

/// Rollup of blog traffic by derived category. The category exists only as
/// a grouping key computed at aggregation time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMetric {
    pub name: String,
    pub views: i64,
    pub articles: usize,
    #[serde(rename = "avgCTR")]
    pub avg_ctr: String,
}

/// Per-platform social sessions for one calendar day. Days with no matched
/// social traffic produce no row at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformDailyMetric {
    pub date: String,
    pub facebook: i64,
    pub linkedin: i64,
    pub pinterest: i64,
    #[serde(rename = "x.com")]
    pub x_com: i64,
    pub instagram: i64,
}

impl PlatformDailyMetric {
    pub fn new(date: &str) -> Self {
        PlatformDailyMetric {
            date: date.to_string(),
            facebook: 0,
            linkedin: 0,
            pinterest: 0,
            x_com: 0,
            instagram: 0,
        }
    }

    pub fn add(&mut self, platform: SocialPlatform, sessions: i64) {
        *self.slot(platform) += sessions;
    }

    pub fn sessions_for(&self, platform: SocialPlatform) -> i64 {
        match platform {
            SocialPlatform::Facebook => self.facebook,
            SocialPlatform::Linkedin => self.linkedin,
            SocialPlatform::Pinterest => self.pinterest,
            SocialPlatform::XCom => self.x_com,
            SocialPlatform::Instagram => self.instagram,
        }
    }

    fn slot(&mut self, platform: SocialPlatform) -> &mut i64 {
        match platform {
            SocialPlatform::Facebook => &mut self.facebook,
            SocialPlatform::Linkedin => &mut self.linkedin,
            SocialPlatform::Pinterest => &mut self.pinterest,
            SocialPlatform::XCom => &mut self.x_com,
            SocialPlatform::Instagram => &mut self.instagram,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Neutral,
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Engagement durations arrive in seconds; the dashboard shows minutes to
/// one decimal.
pub(crate) fn engagement_minutes(seconds: f64) -> f64 {
    round1(seconds / 60.0)
}
