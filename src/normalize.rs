use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static BLOG_CATEGORY: Lazy<Regex> = Lazy::new(|| Regex::new(r"/blog/([^/]+)").unwrap());

/// Session sources the reporting query treats as social even when the
/// session medium is not tagged `social`.
pub const KNOWN_SOCIAL_SOURCES: [&str; 13] = [
    "facebook.com",
    "facebook",
    "fb",
    "linkedin.com",
    "linkedin",
    "pinterest.com",
    "pinterest",
    "x.com",
    "twitter.com",
    "twitter",
    "t.co",
    "instagram.com",
    "instagram",
];

/// Canonical social platforms tracked by the dashboard. The declaration
/// order is the tie-break order for the best-performer pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Facebook,
    Linkedin,
    Pinterest,
    #[serde(rename = "x.com")]
    XCom,
    Instagram,
}

pub const PLATFORMS: [SocialPlatform; 5] = [
    SocialPlatform::Facebook,
    SocialPlatform::Linkedin,
    SocialPlatform::Pinterest,
    SocialPlatform::XCom,
    SocialPlatform::Instagram,
];

impl SocialPlatform {
    /// Collapses referrer variants (`m.facebook.com`, `fb`, `t.co`, ...) into
    /// a canonical platform. Checks are case-insensitive substring matches in
    /// priority order; sources matching none are dropped from social
    /// aggregation rather than bucketed as "other".
    pub fn from_source(source: &str) -> Option<Self> {
        let source = source.to_lowercase();
        if source.contains("facebook") || source.contains("fb") {
            Some(SocialPlatform::Facebook)
        } else if source.contains("linkedin") {
            Some(SocialPlatform::Linkedin)
        } else if source.contains("pinterest") {
            Some(SocialPlatform::Pinterest)
        } else if source.contains("x.com") || source.contains("twitter") || source.contains("t.co")
        {
            Some(SocialPlatform::XCom)
        } else if source.contains("instagram") {
            Some(SocialPlatform::Instagram)
        } else {
            None
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            SocialPlatform::Facebook => "facebook",
            SocialPlatform::Linkedin => "linkedin",
            SocialPlatform::Pinterest => "pinterest",
            SocialPlatform::XCom => "x.com",
            SocialPlatform::Instagram => "instagram",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SocialPlatform::Facebook => "Facebook",
            SocialPlatform::Linkedin => "Linkedin",
            SocialPlatform::Pinterest => "Pinterest",
            SocialPlatform::XCom => "X.com",
            SocialPlatform::Instagram => "Instagram",
        }
    }
}

/// Category for paths matching `/blog/{slug}/...`: the slug with each
/// hyphen-delimited word capitalized (`ai-tools` -> `Ai Tools`). `None` for
/// everything else.
pub fn blog_category(path: &str) -> Option<String> {
    BLOG_CATEGORY.captures(path).and_then(|c| c.get(1)).map(|slug| {
        slug.as_str()
            .split('-')
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ")
    })
}

/// Display category for any page path; non-blog paths are `Uncategorized`.
pub fn category_from_path(path: &str) -> String {
    blog_category(path).unwrap_or_else(|| "Uncategorized".to_string())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// The reporting source returns dates in compact 8-digit form (`YYYYMMDD`);
/// anything else goes through generic calendar parsing. Every conversion of
/// a raw date string goes through here so the two shapes are handled
/// uniformly.
pub fn parse_report_date(raw: &str) -> Option<NaiveDate> {
    if raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveDate::parse_from_str(raw, "%Y%m%d").ok();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    chrono::DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}
