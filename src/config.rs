use std::env;

/// Runtime configuration, sourced from the environment (with `.env`
/// support). The reporting credentials are optional: without them the
/// analytics endpoints serve the static fallback datasets.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Reporting property identifier.
    pub property_id: Option<String>,
    /// Opaque service-account JSON blob for the reporting API.
    pub service_account_json: Option<String>,
    pub dashboard_username: String,
    pub dashboard_password: String,
    /// Clicks are estimated, not measured: overview clicks as a fraction of
    /// events, article clicks as a fraction of views.
    pub click_event_ratio: f64,
    pub click_view_ratio: f64,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_env()
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid u16"))?;

        Ok(Config {
            port,
            property_id: env::var("GA4_PROPERTY_ID").ok().filter(|v| !v.is_empty()),
            service_account_json: env::var("GA4_SERVICE_ACCOUNT_JSON")
                .ok()
                .filter(|v| !v.is_empty()),
            dashboard_username: env::var("DASHBOARD_USERNAME")
                .unwrap_or_else(|_| "admin".to_string()),
            dashboard_password: env::var("DASHBOARD_PASSWORD")
                .unwrap_or_else(|_| "admin".to_string()),
            click_event_ratio: parse_ratio("CLICK_EVENT_RATIO", 0.05)?,
            click_view_ratio: parse_ratio("CLICK_VIEW_RATIO", 0.15)?,
        })
    }
}

fn parse_ratio(name: &str, default: f64) -> anyhow::Result<f64> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("{name} must be a number, got {raw:?}")),
        Err(_) => Ok(default),
    }
}
