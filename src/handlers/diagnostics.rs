use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use tracing::{error, info};

use crate::gateway::ProbeSample;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ConnectionTestResponse {
    pub success: bool,
    pub message: String,
    pub details: ConnectionDetails,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDetails {
    pub timestamp: String,
    pub env_vars_present: EnvVarsPresent,
    pub property_id: Option<String>,
    pub client_initialized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_test: Option<ConnectionTest>,
    pub overall_status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct EnvVarsPresent {
    #[serde(rename = "GA4_PROPERTY_ID")]
    pub property_id: bool,
    #[serde(rename = "GA4_SERVICE_ACCOUNT_JSON")]
    pub service_account_json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionTest {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_data: Option<ProbeSample>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Self-test for the reporting connection: reports which pieces of
/// configuration are present, whether the gateway initialized, and the
/// outcome of a minimal live probe query.
pub async fn test_connection(State(state): State<AppState>) -> Json<ConnectionTestResponse> {
    let env_vars_present = EnvVarsPresent {
        property_id: state.config.property_id.is_some(),
        service_account_json: state.config.service_account_json.is_some(),
    };

    let mut details = ConnectionDetails {
        timestamp: Utc::now().to_rfc3339(),
        env_vars_present,
        property_id: state.config.property_id.clone(),
        client_initialized: state.gateway.is_some(),
        connection_test: None,
        overall_status: "failed",
    };

    let Some(gateway) = &state.gateway else {
        return Json(ConnectionTestResponse {
            success: false,
            message: "Reporting API not configured. Missing property ID or credentials."
                .to_string(),
            details,
        });
    };

    match gateway.probe().await {
        Ok(sample) => {
            info!(
                "reporting connection test succeeded ({} rows)",
                sample.rows_returned
            );
            details.connection_test = Some(ConnectionTest {
                success: true,
                sample_data: Some(sample),
                error: None,
            });
            details.overall_status = "success";
            Json(ConnectionTestResponse {
                success: true,
                message: "Reporting connection successful! You are receiving real data."
                    .to_string(),
                details,
            })
        }
        Err(e) => {
            error!("reporting connection test failed: {e}");
            details.connection_test = Some(ConnectionTest {
                success: false,
                sample_data: None,
                error: Some(e.to_string()),
            });
            Json(ConnectionTestResponse {
                success: false,
                message: "Reporting connection failed. Check your credentials and permissions."
                    .to_string(),
                details,
            })
        }
    }
}
