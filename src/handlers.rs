use crate::config::Config;
use crate::errors::ForwardError;
use crate::forwarder::LeadForwarder;
use crate::hubspot_client::HubspotFormsClient;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode},
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Lead forwarding pipeline.
    pub forwarder: LeadForwarder,
}

impl AppState {
    /// Wires the forwarder from a loaded configuration.
    pub fn from_config(config: Config) -> Result<Self, ForwardError> {
        let client = HubspotFormsClient::new(config.hubspot_base_url.clone())?;
        let forwarder = LeadForwarder::new(config.hubspot.clone(), client, config.page_name.clone());

        Ok(Self { config, forwarder })
    }
}

/// Health check endpoint.
///
/// Returns the service status, version, and whether HubSpot credentials are
/// configured. Secrets themselves are never exposed.
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "hubspot_configured": state.config.hubspot.credentials().is_some()
        })),
    )
}

/// ANY /.netlify/functions/hubspot-lead
///
/// Forwards a contact-form submission to HubSpot. Every method is routed
/// here so non-POST requests get the plain-text 405 from the forwarder.
///
/// # Returns
///
/// * `Result<Json<serde_json::Value>, ForwardError>` - `{"ok": true}` or a plain-text error.
pub async fn submit_lead(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>, ForwardError> {
    tracing::debug!("{} /.netlify/functions/hubspot-lead ({} bytes)", method, body.len());

    state.forwarder.forward(&method, &headers, &body).await?;

    Ok(Json(json!({ "ok": true })))
}
