//! Lead forwarding pipeline.
//!
//! A submission moves through `method check -> config check -> parse ->
//! transform -> upstream call`, stopping at the first failing step. Each step
//! returns its own `Result` so it can be exercised on its own.

use crate::config::{ForwardingConfig, HubspotCredentials};
use crate::cookies::tracking_token_from_headers;
use crate::errors::ForwardError;
use crate::hubspot_client::HubspotFormsClient;
use crate::lead_models::{parse_submission, HubspotSubmission, LeadSubmission, SubmissionContext};
use axum::http::{header, HeaderMap, Method};
use chrono::Utc;
use uuid::Uuid;

/// Relays contact-form submissions to HubSpot.
#[derive(Clone)]
pub struct LeadForwarder {
    config: ForwardingConfig,
    client: HubspotFormsClient,
    page_name: String,
}

impl LeadForwarder {
    pub fn new(
        config: ForwardingConfig,
        client: HubspotFormsClient,
        page_name: impl Into<String>,
    ) -> Self {
        Self {
            config,
            client,
            page_name: page_name.into(),
        }
    }

    /// Handles one inbound submission.
    ///
    /// Not idempotent: two identical calls make two upstream submissions.
    pub async fn forward(
        &self,
        method: &Method,
        headers: &HeaderMap,
        body: &[u8],
    ) -> Result<(), ForwardError> {
        check_method(method)?;
        let credentials = self.credentials()?;
        let submission = parse_submission(body)?;

        let submission_id = Uuid::new_v4();
        let field_count = submission.len();
        let context = submission_context(headers, &self.page_name);
        let has_token = context.hutk.is_some();
        let payload = build_submission(submission, context, Utc::now().timestamp_millis());

        tracing::info!(
            "Forwarding lead submission {}: {} field(s), tracking token: {}",
            submission_id,
            field_count,
            has_token
        );

        self.client.submit(credentials, &payload).await?;

        tracing::info!("Lead submission {} forwarded", submission_id);
        Ok(())
    }

    fn credentials(&self) -> Result<HubspotCredentials<'_>, ForwardError> {
        self.config
            .credentials()
            .ok_or(ForwardError::Misconfigured)
    }
}

/// Only POST is accepted.
pub fn check_method(method: &Method) -> Result<(), ForwardError> {
    if *method == Method::POST {
        Ok(())
    } else {
        Err(ForwardError::MethodNotAllowed)
    }
}

/// Derives the submission context from request headers.
pub fn submission_context(headers: &HeaderMap, page_name: &str) -> SubmissionContext {
    let page_uri = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    SubmissionContext {
        page_uri,
        page_name: page_name.to_string(),
        hutk: tracking_token_from_headers(headers),
    }
}

/// Builds the HubSpot payload. `submitted_at` is milliseconds since the epoch.
pub fn build_submission(
    submission: LeadSubmission,
    context: SubmissionContext,
    submitted_at: i64,
) -> HubspotSubmission {
    HubspotSubmission {
        submitted_at,
        fields: submission.into_fields(),
        context,
    }
}
