use crate::config::HubspotCredentials;
use crate::errors::ForwardError;
use crate::lead_models::HubspotSubmission;
use reqwest::{header, Client, Url};

/// Client for the HubSpot Forms API submission endpoint.
///
/// One POST per call. No retries and no timeout beyond reqwest's defaults.
#[derive(Clone)]
pub struct HubspotFormsClient {
    client: Client,
    base_url: String,
}

impl HubspotFormsClient {
    /// Creates a new `HubspotFormsClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Origin of the HubSpot API, without trailing slash.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ForwardError> {
        let client = Client::builder().build().map_err(|e| {
            ForwardError::Unexpected(format!("Failed to create HubSpot client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Builds `{base}/marketing/v3/forms/{form_id}/submissions`.
    ///
    /// The form id is pushed as a single encoded path segment.
    pub fn submission_url(&self, form_id: &str) -> Result<Url, ForwardError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ForwardError::Unexpected(format!("Failed to build URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| {
                ForwardError::Unexpected(format!("Base URL cannot have a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(["marketing", "v3", "forms", form_id, "submissions"]);

        Ok(url)
    }

    /// Submits a lead to HubSpot.
    ///
    /// # Returns
    ///
    /// * `Ok(())` on any 2xx answer.
    /// * `ForwardError::UpstreamRejected` on a non-success status.
    /// * `ForwardError::Unexpected` on transport failures.
    pub async fn submit(
        &self,
        credentials: HubspotCredentials<'_>,
        payload: &HubspotSubmission,
    ) -> Result<(), ForwardError> {
        let url = self.submission_url(credentials.form_id)?;
        tracing::debug!("Posting lead submission to HubSpot: {}", url);

        let response = self
            .client
            .post(url)
            .header(header::AUTHORIZATION, format!("Bearer {}", credentials.token))
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ForwardError::UpstreamRejected {
                status: status.as_u16(),
                body: error_text,
            });
        }

        tracing::info!("✓ HubSpot accepted submission ({})", response.status());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HubspotFormsClient::new("https://api.hubapi.com");
        assert!(client.is_ok());
    }

    #[test]
    fn test_submission_url() {
        let client = HubspotFormsClient::new("https://api.hubapi.com").unwrap();
        let url = client.submission_url("abc-123").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.hubapi.com/marketing/v3/forms/abc-123/submissions"
        );
    }

    #[test]
    fn test_submission_url_encodes_form_id() {
        let client = HubspotFormsClient::new("http://127.0.0.1:8080").unwrap();
        let url = client.submission_url("../a b").unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8080/marketing/v3/forms/..%2Fa%20b/submissions"
        );
    }

    #[test]
    fn test_invalid_base_url_is_unexpected() {
        let client = HubspotFormsClient::new("not a url").unwrap();
        assert!(matches!(
            client.submission_url("abc"),
            Err(ForwardError::Unexpected(_))
        ));
    }
}
