use serde::Deserialize;
use std::fmt;

pub const DEFAULT_HUBSPOT_BASE_URL: &str = "https://api.hubapi.com";
pub const DEFAULT_PAGE_NAME: &str = "Hotspot Optimizer — Demo Request";

/// Secrets needed to reach the HubSpot Forms API.
///
/// Both values are optional at startup. A deployment that forgot one of them
/// still boots and answers every lead submission with a misconfiguration
/// error until the environment is fixed.
#[derive(Clone, Default, Deserialize)]
pub struct ForwardingConfig {
    pub form_id: Option<String>,
    pub token: Option<String>,
}

impl fmt::Debug for ForwardingConfig {
    /// Never prints the bearer token.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForwardingConfig")
            .field("form_id", &self.form_id)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Credentials resolved from a complete [`ForwardingConfig`].
#[derive(Clone, Copy)]
pub struct HubspotCredentials<'a> {
    pub form_id: &'a str,
    pub token: &'a str,
}

impl ForwardingConfig {
    pub fn new(form_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            form_id: non_blank(Some(form_id.into())),
            token: non_blank(Some(token.into())),
        }
    }

    /// Returns the credentials only when both secrets are present and non-empty.
    pub fn credentials(&self) -> Option<HubspotCredentials<'_>> {
        let form_id = self.form_id.as_deref().filter(|s| !s.trim().is_empty())?;
        let token = self.token.as_deref().filter(|s| !s.trim().is_empty())?;
        Some(HubspotCredentials { form_id, token })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub hubspot: ForwardingConfig,
    pub hubspot_base_url: String,
    pub page_name: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::from_lookup(|key| std::env::var(key).ok())?;

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("HubSpot Base URL: {}", config.hubspot_base_url);
        tracing::debug!("Lead page name: {}", config.page_name);
        tracing::debug!("Server Port: {}", config.port);
        if config.hubspot.credentials().is_none() {
            tracing::warn!(
                "HUBSPOT_FORM_ID or HUBSPOT_PRIVATE_APP_TOKEN missing; lead submissions will fail with 500"
            );
        }

        Ok(config)
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            port: lookup("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse::<u16>()
                .ok()
                .filter(|port| *port != 0)
                .ok_or_else(|| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            hubspot: ForwardingConfig {
                form_id: non_blank(lookup("HUBSPOT_FORM_ID")),
                token: non_blank(lookup("HUBSPOT_PRIVATE_APP_TOKEN")),
            },
            hubspot_base_url: non_blank(lookup("HUBSPOT_API_BASE_URL"))
                .map(|url| {
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("HUBSPOT_API_BASE_URL must start with http:// or https://");
                    }
                    Ok(url.trim_end_matches('/').to_string())
                })
                .transpose()?
                .unwrap_or_else(|| DEFAULT_HUBSPOT_BASE_URL.to_string()),
            page_name: non_blank(lookup("LEAD_PAGE_NAME"))
                .unwrap_or_else(|| DEFAULT_PAGE_NAME.to_string()),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
