use crate::errors::ForwardError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Flat field-name/value mapping submitted by the site's contact form.
///
/// Keeps the key order of the incoming JSON object. Built by
/// [`parse_submission`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadSubmission {
    fields: Vec<(String, String)>,
}

/// Parses a request body into a submission.
///
/// An empty body is an empty submission. Strings are kept as-is, numbers and
/// booleans are forwarded as their JSON text. Anything else (malformed JSON,
/// a non-object document, null, nested arrays or objects) is an unexpected
/// failure.
pub fn parse_submission(body: &[u8]) -> Result<LeadSubmission, ForwardError> {
    if body.is_empty() {
        return Ok(LeadSubmission::default());
    }

    let object: Map<String, Value> = serde_json::from_slice(body)?;

    let fields = object
        .into_iter()
        .map(|(name, value)| match value {
            Value::String(value) => Ok((name, value)),
            Value::Number(n) => Ok((name, n.to_string())),
            Value::Bool(b) => Ok((name, b.to_string())),
            other => Err(ForwardError::Unexpected(format!(
                "Field '{}' is not a scalar: {}",
                name, other
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LeadSubmission { fields })
}

impl LeadSubmission {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Re-expresses the mapping as HubSpot `{name, value}` pairs.
    pub fn into_fields(self) -> Vec<SubmissionField> {
        self.fields
            .into_iter()
            .map(|(name, value)| SubmissionField { name, value })
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for LeadSubmission
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Body of a HubSpot Forms API v3 submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubspotSubmission {
    /// Milliseconds since the Unix epoch, stamped by this server.
    pub submitted_at: i64,
    pub fields: Vec<SubmissionField>,
    pub context: SubmissionContext,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionField {
    pub name: String,
    pub value: String,
}

/// Where the submission came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionContext {
    /// Referring page, empty when the request had no `Referer`.
    pub page_uri: String,
    pub page_name: String,
    /// HubSpot visitor token. Omitted from the JSON when no cookie carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hutk: Option<String>,
}

#[cfg(test)]
impl LeadSubmission {
    fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}
