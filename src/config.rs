/// Redirect settings: which site to rewrite, how, and where to go otherwise
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rewrite::RewriteTemplate;

/// What to do when the template names a parameter the URL lacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingField {
    /// Insert the text `undefined`
    #[default]
    Literal,
    /// Drop the whole destination field
    Omit,
    /// Fail the rewrite
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectConfig {
    /// Registrable domain whose URLs get rewritten
    pub source_domain: String,
    pub template: RewriteTemplate,
    /// Opened when the active tab is not on `source_domain`
    pub fallback_url: String,
    pub missing_field: MissingField,
}

impl RedirectConfig {
    /// Parse a JSON config; omitted keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for RedirectConfig {
    fn default() -> Self {
        RedirectConfig {
            source_domain: "booking.com".to_string(),
            template: RewriteTemplate::booking_to_expedia(),
            fallback_url: "https://www.expedia.com".to_string(),
            missing_field: MissingField::Literal,
        }
    }
}
