/// Rewriting a hotel-search URL from one booking site into another site's search URL
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::{MissingField, RedirectConfig};
use crate::domain::belongs_to;
use crate::error::RewriteError;
use crate::query::{QueryParams, parse_url_params, to_query_string};
use crate::uri::{decode_uri, encode_uri};

/// Text inserted for a missing parameter under `MissingField::Literal`
pub const UNDEFINED: &str = "undefined";

/// One destination query field, built from one or more source parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateField {
    pub target: String,
    pub sources: Vec<String>,
    /// Placed between source values when there is more than one
    #[serde(default)]
    pub joiner: String,
}

impl TemplateField {
    pub fn single(target: &str, source: &str) -> Self {
        TemplateField {
            target: target.to_string(),
            sources: vec![source.to_string()],
            joiner: String::new(),
        }
    }

    pub fn joined(target: &str, sources: &[&str], joiner: &str) -> Self {
        TemplateField {
            target: target.to_string(),
            sources: sources.iter().map(|s| s.to_string()).collect(),
            joiner: joiner.to_string(),
        }
    }

    /// `None` when the field is dropped under `MissingField::Omit`
    fn render(
        &self,
        params: &QueryParams,
        policy: MissingField,
    ) -> Result<Option<String>, RewriteError> {
        let mut values = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            match params.text(source) {
                Some(value) => values.push(value),
                None => match policy {
                    MissingField::Literal => values.push(UNDEFINED.to_string()),
                    MissingField::Omit => return Ok(None),
                    MissingField::Reject => {
                        return Err(RewriteError::MissingField {
                            field: self.target.clone(),
                            param: source.clone(),
                        });
                    }
                },
            }
        }

        Ok(Some(values.join(&self.joiner)))
    }
}

/// Destination base URL plus the ordered fields appended to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteTemplate {
    pub base: String,
    pub fields: Vec<TemplateField>,
}

impl RewriteTemplate {
    /// booking.com search parameters onto an expedia.com hotel search
    pub fn booking_to_expedia() -> Self {
        RewriteTemplate {
            base: "https://www.expedia.com/Hotel-Search?".to_string(),
            fields: vec![
                TemplateField::single("destination", "ss"),
                TemplateField::joined(
                    "startDate",
                    &["checkin_month", "checkin_monthday", "checkin_year"],
                    "/",
                ),
                TemplateField::joined(
                    "endDate",
                    &["checkout_month", "checkout_monthday", "checkout_year"],
                    "/",
                ),
            ],
        }
    }

    /// Build the destination URL from parsed source parameters
    pub fn render(&self, params: &QueryParams, policy: MissingField) -> Result<String, RewriteError> {
        let mut rendered = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            if let Some(value) = field.render(params, policy)? {
                rendered.push((field.target.as_str(), value));
            }
        }

        let query = to_query_string(rendered.iter().map(|(name, value)| (*name, value.as_str())));
        Ok(append_query(&self.base, &query))
    }
}

impl Default for RewriteTemplate {
    fn default() -> Self {
        Self::booking_to_expedia()
    }
}

fn append_query(base: &str, query: &str) -> String {
    if query.is_empty() {
        base.to_string()
    } else if base.ends_with('?') || base.ends_with('&') {
        format!("{}{}", base, query)
    } else if base.contains('?') {
        format!("{}&{}", base, query)
    } else {
        format!("{}?{}", base, query)
    }
}

/// Rewrite `url` into the configured destination.
///
/// Returns `Ok(None)` when the URL is not on the source domain. The source URL
/// is `encodeURI`-escaped before parsing and the assembled URL is
/// `decodeURI`-unescaped afterwards, so existing escapes in source values
/// survive as single escapes.
pub fn rewrite_url(url: &str, config: &RedirectConfig) -> Result<Option<String>, RewriteError> {
    if !belongs_to(url, &config.source_domain) {
        debug!("Not a {} URL, nothing to rewrite", config.source_domain);
        return Ok(None);
    }

    let params = parse_url_params(&encode_uri(url));
    let assembled = config.template.render(&params, config.missing_field)?;
    let rewritten = decode_uri(&assembled);

    debug!("Rewrote {} parameters into {}", params.len(), rewritten);
    Ok(Some(rewritten))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::parse_query;

    const BOOKING_URL: &str = "https://www.booking.com/searchresults.hu.html?label=gen173nr&lang=hu\
        &ss=Budapest&checkin_year=2017&checkin_month=11&checkin_monthday=28\
        &checkout_year=2017&checkout_month=11&checkout_monthday=30&no_rooms=1&group_adults=2";

    fn config_with(policy: MissingField) -> RedirectConfig {
        RedirectConfig {
            missing_field: policy,
            ..RedirectConfig::default()
        }
    }

    #[test]
    fn test_rewrite_booking_url() {
        let rewritten = rewrite_url(BOOKING_URL, &RedirectConfig::default()).unwrap().unwrap();

        assert!(rewritten.starts_with("https://www.expedia.com/Hotel-Search?"));
        assert!(rewritten.contains("destination=budapest&startDate=11/28/2017&endDate=11/30/2017"));
    }

    #[test]
    fn test_rewrite_keeps_escapes_in_destination() {
        let url = "https://www.booking.com/searchresults.html?ss=Budapest%2C+Pest+megye%2C+Magyarorsz%C3%A1g\
            &checkin_year=2017&checkin_month=11&checkin_monthday=28\
            &checkout_year=2017&checkout_month=11&checkout_monthday=30";

        let rewritten = rewrite_url(url, &RedirectConfig::default()).unwrap().unwrap();

        assert!(rewritten.contains("destination=budapest%2c+pest+megye%2c+magyarorsz%c3%a1g&"));
    }

    #[test]
    fn test_rewrite_other_domain_not_applicable() {
        let config = RedirectConfig::default();

        assert_eq!(rewrite_url("https://www.google.com/search?q=hotels", &config).unwrap(), None);
        assert_eq!(rewrite_url("https://www.google.com/?q=booking.com", &config).unwrap(), None);
        assert_eq!(rewrite_url("", &config).unwrap(), None);
    }

    #[test]
    fn test_missing_field_literal() {
        let rewritten = rewrite_url(
            "https://www.booking.com/index.html?ss=Rome",
            &config_with(MissingField::Literal),
        )
        .unwrap()
        .unwrap();

        assert_eq!(
            rewritten,
            "https://www.expedia.com/Hotel-Search?destination=rome\
             &startDate=undefined/undefined/undefined&endDate=undefined/undefined/undefined"
        );
    }

    #[test]
    fn test_missing_field_omit() {
        let rewritten = rewrite_url(
            "https://www.booking.com/index.html?ss=Rome&checkin_year=2018&checkin_month=1&checkin_monthday=2",
            &config_with(MissingField::Omit),
        )
        .unwrap()
        .unwrap();

        assert_eq!(
            rewritten,
            "https://www.expedia.com/Hotel-Search?destination=rome&startDate=1/2/2018"
        );
    }

    #[test]
    fn test_missing_field_reject() {
        let err = rewrite_url(
            "https://www.booking.com/index.html?ss=Rome",
            &config_with(MissingField::Reject),
        )
        .unwrap_err();

        assert_eq!(
            err,
            RewriteError::MissingField {
                field: "startDate".to_string(),
                param: "checkin_month".to_string(),
            }
        );
    }

    #[test]
    fn test_render_repeated_and_flag_params() {
        let template = RewriteTemplate {
            base: "https://example.com/search".to_string(),
            fields: vec![
                TemplateField::single("q", "ss"),
                TemplateField::single("debug", "debug"),
            ],
        };
        let params = parse_query("ss=a&ss=b&debug");

        let rendered = template.render(&params, MissingField::Literal).unwrap();

        assert_eq!(rendered, "https://example.com/search?q=a,b&debug=true");
    }

    #[test]
    fn test_append_query() {
        assert_eq!(append_query("https://x.com/s?", "a=1"), "https://x.com/s?a=1");
        assert_eq!(append_query("https://x.com/s?k=v", "a=1"), "https://x.com/s?k=v&a=1");
        assert_eq!(append_query("https://x.com/s", "a=1"), "https://x.com/s?a=1");
        assert_eq!(append_query("https://x.com/s", ""), "https://x.com/s");
    }
}
