use serde::Deserialize;

/// Endpoints of every supported connector, keyed by connector name.
#[derive(Clone, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct Connectors {
    pub decidir: ConnectorParams,
    pub jetpayv2: ConnectorParams,
}

impl Default for Connectors {
    fn default() -> Self {
        Self {
            decidir: ConnectorParams::new(
                "https://live.decidir.com/api/v2",
                "https://developers.decidir.com/api/v2",
            ),
            jetpayv2: ConnectorParams::new(
                "https://gateway20.jetpay.com/jetpay",
                "https://test1.jetpay.com/jetpay",
            ),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct ConnectorParams {
    /// base url of the live environment
    pub base_url: String,
    /// base url of the sandbox environment
    pub test_base_url: String,
}

impl ConnectorParams {
    pub fn new(base_url: impl Into<String>, test_base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            test_base_url: test_base_url.into(),
        }
    }

    pub fn get_base_url(&self, test_mode: bool) -> &str {
        if test_mode {
            &self.test_base_url
        } else {
            &self.base_url
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct Proxy {
    pub http_url: Option<String>,
    pub https_url: Option<String>,
    pub idle_pool_connection_timeout: Option<u64>,
    pub bypass_proxy_urls: Vec<String>,
}

impl Proxy {
    pub fn is_configured(&self) -> bool {
        self.http_url.is_some() || self.https_url.is_some()
    }

    pub fn should_bypass(&self, url: &str) -> bool {
        self.bypass_proxy_urls
            .iter()
            .any(|prefix| url.starts_with(prefix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn base_url_follows_test_mode() {
        let connectors = Connectors::default();
        assert_eq!(
            connectors.decidir.get_base_url(true),
            "https://developers.decidir.com/api/v2"
        );
        assert_eq!(
            connectors.jetpayv2.get_base_url(false),
            "https://gateway20.jetpay.com/jetpay"
        );
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let connectors: Connectors = serde_json::from_value(serde_json::json!({
            "decidir": { "base_url": "http://a", "test_base_url": "http://b" }
        }))
        .unwrap();
        assert_eq!(connectors.decidir.get_base_url(true), "http://b");
        assert_eq!(
            connectors.jetpayv2.get_base_url(true),
            "https://test1.jetpay.com/jetpay"
        );
    }

    #[test]
    fn bypass_matches_url_prefix() {
        let proxy = Proxy {
            https_url: Some("https://proxy:3128".to_string()),
            bypass_proxy_urls: vec!["http://localhost".to_string()],
            ..Default::default()
        };
        assert!(proxy.is_configured());
        assert!(proxy.should_bypass("http://localhost:8080/payments"));
        assert!(!proxy.should_bypass("https://test1.jetpay.com/jetpay"));
    }
}
