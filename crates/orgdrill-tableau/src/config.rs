//! Server connection settings

use std::time::Duration;

use crate::error::{Result, TableauError};

/// Where and how to reach the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Scheme and host, without a trailing slash, e.g. `https://tableau.example.com`
    pub base_url: String,
    /// REST API version; negotiated with the server when `None`
    pub api_version: Option<String>,
    /// Site content URL used at sign-in; empty for the default site
    pub site_content_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Workbooks requested per page
    pub page_size: u32,
}

impl ServerConfig {
    /// Build a config from a server name or URL.
    ///
    /// A bare host name gets an `https://` scheme.
    pub fn new(server: &str) -> Result<Self> {
        let trimmed = server.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(TableauError::InvalidConfig("server URL is empty".into()));
        }

        let base_url = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("https://{}", trimmed)
        };

        reqwest::Url::parse(&base_url).map_err(|e| {
            TableauError::InvalidConfig(format!("invalid server URL '{}': {}", base_url, e))
        })?;

        Ok(Self {
            base_url,
            api_version: None,
            site_content_url: String::new(),
            timeout: Duration::from_secs(30),
            page_size: 100,
        })
    }

    /// Pin the REST API version instead of asking the server
    pub fn with_api_version(mut self, version: &str) -> Result<Self> {
        validate_api_version(version)?;
        self.api_version = Some(version.to_string());
        Ok(self)
    }

    /// Set the site content URL
    pub fn with_site(mut self, content_url: &str) -> Self {
        self.site_content_url = content_url.to_string();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the page size used when listing workbooks
    pub fn with_page_size(mut self, page_size: u32) -> Result<Self> {
        if page_size == 0 || page_size > 1000 {
            return Err(TableauError::InvalidConfig(format!(
                "page size must be between 1 and 1000, got {}",
                page_size
            )));
        }
        self.page_size = page_size;
        Ok(self)
    }

    /// `{base}/api/{version}`
    pub fn api_url(&self, version: &str) -> String {
        format!("{}/api/{}", self.base_url, version)
    }

    /// `{base}/api/metadata/graphql`
    pub fn metadata_url(&self) -> String {
        format!("{}/api/metadata/graphql", self.base_url)
    }
}

/// Check a REST API version string such as `3.23`
pub fn validate_api_version(version: &str) -> Result<()> {
    if lazy_regex::regex_is_match!(r"^\d+\.\d+$", version) {
        Ok(())
    } else {
        Err(TableauError::InvalidConfig(format!(
            "API version must look like '3.23', got '{}'",
            version
        )))
    }
}
