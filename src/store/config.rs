use serde::{Deserialize, Serialize};

use crate::core::ProductId;
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";
pub const DEFAULT_RESOURCE_PATH: &str = "/api/products";

/// Location of the REST product service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpStoreConfig {
    pub base_url: String,
    pub resource_path: String,
}

impl Default for HttpStoreConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            resource_path: DEFAULT_RESOURCE_PATH.to_owned(),
        }
    }
}

impl HttpStoreConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_resource_path(mut self, resource_path: impl Into<String>) -> Self {
        self.resource_path = resource_path.into();
        self
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse store config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ChartError::InvalidData(
                "store base url must start with http:// or https://".to_owned(),
            ));
        }
        if !self.resource_path.starts_with('/') {
            return Err(ChartError::InvalidData(
                "store resource path must start with `/`".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn collection_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.resource_path.trim_end_matches('/')
        )
    }

    /// URL of one product; the id is percent-encoded as a single path segment.
    #[must_use]
    pub fn item_url(&self, id: &ProductId) -> String {
        format!(
            "{}/{}",
            self.collection_url(),
            urlencoding::encode(id.as_str())
        )
    }
}
