use reqwest::{Client, Response, StatusCode};
use tracing::debug;

use crate::core::{Product, ProductDraft, ProductId};
use crate::error::{ChartError, ChartResult};

use super::{EntityStore, HttpStoreConfig, StoreError, StoreOperation, StoreResult, wire};

/// Product store backed by the REST product service.
///
/// Requests are sent once; there are no timeouts or retries.
#[derive(Debug, Clone)]
pub struct HttpEntityStore {
    client: Client,
    config: HttpStoreConfig,
}

impl HttpEntityStore {
    pub fn new(config: HttpStoreConfig) -> ChartResult<Self> {
        config.validate()?;
        let client = Client::builder()
            .build()
            .map_err(|e| ChartError::InvalidData(format!("reqwest client error: {e}")))?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn with_client(client: Client, config: HttpStoreConfig) -> Self {
        Self { client, config }
    }

    #[must_use]
    pub fn config(&self) -> &HttpStoreConfig {
        &self.config
    }

    async fn read_body(
        operation: StoreOperation,
        id: Option<&ProductId>,
        response: Response,
    ) -> StoreResult<String> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(StoreError::NotFound { id: id.clone() });
            }
        }
        if !status.is_success() {
            return Err(StoreError::Status {
                operation,
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(|e| transport(operation, e))
    }
}

fn transport(operation: StoreOperation, err: reqwest::Error) -> StoreError {
    StoreError::Transport {
        operation,
        message: err.to_string(),
    }
}

impl EntityStore for HttpEntityStore {
    async fn list(&self) -> StoreResult<Vec<Product>> {
        let operation = StoreOperation::List;
        let url = self.config.collection_url();
        debug!(%url, "fetching products");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport(operation, e))?;
        let body = Self::read_body(operation, None, response).await?;
        wire::decode_list(&body)
    }

    async fn get(&self, id: &ProductId) -> StoreResult<Product> {
        let operation = StoreOperation::Get;
        let response = self
            .client
            .get(self.config.item_url(id))
            .send()
            .await
            .map_err(|e| transport(operation, e))?;
        let body = Self::read_body(operation, Some(id), response).await?;
        wire::decode_one(operation, &body, Some(id))
    }

    async fn create(&self, draft: &ProductDraft) -> StoreResult<Product> {
        let operation = StoreOperation::Create;
        let response = self
            .client
            .post(self.config.collection_url())
            .json(draft)
            .send()
            .await
            .map_err(|e| transport(operation, e))?;
        let body = Self::read_body(operation, None, response).await?;
        wire::decode_one(operation, &body, None)
    }

    async fn update(&self, id: &ProductId, draft: &ProductDraft) -> StoreResult<()> {
        let operation = StoreOperation::Update;
        let response = self
            .client
            .put(self.config.item_url(id))
            .json(draft)
            .send()
            .await
            .map_err(|e| transport(operation, e))?;
        Self::read_body(operation, Some(id), response).await?;
        Ok(())
    }

    async fn delete(&self, id: &ProductId) -> StoreResult<()> {
        let operation = StoreOperation::Delete;
        let response = self
            .client
            .delete(self.config.item_url(id))
            .send()
            .await
            .map_err(|e| transport(operation, e))?;
        Self::read_body(operation, Some(id), response).await?;
        Ok(())
    }
}
