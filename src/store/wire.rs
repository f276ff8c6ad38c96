//! JSON payloads exchanged with the REST product service.
//!
//! Every response body is wrapped as `{ "data": ... }`. Single-product
//! responses may carry either an object or a one-element array.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::core::{Product, ProductId};

use super::{StoreError, StoreOperation, StoreResult};

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

fn decode_envelope<T: DeserializeOwned>(operation: StoreOperation, body: &str) -> StoreResult<T> {
    serde_json::from_str::<Envelope<T>>(body)
        .map(|envelope| envelope.data)
        .map_err(|e| StoreError::Decode {
            operation,
            message: e.to_string(),
        })
}

/// Decodes a `list` response.
pub fn decode_list(body: &str) -> StoreResult<Vec<Product>> {
    decode_envelope(StoreOperation::List, body)
}

/// Decodes a single-product response; an empty array means `id` does not exist.
pub fn decode_one(
    operation: StoreOperation,
    body: &str,
    id: Option<&ProductId>,
) -> StoreResult<Product> {
    match decode_envelope::<OneOrMany<Product>>(operation, body)? {
        OneOrMany::One(product) => Ok(product),
        OneOrMany::Many(products) => match (products.into_iter().next(), id) {
            (Some(product), _) => Ok(product),
            (None, Some(id)) => Err(StoreError::NotFound { id: id.clone() }),
            (None, None) => Err(StoreError::Decode {
                operation,
                message: "response carried no product".to_owned(),
            }),
        },
    }
}
