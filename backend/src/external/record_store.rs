//! Record store client
//!
//! Client for the remote persistence service holding authoritative Product
//! and Sale data. Expected remote errors (missing id, constraint violation)
//! never panic; every failure is normalized into a [`StoreError`].

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{Product, ProductDraft, Sale};
use thiserror::Error;

/// Failures of the remote record store, normalized across transport and
/// application layers
#[derive(Error, Debug)]
pub enum StoreError {
    /// The request ran out of time; the outcome is unknown
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The store answered with a definitive rejection
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The request never produced an answer
    #[error("transport failure: {0}")]
    Transport(String),

    /// The store answered with a body we could not decode
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl StoreError {
    /// Whether retrying the same request can reasonably succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Timeout(_) | StoreError::Transport(_))
    }
}

/// Partial product update pushed to the store
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

impl ProductUpdate {
    /// Update carrying only a new stock level
    pub fn stock(stock: i64) -> Self {
        Self {
            stock: Some(stock),
            ..Self::default()
        }
    }
}

/// Remote CRUD operations over Product and Sale records
///
/// The store holds no authoritative in-session state; it is a
/// synchronization target for the inventory state manager.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>, StoreError>;
    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, StoreError>;
    async fn update_product(&self, id: &str, update: &ProductUpdate)
        -> Result<Product, StoreError>;
    async fn delete_product(&self, id: &str) -> Result<u64, StoreError>;
    async fn fetch_sales(&self) -> Result<Vec<Sale>, StoreError>;
    async fn create_sale(&self, sale: &Sale) -> Result<(), StoreError>;
    async fn delete_sale(&self, id: &str) -> Result<u64, StoreError>;
    async fn delete_sales_for_product(&self, product_id: &str) -> Result<u64, StoreError>;
}

#[derive(Debug, Deserialize)]
struct ProductsEnvelope {
    products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct ProductEnvelope {
    product: Product,
}

#[derive(Debug, Deserialize)]
struct SalesEnvelope {
    sales: Vec<Sale>,
}

#[derive(Debug, Deserialize)]
struct DeletedEnvelope {
    deleted: u64,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: String,
}

/// Extract the store's error message from a rejection body, falling back to
/// the raw text
fn rejection_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| body.to_string())
}

fn transport_error(err: reqwest::Error) -> StoreError {
    if err.is_timeout() {
        StoreError::Timeout(err.to_string())
    } else {
        StoreError::Transport(err.to_string())
    }
}

/// HTTP client for the remote record store
#[derive(Clone)]
pub struct HttpRecordStore {
    base_url: String,
    api_key: Option<String>,
    http_client: Client,
}

impl HttpRecordStore {
    /// Create a new record store client with a bounded per-request timeout
    pub fn new(base_url: String, api_key: Option<String>, timeout: std::time::Duration) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            http_client,
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http_client.request(method, url);
        if let Some(key) = &self.api_key {
            builder = builder.header("x-api-key", key);
        }
        builder
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(StoreError::Rejected {
            status,
            message: rejection_message(&body),
        })
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn fetch_products(&self) -> Result<Vec<Product>, StoreError> {
        let response = self
            .request(reqwest::Method::GET, "/products")
            .send()
            .await
            .map_err(transport_error)?;
        let envelope: ProductsEnvelope = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(envelope.products)
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, StoreError> {
        let response = self
            .request(reqwest::Method::POST, "/products")
            .json(draft)
            .send()
            .await
            .map_err(transport_error)?;
        let envelope: ProductEnvelope = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(envelope.product)
    }

    async fn update_product(
        &self,
        id: &str,
        update: &ProductUpdate,
    ) -> Result<Product, StoreError> {
        let response = self
            .request(reqwest::Method::PATCH, "/products")
            .query(&[("id", id)])
            .json(update)
            .send()
            .await
            .map_err(transport_error)?;
        let envelope: ProductEnvelope = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(envelope.product)
    }

    async fn delete_product(&self, id: &str) -> Result<u64, StoreError> {
        let response = self
            .request(reqwest::Method::DELETE, "/products")
            .query(&[("id", id)])
            .send()
            .await
            .map_err(transport_error)?;
        let envelope: DeletedEnvelope = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(envelope.deleted)
    }

    async fn fetch_sales(&self) -> Result<Vec<Sale>, StoreError> {
        let response = self
            .request(reqwest::Method::GET, "/sales")
            .send()
            .await
            .map_err(transport_error)?;
        let envelope: SalesEnvelope = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(envelope.sales)
    }

    async fn create_sale(&self, sale: &Sale) -> Result<(), StoreError> {
        let response = self
            .request(reqwest::Method::POST, "/sales")
            .json(sale)
            .send()
            .await
            .map_err(transport_error)?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete_sale(&self, id: &str) -> Result<u64, StoreError> {
        let response = self
            .request(reqwest::Method::DELETE, "/sales")
            .query(&[("id", id)])
            .send()
            .await
            .map_err(transport_error)?;
        let envelope: DeletedEnvelope = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(envelope.deleted)
    }

    async fn delete_sales_for_product(&self, product_id: &str) -> Result<u64, StoreError> {
        let response = self
            .request(reqwest::Method::DELETE, "/sales")
            .query(&[("productId", product_id)])
            .send()
            .await
            .map_err(transport_error)?;
        let envelope: DeletedEnvelope = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(envelope.deleted)
    }
}
