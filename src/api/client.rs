//! Async REST client for the inventory backend.

use std::future::Future;

use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::error::{status_message, ApiError};
use crate::config::ApiConfig;
use crate::models::{
    ActivityLog, AiDashboard, AnalyticsOverview, BatchRecord, Branch, InventoryItem,
    LowStockProduct, NewBatch, NewBranch, NewOrder, NewSupplier, Order, StockAdjustment,
    Supplier, SystemAlert, TopProduct,
};

/// The three snapshot fetches the notification bell depends on.
///
/// `ApiClient` is the production implementation; tests substitute canned or
/// delayed responses.
pub trait AlertBackend: Send + Sync {
    fn inventory(&self) -> impl Future<Output = Result<Vec<InventoryItem>, ApiError>> + Send;
    fn batches(&self) -> impl Future<Output = Result<Vec<BatchRecord>, ApiError>> + Send;
    fn system_alerts(&self) -> impl Future<Output = Result<Vec<SystemAlert>, ApiError>> + Send;
}

/// HTTP client bound to one backend base URL. Session cookies set by the
/// backend's login flow are kept for subsequent calls.
#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::Http(e.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ApiConfig::from_env())
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    // ----- Inventory -----

    pub async fn fetch_inventory(&self) -> Result<Vec<InventoryItem>, ApiError> {
        self.get_list("api/inventory").await
    }

    pub async fn delete_item(&self, name: &str) -> Result<(), ApiError> {
        let url = self.item_url(name, None)?;
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        check_status(response).await?;
        tracing::info!(item = %name, "Inventory item deleted");
        Ok(())
    }

    pub async fn adjust_stock(
        &self,
        name: &str,
        adjustment: &StockAdjustment,
    ) -> Result<Value, ApiError> {
        let url = self.item_url(name, Some("adjust"))?;
        let reply = self.post_json(url, adjustment).await?;
        tracing::info!(
            item = %name,
            branch = %adjustment.branch,
            delta = adjustment.delta,
            "Stock adjusted"
        );
        Ok(reply)
    }

    // ----- Branches -----

    pub async fn fetch_branches(&self) -> Result<Vec<Branch>, ApiError> {
        self.get_list("api/branches").await
    }

    pub async fn create_branch(&self, branch: &NewBranch) -> Result<Value, ApiError> {
        let url = self.url("api/branches")?;
        self.post_json(url, branch).await
    }

    // ----- Alerts and batches -----

    pub async fn fetch_alerts(&self) -> Result<Vec<SystemAlert>, ApiError> {
        self.get_list("api/alerts").await
    }

    pub async fn fetch_batches(&self) -> Result<Vec<BatchRecord>, ApiError> {
        self.get_list("api/batches").await
    }

    pub async fn create_batch(&self, batch: &NewBatch) -> Result<Value, ApiError> {
        let url = self.url("api/batches")?;
        self.post_json(url, batch).await
    }

    // ----- Suppliers and orders -----

    pub async fn fetch_suppliers(&self) -> Result<Vec<Supplier>, ApiError> {
        self.get_list("api/suppliers").await
    }

    pub async fn create_supplier(&self, supplier: &NewSupplier) -> Result<Value, ApiError> {
        let url = self.url("api/suppliers")?;
        self.post_json(url, supplier).await
    }

    pub async fn fetch_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get_list("api/orders").await
    }

    pub async fn create_order(&self, order: &NewOrder) -> Result<Value, ApiError> {
        let url = self.url("api/orders")?;
        self.post_json(url, order).await
    }

    // ----- Logs, AI and analytics -----

    pub async fn fetch_logs(&self) -> Result<Vec<ActivityLog>, ApiError> {
        self.get_list("api/logs").await
    }

    pub async fn fetch_ai_dashboard(&self) -> Result<AiDashboard, ApiError> {
        self.get_one("api/ai/dashboard").await
    }

    pub async fn fetch_analytics_overview(&self) -> Result<AnalyticsOverview, ApiError> {
        self.get_one("analytics/overview").await
    }

    pub async fn fetch_analytics_low_stock(&self) -> Result<Vec<LowStockProduct>, ApiError> {
        self.get_list("analytics/low-stock").await
    }

    pub async fn fetch_top_products(&self) -> Result<Vec<TopProduct>, ApiError> {
        self.get_list("analytics/top-products").await
    }

    // ----- Session -----

    /// Asks the backend to clear the session. The caller redirects to login
    /// whatever the outcome.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let url = self.url("api/logout")?;
        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        check_status(response).await?;
        Ok(())
    }

    // ----- Plumbing -----

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        let raw = self.config.endpoint(path);
        Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))
    }

    /// `api/inventory/{name}[/{suffix}]` with `name` percent-encoded as one
    /// path segment.
    fn item_url(&self, name: &str, suffix: Option<&str>) -> Result<Url, ApiError> {
        let mut url = self.url("api/inventory")?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(self.config.base_url.clone()))?;
            segments.pop_if_empty().push(name);
            if let Some(suffix) = suffix {
                segments.push(suffix);
            }
        }
        Ok(url)
    }

    fn transport_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_connect() {
            ApiError::Connection(self.config.base_url.clone())
        } else if e.is_timeout() {
            ApiError::Timeout(self.config.timeout.as_secs())
        } else {
            ApiError::Http(e.to_string())
        }
    }

    async fn get_value(&self, path: &str) -> Result<Value, ApiError> {
        let url = self.url(path)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = check_status(response).await?;
        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(self.config.timeout.as_secs())
            } else {
                ApiError::Decode(e.to_string())
            }
        })
    }

    /// Fetches a JSON array, keeping every element that decodes.
    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let value = self.get_value(path).await?;
        Ok(decode_list(path, value))
    }

    async fn get_one<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let value = self.get_value(path).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Posts `body` and returns the reply as JSON (`Null` when the reply is
    /// empty or not JSON).
    async fn post_json<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<Value, ApiError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = check_status(response).await?;
        let text = response.text().await.map_err(|e| self.transport_error(e))?;
        Ok(serde_json::from_str(&text).unwrap_or(Value::Null))
    }
}

impl AlertBackend for ApiClient {
    async fn inventory(&self) -> Result<Vec<InventoryItem>, ApiError> {
        self.fetch_inventory().await
    }

    async fn batches(&self) -> Result<Vec<BatchRecord>, ApiError> {
        self.fetch_batches().await
    }

    async fn system_alerts(&self) -> Result<Vec<SystemAlert>, ApiError> {
        self.fetch_alerts().await
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        message: status_message(&body),
    })
}

/// Element-wise decode. A non-array body yields an empty list.
fn decode_list<T: DeserializeOwned>(path: &str, value: Value) -> Vec<T> {
    let Value::Array(elements) = value else {
        tracing::warn!(path, "Expected a JSON array, treating as empty");
        return Vec::new();
    };

    let total = elements.len();
    let decoded: Vec<T> = elements
        .into_iter()
        .filter_map(|element| match serde_json::from_value(element) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::debug!(path, error = %e, "Skipping undecodable element");
                None
            }
        })
        .collect();

    if decoded.len() < total {
        tracing::debug!(path, total, kept = decoded.len(), "Partial snapshot decode");
    }
    decoded
}
