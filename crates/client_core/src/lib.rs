use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{
    domain::Order,
    protocol::{CreateOrderResponse, OrderQuery, ORDER_PATH},
};
use tracing::{debug, info, warn};
use url::Url;

pub mod error;

pub use error::OrderApiError;

/// The two order operations the desktop client needs.
///
/// Implementations are stateless per call, so the same handle may be driven
/// from several tasks at once.
#[async_trait]
pub trait OrderApi: Send + Sync {
    async fn fetch_order(&self, order_id: &str) -> Result<Order, OrderApiError>;
    async fn create_order(
        &self,
        payload: &serde_json::Value,
    ) -> Result<CreateOrderResponse, OrderApiError>;
}

#[derive(Debug, Clone)]
pub struct OrderApiClient {
    http: Client,
    order_url: Url,
}

impl OrderApiClient {
    pub fn new(base_url: &str) -> Result<Self, OrderApiError> {
        Self::with_http_client(Client::new(), base_url)
    }

    pub fn with_http_client(http: Client, base_url: &str) -> Result<Self, OrderApiError> {
        let order_url = order_url_for(base_url)?;
        Ok(Self { http, order_url })
    }

    pub fn order_url(&self) -> &Url {
        &self.order_url
    }
}

fn order_url_for(base_url: &str) -> Result<Url, OrderApiError> {
    let trimmed = base_url.trim();
    let invalid = |reason: String| OrderApiError::InvalidBaseUrl {
        url: trimmed.to_string(),
        reason,
    };

    let mut base = Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(invalid("base url must start with http:// or https://".to_string()));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(ORDER_PATH).map_err(|err| invalid(err.to_string()))
}

#[async_trait]
impl OrderApi for OrderApiClient {
    async fn fetch_order(&self, order_id: &str) -> Result<Order, OrderApiError> {
        let response = self
            .http
            .get(self.order_url.clone())
            .query(&OrderQuery {
                order_id: order_id.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            info!(order_id, "order lookup: not found");
            return Err(OrderApiError::NotFound {
                order_id: order_id.to_string(),
            });
        }
        if !status.is_success() {
            warn!(order_id, status = status.as_u16(), "order lookup: server error");
            return Err(OrderApiError::Server {
                status: status.as_u16(),
                body: None,
            });
        }

        let body = response.text().await?;
        let order: Order = serde_json::from_str(&body)
            .map_err(|err| OrderApiError::Decode(format!("order body: {err}")))?;
        debug!(order_id, items = order.item_count(), "order lookup: ok");
        Ok(order)
    }

    async fn create_order(
        &self,
        payload: &serde_json::Value,
    ) -> Result<CreateOrderResponse, OrderApiError> {
        let response = self
            .http
            .post(self.order_url.clone())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.ok();
            warn!(status = status.as_u16(), "order create: server rejected payload");
            return Err(OrderApiError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let created: CreateOrderResponse = serde_json::from_str(&body)
            .map_err(|err| OrderApiError::Decode(format!("create response: {err}")))?;
        info!(order_id = %created.order_id, "order create: ok");
        Ok(created)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
