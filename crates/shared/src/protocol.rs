use serde::{Deserialize, Serialize};

/// Path of the single order resource, relative to the API base URL.
pub const ORDER_PATH: &str = "api/order";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderQuery {
    pub order_id: String,
}

/// Success body of `POST /api/order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub order_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
