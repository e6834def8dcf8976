//! Built-in sample order used for the quick-access list and the copy-to-clipboard action.

use crate::domain::Order;

pub const SAMPLE_ORDER_ID: &str = "test1234567890";

pub const SAMPLE_ORDER_JSON: &str = r#"{
  "order_id": "test1234567890",
  "client_id": 1234567890,
  "locale": "ru",
  "delivery": {
    "name": "Иван Иванов",
    "phone": "+71234567890",
    "email": "test@test.ru",
    "type": "PVZ",
    "city": "Saint-Petersburg",
    "address": "Turistskaya street, 10"
  },
  "payment": {
    "transaction_id": "payment_test4566435",
    "currency": "RUB",
    "provider": "OzonBank",
    "amount": 1791.00,
    "date_pay": 1756207484,
    "bank": "alpha"
  },
  "items": [
    {
      "product_id": 1136435021,
      "name": "T-shirt",
      "brand": "Ozon Russia",
      "price": 890.00,
      "size": "48",
      "quantity": 1
    },
    {
      "product_id": 1651699088,
      "name": "Grok the algorithms",
      "brand": "Peter Publishing House",
      "price": 901.00,
      "size": "",
      "quantity": 1
    }
  ],
  "date_created": "2025-08-26T14:24:44Z"
}"#;

pub fn sample_order() -> Result<Order, serde_json::Error> {
    serde_json::from_str(SAMPLE_ORDER_JSON)
}

/// The sample as the pretty-printed JSON handed to the clipboard.
pub fn sample_order_pretty() -> Result<String, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(SAMPLE_ORDER_JSON)?;
    serde_json::to_string_pretty(&value)
}
