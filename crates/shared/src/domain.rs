use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An order record as served by `GET /api/order`.
///
/// Everything except `order_id` is optional so that partial records still
/// decode; unknown top-level keys are kept in `extra` and written back out
/// unchanged when the record is serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Opaque and display-only; kept as raw JSON so an off-type value still decodes.
    pub client_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery: Option<Delivery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<Payment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Order {
    pub fn item_count(&self) -> usize {
        self.items.as_ref().map_or(0, Vec::len)
    }

    pub fn currency(&self) -> Option<&str> {
        self.payment
            .as_ref()
            .and_then(|payment| payment.currency.as_deref())
            .filter(|currency| !currency.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// Unix epoch seconds. Kept as raw JSON so a malformed value can still be displayed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_pay: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Raw JSON; see [`OrderItem::quantity_value`] for the numeric reading.
    pub quantity: Option<Value>,
}

impl OrderItem {
    /// Quantity as a number: JSON numbers and numeric strings, `None` otherwise.
    pub fn quantity_value(&self) -> Option<f64> {
        self.quantity.as_ref().and_then(numeric)
    }

    /// `price × quantity`, only when both are present.
    pub fn line_total(&self) -> Option<f64> {
        match (self.price, self.quantity_value()) {
            (Some(price), Some(quantity)) => Some(price * quantity),
            _ => None,
        }
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_partial_record_with_only_order_id() {
        let order: Order = serde_json::from_str(r#"{"order_id":"a1"}"#).expect("decode");
        assert_eq!(order.order_id, "a1");
        assert_eq!(order.item_count(), 0);
        assert!(order.delivery.is_none());
        assert!(order.currency().is_none());
    }

    #[test]
    fn rejects_record_without_order_id() {
        assert!(serde_json::from_str::<Order>(r#"{"client_id":1}"#).is_err());
    }

    #[test]
    fn keeps_unknown_top_level_keys_for_the_dump() {
        let order: Order =
            serde_json::from_str(r#"{"order_id":"a1","track_number":"WBIL"}"#).expect("decode");
        assert_eq!(order.extra.get("track_number"), Some(&Value::from("WBIL")));

        let written = serde_json::to_value(&order).expect("encode");
        assert_eq!(written["track_number"], "WBIL");
        assert!(written.get("payment").is_none());
    }

    #[test]
    fn line_total_needs_price_and_quantity() {
        let item = OrderItem {
            price: Some(12.5),
            quantity: Some(Value::from(3)),
            ..OrderItem::default()
        };
        assert_eq!(item.line_total(), Some(37.5));

        let no_price = OrderItem {
            quantity: Some(Value::from(3)),
            ..OrderItem::default()
        };
        assert_eq!(no_price.line_total(), None);
    }

    #[test]
    fn off_type_numeric_fields_still_decode() {
        let order: Order = serde_json::from_str(
            r#"{"order_id":"a1","client_id":"c-77","items":[
                {"product_id":"sku-1","price":10.0,"quantity":1.0},
                {"price":2.5,"quantity":"4"},
                {"price":2.5,"quantity":"many"}
            ]}"#,
        )
        .expect("decode");

        assert_eq!(order.client_id, Some(Value::from("c-77")));
        let items = order.items.expect("items");
        assert_eq!(items[0].product_id, Some(Value::from("sku-1")));
        assert_eq!(items[0].line_total(), Some(10.0));
        assert_eq!(items[1].line_total(), Some(10.0));
        assert_eq!(items[2].quantity_value(), None);
        assert_eq!(items[2].line_total(), None);
    }
}
