//! Pure projection of an [`Order`] into the declarative view the UI draws.
//!
//! Nothing here touches egui: the renderer turns a record into labelled
//! sections, an items table and a JSON dump, and the UI adapter in
//! `ui::order_view` paints whatever comes out. Missing values become empty
//! strings; nothing in a record can make rendering fail.

use chrono::{DateTime, FixedOffset, Local, Offset, Utc};
use serde_json::Value;
use shared::domain::{Delivery, Order, OrderItem, Payment};

pub const NO_ITEMS_PLACEHOLDER: &str = "No items found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Summary,
    Delivery,
    Payment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoField {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoSection {
    pub kind: SectionKind,
    pub title: &'static str,
    pub fields: Vec<InfoField>,
}

impl InfoSection {
    #[cfg(test)]
    pub fn value(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.label == label)
            .map(|field| field.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub name: String,
    pub brand: String,
    pub price: String,
    pub quantity: String,
    pub size: String,
    pub total: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemsBody {
    Table(Vec<ItemRow>),
    Placeholder(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemsSection {
    pub count: usize,
    pub body: ItemsBody,
}

impl ItemsSection {
    pub const COLUMNS: [&'static str; 6] = ["Name", "Brand", "Price", "Quantity", "Size", "Total"];

    pub fn heading(&self) -> String {
        format!("Items ({})", self.count)
    }

    #[cfg(test)]
    pub fn rows(&self) -> &[ItemRow] {
        match &self.body {
            ItemsBody::Table(rows) => rows,
            ItemsBody::Placeholder(_) => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderView {
    pub order_id: String,
    pub sections: Vec<InfoSection>,
    pub items: ItemsSection,
    pub raw_json: String,
}

impl OrderView {
    #[cfg(test)]
    pub fn section(&self, kind: SectionKind) -> Option<&InfoSection> {
        self.sections.iter().find(|section| section.kind == kind)
    }
}

/// Renders orders with timestamps shown in a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct OrderRenderer {
    offset: FixedOffset,
}

impl OrderRenderer {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Uses the machine's current local offset.
    pub fn local() -> Self {
        Self::new(Local::now().offset().fix())
    }

    pub fn render(&self, order: &Order) -> OrderView {
        let locale = order.locale.as_deref().unwrap_or_default();
        let currency = order.currency();

        OrderView {
            order_id: order.order_id.clone(),
            sections: vec![
                self.summary_section(order, locale),
                delivery_section(order.delivery.as_ref()),
                self.payment_section(order.payment.as_ref(), locale),
            ],
            items: items_section(order.items.as_deref(), currency),
            raw_json: dump_json(order),
        }
    }

    fn summary_section(&self, order: &Order, locale: &str) -> InfoSection {
        InfoSection {
            kind: SectionKind::Summary,
            title: "Summary",
            fields: vec![
                field("Order ID", order.order_id.clone()),
                field("Client ID", raw_opt(order.client_id.as_ref())),
                field("Locale", text(&order.locale)),
                field(
                    "Created",
                    order
                        .date_created
                        .as_deref()
                        .map(|raw| self.format_iso_timestamp(raw, locale))
                        .unwrap_or_default(),
                ),
            ],
        }
    }

    fn payment_section(&self, payment: Option<&Payment>, locale: &str) -> InfoSection {
        let empty = Payment::default();
        let payment = payment.unwrap_or(&empty);
        let currency = payment.currency.as_deref().filter(|c| !c.is_empty());

        InfoSection {
            kind: SectionKind::Payment,
            title: "Payment",
            fields: vec![
                field(
                    "Amount",
                    payment
                        .amount
                        .map(|amount| format_money(amount, currency))
                        .unwrap_or_default(),
                ),
                field("Transaction", text(&payment.transaction_id)),
                field("Provider", text(&payment.provider)),
                field("Bank", text(&payment.bank)),
                field(
                    "Paid at",
                    payment
                        .date_pay
                        .as_ref()
                        .map(|raw| self.format_epoch(raw, locale))
                        .unwrap_or_default(),
                ),
            ],
        }
    }

    /// Epoch seconds to a local date/time string; anything unusable is shown as-is.
    pub fn format_epoch(&self, raw: &Value, locale: &str) -> String {
        let seconds = match raw {
            Value::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };

        match seconds.and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0)) {
            Some(utc) => self.format_datetime(utc, locale),
            None => verbatim(raw),
        }
    }

    pub fn format_iso_timestamp(&self, raw: &str, locale: &str) -> String {
        match DateTime::parse_from_rfc3339(raw.trim()) {
            Ok(parsed) => self.format_datetime(parsed.with_timezone(&Utc), locale),
            Err(_) => raw.to_string(),
        }
    }

    fn format_datetime(&self, utc: DateTime<Utc>, locale: &str) -> String {
        let local = utc.with_timezone(&self.offset);
        let pattern = if is_russian(locale) {
            "%d.%m.%Y, %H:%M:%S"
        } else {
            "%Y-%m-%d %H:%M:%S"
        };
        local.format(pattern).to_string()
    }
}

fn delivery_section(delivery: Option<&Delivery>) -> InfoSection {
    let empty = Delivery::default();
    let delivery = delivery.unwrap_or(&empty);
    let address = [delivery.city.as_deref(), delivery.address.as_deref()]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    InfoSection {
        kind: SectionKind::Delivery,
        title: "Delivery",
        fields: vec![
            field("Recipient", text(&delivery.name)),
            field("Phone", text(&delivery.phone)),
            field("Email", text(&delivery.email)),
            field("Delivery type", text(&delivery.kind)),
            field("Address", address),
        ],
    }
}

fn items_section(items: Option<&[OrderItem]>, currency: Option<&str>) -> ItemsSection {
    let items = items.unwrap_or_default();
    let body = if items.is_empty() {
        ItemsBody::Placeholder(NO_ITEMS_PLACEHOLDER)
    } else {
        ItemsBody::Table(items.iter().map(|item| item_row(item, currency)).collect())
    };

    ItemsSection {
        count: items.len(),
        body,
    }
}

fn item_row(item: &OrderItem, currency: Option<&str>) -> ItemRow {
    ItemRow {
        name: text(&item.name),
        brand: text(&item.brand),
        price: item
            .price
            .map(|price| format_money(price, currency))
            .unwrap_or_default(),
        quantity: raw_opt(item.quantity.as_ref()),
        size: text(&item.size),
        total: item
            .line_total()
            .map(|total| format_money(total, currency))
            .unwrap_or_default(),
    }
}

pub fn format_money(amount: f64, currency: Option<&str>) -> String {
    match currency {
        Some(currency) => format!("{amount:.2} {currency}"),
        None => format!("{amount:.2}"),
    }
}

fn dump_json(order: &Order) -> String {
    serde_json::to_string_pretty(order).unwrap_or_else(|err| {
        tracing::warn!(order_id = %order.order_id, "could not serialize order dump: {err}");
        String::new()
    })
}

fn verbatim(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn is_russian(locale: &str) -> bool {
    let lower = locale.to_ascii_lowercase();
    lower == "ru" || lower.starts_with("ru-") || lower.starts_with("ru_")
}

fn field(label: &'static str, value: String) -> InfoField {
    InfoField { label, value }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn raw_opt(value: Option<&Value>) -> String {
    value.map(verbatim).unwrap_or_default()
}
