//! In-process order API double shared by the desktop tests.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use client_core::{OrderApi, OrderApiError};
use shared::{domain::Order, protocol::CreateOrderResponse, sample::sample_order};

mod flow_tests;

pub(crate) struct StubOrderApi {
    orders: Mutex<HashMap<String, Order>>,
    delays: HashMap<String, Duration>,
    failure_status: Option<u16>,
    fetches: AtomicUsize,
    creates: AtomicUsize,
}

impl StubOrderApi {
    pub(crate) fn empty() -> Self {
        Self {
            orders: Mutex::new(HashMap::new()),
            delays: HashMap::new(),
            failure_status: None,
            fetches: AtomicUsize::new(0),
            creates: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_sample() -> Self {
        Self::empty().with_order(sample_order().expect("sample order"))
    }

    /// Every call fails as a gateway error would.
    pub(crate) fn unreachable() -> Self {
        Self {
            failure_status: Some(502),
            ..Self::empty()
        }
    }

    pub(crate) fn with_order(self, order: Order) -> Self {
        self.orders
            .lock()
            .expect("orders lock")
            .insert(order.order_id.clone(), order);
        self
    }

    pub(crate) fn with_delay(mut self, order_id: &str, delay: Duration) -> Self {
        self.delays.insert(order_id.to_string(), delay);
        self
    }

    pub(crate) fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub(crate) fn create_count(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrderApi for StubOrderApi {
    async fn fetch_order(&self, order_id: &str) -> Result<Order, OrderApiError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(order_id) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(status) = self.failure_status {
            return Err(OrderApiError::Server { status, body: None });
        }

        let found = self
            .orders
            .lock()
            .expect("orders lock")
            .get(order_id)
            .cloned();
        found.ok_or_else(|| OrderApiError::NotFound {
            order_id: order_id.to_string(),
        })
    }

    async fn create_order(
        &self,
        payload: &serde_json::Value,
    ) -> Result<CreateOrderResponse, OrderApiError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.failure_status {
            return Err(OrderApiError::Server { status, body: None });
        }

        let order: Order = serde_json::from_value(payload.clone()).map_err(|err| {
            OrderApiError::Server {
                status: 400,
                body: Some(format!("invalid order: {err}")),
            }
        })?;
        let order_id = order.order_id.clone();
        self.orders
            .lock()
            .expect("orders lock")
            .insert(order_id.clone(), order);

        Ok(CreateOrderResponse {
            order_id,
            status: Some("created".to_string()),
        })
    }
}
