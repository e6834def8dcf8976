//! Startup preload of the quick-access sample list.
//!
//! The preload is a convenience: whatever goes wrong is logged and the list
//! falls back to the configured ids, never to the error banner.

use client_core::OrderApi;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleShortcuts {
    ids: Vec<String>,
    loaded: bool,
}

impl SampleShortcuts {
    pub fn pending(fallback: Vec<String>) -> Self {
        Self {
            ids: fallback,
            loaded: false,
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn replace(&mut self, ids: Vec<String>) {
        if !ids.is_empty() {
            self.ids = ids;
        }
        self.loaded = true;
    }
}

/// Looks each configured id up; returns the ids that resolved, or the
/// configured list itself when none did.
pub async fn preload_samples(api: &dyn OrderApi, order_ids: &[String]) -> Vec<String> {
    let mut found = Vec::new();
    for order_id in order_ids {
        match api.fetch_order(order_id).await {
            Ok(order) => found.push(order.order_id),
            Err(err) => tracing::info!(order_id = %order_id, "no sample order available: {err}"),
        }
    }

    if found.is_empty() {
        tracing::info!("sample preload found nothing; using configured ids");
        return order_ids.to_vec();
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::StubOrderApi;
    use shared::sample::SAMPLE_ORDER_ID;

    #[tokio::test]
    async fn preload_lists_ids_that_resolved() {
        let api = StubOrderApi::with_sample();
        let ids = vec![SAMPLE_ORDER_ID.to_string(), "missing".to_string()];

        let found = preload_samples(&api, &ids).await;

        assert_eq!(found, vec![SAMPLE_ORDER_ID.to_string()]);
    }

    #[tokio::test]
    async fn preload_falls_back_to_configured_ids_when_api_is_down() {
        let api = StubOrderApi::unreachable();
        let ids = vec![SAMPLE_ORDER_ID.to_string()];

        let found = preload_samples(&api, &ids).await;

        assert_eq!(found, ids);
    }

    #[test]
    fn empty_preload_result_keeps_existing_ids() {
        let mut shortcuts = SampleShortcuts::pending(vec![SAMPLE_ORDER_ID.to_string()]);
        assert!(!shortcuts.is_loaded());

        shortcuts.replace(Vec::new());

        assert!(shortcuts.is_loaded());
        assert_eq!(shortcuts.ids().to_vec(), vec![SAMPLE_ORDER_ID.to_string()]);
    }
}
