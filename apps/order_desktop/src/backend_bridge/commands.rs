//! Backend commands queued from UI to backend worker.

use std::fmt;

/// Sequence number stamped on every lookup/create submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    LookupOrder {
        request: RequestId,
        order_id: String,
    },
    CreateOrder {
        request: RequestId,
        payload: serde_json::Value,
    },
    PreloadSamples {
        order_ids: Vec<String>,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LookupOrder { .. } => "lookup_order",
            Self::CreateOrder { .. } => "create_order",
            Self::PreloadSamples { .. } => "preload_samples",
        }
    }
}
