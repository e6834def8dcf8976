//! Exclusive view state (idle / loading / error / result) and its transitions.
//!
//! The controller is the only writer of [`ViewState`]. Every transition is a
//! method; the UI reads the state back through [`ViewStateController::region`]
//! and [`ViewStateController::banner`] and never mutates it directly.

use std::time::{Duration, Instant};

use crate::backend_bridge::commands::{BackendCommand, RequestId};
use crate::controller::events::{Severity, UiError, UiErrorContext};
use crate::render::OrderView;

/// Delay between a successful create and the confirming lookup of the new order.
pub const REFETCH_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

impl From<&UiError> for Notice {
    fn from(err: &UiError) -> Self {
        Self {
            message: err.message().to_string(),
            severity: err.severity(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Loading,
    Error(Notice),
    Result(Box<OrderView>),
}

/// The single UI region a state makes visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    None,
    Loading,
    Error,
    Result,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingRefetch {
    order_id: String,
    due: Instant,
}

#[derive(Debug)]
pub struct ViewStateController {
    state: ViewState,
    overlay: Option<Notice>,
    next_request: u64,
    latest_request: Option<RequestId>,
    pending_refetch: Option<PendingRefetch>,
}

impl Default for ViewStateController {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewStateController {
    pub fn new() -> Self {
        Self {
            state: ViewState::Idle,
            overlay: None,
            next_request: 1,
            latest_request: None,
            pending_refetch: None,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn region(&self) -> Region {
        match self.state {
            ViewState::Idle => Region::None,
            ViewState::Loading => Region::Loading,
            ViewState::Error(_) => Region::Error,
            ViewState::Result(_) => Region::Result,
        }
    }

    /// Message for the banner area: the newest overlay, else the error state's notice.
    pub fn banner(&self) -> Option<&Notice> {
        match (&self.overlay, &self.state) {
            (Some(notice), _) => Some(notice),
            (None, ViewState::Error(notice)) => Some(notice),
            (None, _) => None,
        }
    }

    /// The rendered order while the result region is active.
    pub fn result(&self) -> Option<&OrderView> {
        match &self.state {
            ViewState::Result(view) => Some(view),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading)
    }

    pub fn dismiss_banner(&mut self) {
        self.overlay = None;
        if matches!(self.state, ViewState::Error(_)) {
            self.state = ViewState::Idle;
        }
    }

    pub fn begin_lookup(&mut self, input: &str) -> Result<BackendCommand, UiError> {
        let order_id = input.trim();
        if order_id.is_empty() {
            return Err(self.reject_input(UiError::validation(
                UiErrorContext::Lookup,
                "Please enter an order ID",
            )));
        }

        let request = self.enter_loading();
        tracing::debug!(%request, order_id, "lookup submitted");
        Ok(BackendCommand::LookupOrder {
            request,
            order_id: order_id.to_string(),
        })
    }

    pub fn begin_create(&mut self, input: &str) -> Result<BackendCommand, UiError> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(self.reject_input(UiError::validation(
                UiErrorContext::Create,
                "Please enter order data as JSON",
            )));
        }

        let payload: serde_json::Value = match serde_json::from_str(raw) {
            Ok(payload) => payload,
            Err(err) => {
                return Err(self.reject_input(UiError::validation(
                    UiErrorContext::Create,
                    format!("Invalid JSON format: {err}"),
                )));
            }
        };

        let request = self.enter_loading();
        tracing::debug!(%request, "create submitted");
        Ok(BackendCommand::CreateOrder { request, payload })
    }

    pub fn show_order(&mut self, request: RequestId, view: Box<OrderView>) {
        self.note_arrival(request);
        self.state = ViewState::Result(view);
    }

    /// A create succeeded: confirm it and schedule the re-lookup of the new id.
    pub fn order_created(&mut self, request: RequestId, order_id: String, now: Instant) {
        self.note_arrival(request);
        self.state = ViewState::Idle;
        self.overlay = Some(Notice {
            message: format!("Order created successfully! ID: {order_id}"),
            severity: Severity::Success,
        });
        self.pending_refetch = Some(PendingRefetch {
            order_id,
            due: now + REFETCH_DELAY,
        });
    }

    pub fn request_failed(&mut self, request: RequestId, err: &UiError) {
        self.note_arrival(request);
        self.fail(err);
    }

    /// Failure not tied to a request (clipboard, queue dispatch).
    pub fn fail(&mut self, err: &UiError) {
        tracing::warn!(
            category = ?err.category(),
            context = ?err.context(),
            "{}",
            err.message()
        );
        self.overlay = None;
        self.state = ViewState::Error(Notice::from(err));
    }

    /// Returns the id to look up once the post-create delay has elapsed.
    pub fn take_due_refetch(&mut self, now: Instant) -> Option<String> {
        match &self.pending_refetch {
            Some(pending) if pending.due <= now => {
                self.pending_refetch.take().map(|pending| pending.order_id)
            }
            _ => None,
        }
    }

    pub fn refetch_due_at(&self) -> Option<Instant> {
        self.pending_refetch.as_ref().map(|pending| pending.due)
    }

    fn reject_input(&mut self, err: UiError) -> UiError {
        tracing::debug!(context = ?err.context(), "rejected input: {}", err.message());
        self.overlay = Some(Notice::from(&err));
        err
    }

    fn enter_loading(&mut self) -> RequestId {
        let request = RequestId(self.next_request);
        self.next_request += 1;
        self.latest_request = Some(request);
        self.overlay = None;
        self.state = ViewState::Loading;
        request
    }

    fn note_arrival(&self, request: RequestId) {
        if let Some(latest) = self.latest_request {
            if request < latest {
                tracing::debug!(
                    %request,
                    %latest,
                    "late response arrived after a newer submission; applying it anyway"
                );
            }
        }
    }
}
