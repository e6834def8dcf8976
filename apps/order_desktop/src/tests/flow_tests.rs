use std::{
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

use crossbeam_channel::{bounded, Receiver, Sender};
use shared::sample::{sample_order, SAMPLE_ORDER_ID, SAMPLE_ORDER_JSON};

use super::StubOrderApi;
use crate::backend_bridge::commands::BackendCommand;
use crate::backend_bridge::runtime::{execute, launch, Waker};
use crate::clipboard::{
    system_detector, ClipboardError, ClipboardExporter, StagedCopy, StagedId, StagingSurface,
};
use crate::config::Settings;
use crate::controller::events::{Severity, UiEvent};
use crate::controller::view_state::{Region, ViewState, REFETCH_DELAY};
use crate::render::SectionKind;
use crate::ui::app::OrderDeskApp;
use crate::ui::staging::EguiStaging;

struct Harness {
    app: OrderDeskApp,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
}

fn test_settings() -> Settings {
    Settings {
        system_clipboard: false,
        ..Settings::default()
    }
}

fn harness() -> Harness {
    let (cmd_tx, cmd_rx) = bounded(16);
    let (ui_tx, ui_rx) = bounded(16);
    let app = OrderDeskApp::new(cmd_tx, ui_rx, &test_settings(), egui::Context::default());
    Harness { app, cmd_rx, ui_tx }
}

impl Harness {
    /// Runs the next queued command against `api` and applies its event.
    async fn answer_next(&mut self, api: &StubOrderApi, now: Instant) {
        let cmd = self.cmd_rx.try_recv().expect("queued command");
        let event = execute(api, cmd).await;
        self.ui_tx.send(event).expect("event queue open");
        self.app.process_ui_events(now);
    }
}

#[tokio::test]
async fn missing_order_shows_not_found_and_never_a_result() {
    let api = StubOrderApi::with_sample();
    let mut h = harness();

    h.app.set_lookup_input("  does-not-exist ");
    assert!(h.app.submit_lookup());
    assert_eq!(h.app.controller().region(), Region::Loading);
    h.answer_next(&api, Instant::now()).await;

    assert_eq!(h.app.controller().region(), Region::Error);
    let banner = h.app.controller().banner().expect("banner");
    assert_eq!(banner.message, "Order not found");
    assert_eq!(banner.severity, Severity::Warning);
    assert!(h.app.controller().result().is_none());
}

#[tokio::test]
async fn sample_lookup_renders_customer_and_items() {
    let api = StubOrderApi::with_sample();
    let mut h = harness();

    h.app.set_lookup_input(SAMPLE_ORDER_ID);
    assert!(h.app.submit_lookup());
    h.answer_next(&api, Instant::now()).await;

    assert_eq!(h.app.controller().region(), Region::Result);
    let view = h.app.controller().result().expect("rendered view");
    let summary = view.section(SectionKind::Summary).expect("summary");
    assert_eq!(summary.value("Client ID"), Some("1234567890"));
    let delivery = view.section(SectionKind::Delivery).expect("delivery");
    assert_eq!(delivery.value("Recipient"), Some("Иван Иванов"));

    let rows = view.items.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].total, "901.00 RUB");
}

#[tokio::test]
async fn created_order_is_looked_up_after_the_refetch_delay() {
    let api = StubOrderApi::empty();
    let mut h = harness();
    let payload = SAMPLE_ORDER_JSON.replace(SAMPLE_ORDER_ID, "created-42");

    h.app.set_create_input(payload);
    assert!(h.app.submit_create());
    let created_at = Instant::now();
    h.answer_next(&api, created_at).await;

    assert_eq!(h.app.controller().state(), &ViewState::Idle);
    let banner = h.app.controller().banner().expect("confirmation");
    assert_eq!(banner.message, "Order created successfully! ID: created-42");
    assert_eq!(banner.severity, Severity::Success);
    assert_eq!(h.app.lookup_input(), "created-42");

    h.app.process_ui_events(created_at + Duration::from_millis(100));
    assert!(h.cmd_rx.try_recv().is_err(), "refetch must wait for the delay");

    let due = created_at + REFETCH_DELAY;
    h.app.process_ui_events(due);
    h.answer_next(&api, due).await;

    match h.app.controller().state() {
        ViewState::Result(view) => assert_eq!(view.order_id, "created-42"),
        other => panic!("expected result, got {other:?}"),
    }
    assert_eq!(api.create_count(), 1);
    assert_eq!(api.fetch_count(), 1);
}

#[tokio::test]
async fn create_failure_surfaces_error_state() {
    let api = StubOrderApi::unreachable();
    let mut h = harness();

    h.app.set_create_input(SAMPLE_ORDER_JSON);
    assert!(h.app.submit_create());
    h.answer_next(&api, Instant::now()).await;

    assert_eq!(h.app.controller().region(), Region::Error);
    let banner = h.app.controller().banner().expect("banner");
    assert!(banner.message.starts_with("Failed to create order"));
}

#[test]
fn invalid_json_never_reaches_the_api() {
    let mut h = harness();

    h.app.set_create_input("{\"order_id\": ");
    assert!(!h.app.submit_create());

    assert!(h.cmd_rx.try_recv().is_err());
    let banner = h.app.controller().banner().expect("validation notice");
    assert!(banner.message.starts_with("Invalid JSON format"));
    assert_eq!(h.app.controller().region(), Region::None);
}

#[test]
fn bootstrap_queues_sample_preload() {
    let (cmd_tx, cmd_rx) = bounded(4);
    let (_ui_tx, ui_rx) = bounded::<UiEvent>(4);
    let settings = test_settings();

    let app = OrderDeskApp::bootstrap(cmd_tx, ui_rx, &settings, egui::Context::default());

    assert_eq!(
        cmd_rx.try_recv().expect("preload queued"),
        BackendCommand::PreloadSamples {
            order_ids: vec![SAMPLE_ORDER_ID.to_string()],
        }
    );
    assert!(!app.shortcuts().is_loaded());
}

#[tokio::test]
async fn unreachable_preload_keeps_configured_shortcuts_without_banner() {
    let api = StubOrderApi::unreachable();
    let mut h = harness();

    let event = execute(
        &api,
        BackendCommand::PreloadSamples {
            order_ids: vec![SAMPLE_ORDER_ID.to_string()],
        },
    )
    .await;
    h.ui_tx.send(event).expect("event queue open");
    h.app.process_ui_events(Instant::now());

    assert!(h.app.shortcuts().is_loaded());
    assert_eq!(h.app.shortcuts().ids().to_vec(), vec![SAMPLE_ORDER_ID.to_string()]);
    assert!(h.app.controller().banner().is_none());
    assert_eq!(h.app.controller().region(), Region::None);
}

#[test]
fn export_without_system_clipboard_uses_staged_copy() {
    let mut h = harness();

    h.app.export_sample(Instant::now());

    assert_eq!(h.app.controller().region(), Region::None);
    assert!(h.app.controller().banner().is_none());
    assert_eq!(h.app.staged_entries(), 0);
}

/// Staging surface whose copy command always fails.
struct RejectingStaging(EguiStaging);

impl StagingSurface for RejectingStaging {
    fn attach_hidden(&mut self, text: &str) -> StagedId {
        self.0.attach_hidden(text)
    }

    fn select(&mut self, id: StagedId) {
        self.0.select(id);
    }

    fn copy_selection(&mut self) -> Result<(), ClipboardError> {
        Err(ClipboardError::CopyCommand("copy command rejected".to_string()))
    }

    fn detach(&mut self, id: StagedId) {
        self.0.detach(id);
    }

    fn staged_count(&self) -> usize {
        self.0.staged_count()
    }
}

#[test]
fn failed_export_reports_error_and_leaves_no_staged_entries() {
    let (cmd_tx, _cmd_rx) = bounded(4);
    let (_ui_tx, ui_rx) = bounded::<UiEvent>(4);
    let exporter = ClipboardExporter::new(
        system_detector(false),
        Box::new(StagedCopy::new(RejectingStaging(EguiStaging::new(
            egui::Context::default(),
        )))),
    );
    let mut app = OrderDeskApp::with_exporter(cmd_tx, ui_rx, &test_settings(), exporter);

    app.export_sample(Instant::now());

    assert_eq!(app.controller().region(), Region::Error);
    let banner = app.controller().banner().expect("banner");
    assert_eq!(banner.message, "Failed to copy JSON");
    assert_eq!(app.staged_entries(), 0);
}

#[test]
fn overlapping_lookups_settle_on_the_last_arrival() {
    let mut fast = sample_order().expect("sample");
    fast.order_id = "fast-1".to_string();
    let api = StubOrderApi::with_sample()
        .with_order(fast)
        .with_delay(SAMPLE_ORDER_ID, Duration::from_millis(250))
        .with_delay("fast-1", Duration::from_millis(10));

    let (cmd_tx, cmd_rx) = bounded(16);
    let (ui_tx, ui_rx) = bounded(16);
    let waker: Waker = Arc::new(|| {});
    let worker = launch(Arc::new(api), cmd_rx, ui_tx, waker).expect("backend thread");
    let mut app = OrderDeskApp::new(cmd_tx, ui_rx, &test_settings(), egui::Context::default());

    app.set_lookup_input(SAMPLE_ORDER_ID);
    assert!(app.submit_lookup());
    app.set_lookup_input("fast-1");
    assert!(app.submit_lookup());

    let deadline = Instant::now() + Duration::from_secs(5);
    let mut applied = 0;
    while applied < 2 && Instant::now() < deadline {
        applied += app.process_ui_events(Instant::now());
        thread::sleep(Duration::from_millis(10));
    }
    assert_eq!(applied, 2);

    match app.controller().state() {
        ViewState::Result(view) => assert_eq!(view.order_id, SAMPLE_ORDER_ID),
        other => panic!("expected result, got {other:?}"),
    }

    drop(app);
    worker.join().expect("backend thread exits once the queue closes");
}
