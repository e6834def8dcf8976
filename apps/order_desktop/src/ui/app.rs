//! eframe application: wires widgets to the view-state controller and the
//! backend command queue.

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::bootstrap::SampleShortcuts;
use crate::clipboard::{system_detector, ClipboardExporter, StagedCopy};
use crate::config::Settings;
use crate::controller::events::{Severity, UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::{dispatch_backend_command, submit_create, submit_lookup};
use crate::controller::view_state::{Notice, Region, ViewStateController};
use crate::render::OrderRenderer;
use crate::ui::order_view::show_order_view;
use crate::ui::staging::EguiStaging;

const LOADING_REPAINT: Duration = Duration::from_millis(100);

pub struct OrderDeskApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: ViewStateController,
    renderer: OrderRenderer,
    exporter: ClipboardExporter,
    shortcuts: SampleShortcuts,
    api_base_url: String,
    lookup_input: String,
    create_input: String,
}

impl OrderDeskApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        settings: &Settings,
        egui_ctx: egui::Context,
    ) -> Self {
        let exporter = ClipboardExporter::new(
            system_detector(settings.system_clipboard),
            Box::new(StagedCopy::new(EguiStaging::new(egui_ctx))),
        );
        Self::with_exporter(cmd_tx, ui_rx, settings, exporter)
    }

    pub fn with_exporter(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        settings: &Settings,
        exporter: ClipboardExporter,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            controller: ViewStateController::new(),
            renderer: OrderRenderer::local(),
            exporter,
            shortcuts: SampleShortcuts::pending(settings.sample_order_ids.clone()),
            api_base_url: settings.api_base_url.clone(),
            lookup_input: String::new(),
            create_input: String::new(),
        }
    }

    /// Builds the app and queues the sample preload. A preload that cannot be
    /// queued only leaves the configured ids in place.
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        settings: &Settings,
        egui_ctx: egui::Context,
    ) -> Self {
        let app = Self::new(cmd_tx, ui_rx, settings, egui_ctx);
        let preload = BackendCommand::PreloadSamples {
            order_ids: settings.sample_order_ids.clone(),
        };
        if let Err(err) = dispatch_backend_command(&app.cmd_tx, preload, UiErrorContext::Lookup) {
            tracing::info!("sample preload not queued: {}", err.message());
        }
        app
    }

    pub fn submit_lookup(&mut self) -> bool {
        submit_lookup(&mut self.controller, &self.cmd_tx, &self.lookup_input)
    }

    pub fn submit_create(&mut self) -> bool {
        submit_create(&mut self.controller, &self.cmd_tx, &self.create_input)
    }

    pub fn export_sample(&mut self, now: Instant) {
        if let Err(err) = self.exporter.copy_sample(now) {
            self.controller.fail(&UiError::from_clipboard(&err));
        }
    }

    /// Drains backend events, then fires the post-create lookup once due.
    /// Returns the number of events applied.
    pub fn process_ui_events(&mut self, now: Instant) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.ui_rx.try_recv() {
            applied += 1;
            match event {
                UiEvent::OrderLoaded { request, order } => {
                    let view = self.renderer.render(&order);
                    self.controller.show_order(request, Box::new(view));
                }
                UiEvent::OrderCreated { request, order_id } => {
                    self.lookup_input = order_id.clone();
                    self.create_input.clear();
                    self.controller.order_created(request, order_id, now);
                }
                UiEvent::RequestFailed { request, error } => {
                    self.controller.request_failed(request, &error);
                }
                UiEvent::SamplesReady(ids) => {
                    tracing::debug!(count = ids.len(), "sample shortcuts ready");
                    self.shortcuts.replace(ids);
                }
            }
        }

        if let Some(order_id) = self.controller.take_due_refetch(now) {
            tracing::debug!(order_id = %order_id, "refetching created order");
            self.lookup_input = order_id;
            self.submit_lookup();
        }
        applied
    }

    fn show_top_bar(&mut self, ctx: &egui::Context, now: Instant) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Order Desk");
                ui.weak(self.api_base_url.as_str());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(self.exporter.button_label(now)).clicked() {
                        self.export_sample(now);
                    }
                });
            });
            ui.add_space(6.0);
        });
    }

    fn show_create_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("create_panel")
            .resizable(true)
            .default_width(380.0)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                ui.strong("Create order");
                ui.add(
                    egui::TextEdit::multiline(&mut self.create_input)
                        .code_editor()
                        .desired_rows(18)
                        .desired_width(f32::INFINITY)
                        .hint_text("{ \"order_id\": \"...\" }"),
                );
                if ui.button("Create order").clicked() {
                    self.submit_create();
                }

                ui.separator();
                ui.strong("Sample orders");
                if !self.shortcuts.is_loaded() {
                    ui.weak("Checking samples…");
                }
                let mut picked = None;
                for order_id in self.shortcuts.ids() {
                    if ui.link(order_id.as_str()).clicked() {
                        picked = Some(order_id.clone());
                    }
                }
                if let Some(order_id) = picked {
                    self.lookup_input = order_id;
                    self.submit_lookup();
                }
            });
    }

    fn show_lookup_row(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.lookup_input)
                    .hint_text("Order ID")
                    .desired_width(320.0),
            );
            let enter_pressed =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Find").clicked() || enter_pressed {
                self.submit_lookup();
            }
        });
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        let Some(notice) = self.controller.banner().cloned() else {
            return;
        };
        let (fill, stroke) = banner_colors(&notice);

        let mut dismissed = false;
        egui::Frame::NONE
            .fill(fill)
            .stroke(egui::Stroke::new(1.0, stroke))
            .corner_radius(egui::CornerRadius::same(8))
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(notice.message.as_str()).color(egui::Color32::WHITE));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        dismissed = ui.button("Dismiss").clicked();
                    });
                });
            });
        if dismissed {
            self.controller.dismiss_banner();
        }
    }

    fn show_region(&mut self, ui: &mut egui::Ui) {
        match self.controller.region() {
            Region::None | Region::Error => {}
            Region::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading…");
                });
            }
            Region::Result => {
                if let Some(view) = self.controller.result() {
                    egui::ScrollArea::vertical()
                        .id_salt("order_result")
                        .auto_shrink([false, false])
                        .show(ui, |ui| show_order_view(ui, view));
                }
            }
        }
    }

    fn schedule_repaint(&self, ctx: &egui::Context, now: Instant) {
        if self.controller.is_loading() {
            ctx.request_repaint_after(LOADING_REPAINT);
        }
        let deadlines = [
            self.controller.refetch_due_at(),
            self.exporter.confirmation_ends_at(),
        ];
        for deadline in deadlines.into_iter().flatten() {
            if deadline > now {
                ctx.request_repaint_after(deadline - now);
            }
        }
    }
}

#[cfg(test)]
impl OrderDeskApp {
    pub fn controller(&self) -> &ViewStateController {
        &self.controller
    }

    pub fn shortcuts(&self) -> &SampleShortcuts {
        &self.shortcuts
    }

    pub fn staged_entries(&self) -> usize {
        self.exporter.staged_entries()
    }

    pub fn lookup_input(&self) -> &str {
        &self.lookup_input
    }

    pub fn set_lookup_input(&mut self, value: impl Into<String>) {
        self.lookup_input = value.into();
    }

    pub fn set_create_input(&mut self, value: impl Into<String>) {
        self.create_input = value.into();
    }
}

fn banner_colors(notice: &Notice) -> (egui::Color32, egui::Color32) {
    match notice.severity {
        Severity::Success => (
            egui::Color32::from_rgb(46, 96, 62),
            egui::Color32::from_rgb(96, 160, 112),
        ),
        Severity::Warning => (
            egui::Color32::from_rgb(110, 86, 38),
            egui::Color32::from_rgb(176, 140, 72),
        ),
        Severity::Error => (
            egui::Color32::from_rgb(111, 53, 53),
            egui::Color32::from_rgb(175, 96, 96),
        ),
    }
}

impl eframe::App for OrderDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.process_ui_events(now);

        self.show_top_bar(ctx, now);
        self.show_create_panel(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(6.0);
            self.show_lookup_row(ui);
            ui.add_space(8.0);
            self.show_status_banner(ui);
            ui.add_space(8.0);
            self.show_region(ui);
        });

        self.schedule_repaint(ctx, now);
    }
}
