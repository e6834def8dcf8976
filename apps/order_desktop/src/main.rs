use std::sync::Arc;

mod backend_bridge;
mod bootstrap;
mod clipboard;
mod config;
mod controller;
mod render;
mod ui;

#[cfg(test)]
mod tests;

use anyhow::Context;
use clap::Parser;
use client_core::OrderApiClient;
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::backend_bridge::runtime::{self, Waker};
use crate::config::{load_settings, Args};
use crate::controller::events::UiEvent;
use crate::ui::app::OrderDeskApp;

const COMMAND_QUEUE_CAPACITY: usize = 64;
const EVENT_QUEUE_CAPACITY: usize = 256;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = load_settings(&args)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    tracing::info!(api = %settings.api_base_url, "starting order desk");

    let api = OrderApiClient::new(&settings.api_base_url)
        .with_context(|| format!("invalid api url '{}'", settings.api_base_url))?;

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(COMMAND_QUEUE_CAPACITY);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(EVENT_QUEUE_CAPACITY);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Order Desk")
            .with_inner_size([1180.0, 760.0])
            .with_min_inner_size([820.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Order Desk",
        options,
        Box::new(move |cc| {
            let repaint_ctx = cc.egui_ctx.clone();
            let waker: Waker = Arc::new(move || repaint_ctx.request_repaint());
            runtime::launch(Arc::new(api), cmd_rx, ui_tx, waker)?;
            Ok(Box::new(OrderDeskApp::bootstrap(
                cmd_tx,
                ui_rx,
                &settings,
                cc.egui_ctx.clone(),
            )))
        }),
    )
    .map_err(|err| anyhow::anyhow!("order desk window failed: {err}"))
}
