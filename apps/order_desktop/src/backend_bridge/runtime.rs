//! Runtime bridge between UI command queue and backend event intake.

use std::{io, sync::Arc, thread};

use client_core::OrderApi;
use crossbeam_channel::{Receiver, Sender};
use tracing::Instrument;

use crate::backend_bridge::commands::BackendCommand;
use crate::bootstrap::preload_samples;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Called after every event is posted so the UI can repaint without polling.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Starts the backend worker thread. Each command runs as its own task, so a
/// slow request never holds up the next one.
pub fn launch(
    api: Arc<dyn OrderApi>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    waker: Waker,
) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("order-backend".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    tracing::error!("failed to build backend runtime: {err}");
                    reject_all(&cmd_rx, &ui_tx, &waker, &err);
                    return;
                }
            };
            tracing::info!("backend worker ready");

            while let Ok(cmd) = cmd_rx.recv() {
                let api = api.clone();
                let ui_tx = ui_tx.clone();
                let waker = waker.clone();
                let span = tracing::info_span!("backend_command", command = cmd.name());
                runtime.spawn(
                    async move {
                        let event = execute(api.as_ref(), cmd).await;
                        if ui_tx.send(event).is_err() {
                            tracing::debug!("ui event queue closed; dropping event");
                            return;
                        }
                        waker();
                    }
                    .instrument(span),
                );
            }

            tracing::info!("command queue closed; backend worker stopping");
        })
}

pub async fn execute(api: &dyn OrderApi, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::LookupOrder { request, order_id } => {
            match api.fetch_order(&order_id).await {
                Ok(order) => UiEvent::OrderLoaded {
                    request,
                    order: Box::new(order),
                },
                Err(err) => UiEvent::RequestFailed {
                    request,
                    error: UiError::from_api(UiErrorContext::Lookup, &err),
                },
            }
        }
        BackendCommand::CreateOrder { request, payload } => {
            match api.create_order(&payload).await {
                Ok(created) => UiEvent::OrderCreated {
                    request,
                    order_id: created.order_id,
                },
                Err(err) => UiEvent::RequestFailed {
                    request,
                    error: UiError::from_api(UiErrorContext::Create, &err),
                },
            }
        }
        BackendCommand::PreloadSamples { order_ids } => {
            UiEvent::SamplesReady(preload_samples(api, &order_ids).await)
        }
    }
}

/// Without a runtime nothing can run; answer every request with a failure
/// so the UI never waits on a response that will not come.
fn reject_all(
    cmd_rx: &Receiver<BackendCommand>,
    ui_tx: &Sender<UiEvent>,
    waker: &Waker,
    cause: &io::Error,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        let event = match cmd {
            BackendCommand::LookupOrder { request, .. } => UiEvent::RequestFailed {
                request,
                error: UiError::transport(UiErrorContext::Lookup, cause),
            },
            BackendCommand::CreateOrder { request, .. } => UiEvent::RequestFailed {
                request,
                error: UiError::transport(UiErrorContext::Create, cause),
            },
            BackendCommand::PreloadSamples { order_ids } => UiEvent::SamplesReady(order_ids),
        };
        if ui_tx.send(event).is_err() {
            return;
        }
        waker();
    }
}
