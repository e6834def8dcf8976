//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext};
use crate::controller::view_state::ViewStateController;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    context: UiErrorContext,
) -> Result<(), UiError> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "ui->backend command queue is full");
            Err(UiError::transport(
                context,
                "command queue is full; please retry",
            ))
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "ui->backend command queue disconnected");
            Err(UiError::transport(
                context,
                "backend worker disconnected",
            ))
        }
    }
}

/// Validates the lookup field and queues the fetch. Returns whether a request went out.
pub fn submit_lookup(
    controller: &mut ViewStateController,
    cmd_tx: &Sender<BackendCommand>,
    input: &str,
) -> bool {
    let Ok(cmd) = controller.begin_lookup(input) else {
        return false;
    };
    queue_or_fail(controller, cmd_tx, cmd, UiErrorContext::Lookup)
}

/// Validates the JSON field and queues the create. Returns whether a request went out.
pub fn submit_create(
    controller: &mut ViewStateController,
    cmd_tx: &Sender<BackendCommand>,
    input: &str,
) -> bool {
    let Ok(cmd) = controller.begin_create(input) else {
        return false;
    };
    queue_or_fail(controller, cmd_tx, cmd, UiErrorContext::Create)
}

fn queue_or_fail(
    controller: &mut ViewStateController,
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    context: UiErrorContext,
) -> bool {
    match dispatch_backend_command(cmd_tx, cmd, context) {
        Ok(()) => true,
        Err(err) => {
            controller.fail(&err);
            false
        }
    }
}
