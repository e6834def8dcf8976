//! Backend bridge: command queue from the UI, tokio worker, event queue back.

pub mod commands;
pub mod runtime;
