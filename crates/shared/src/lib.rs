//! Order data model and wire contract shared by the API client and the desktop app.

pub mod domain;
pub mod protocol;
pub mod sample;
