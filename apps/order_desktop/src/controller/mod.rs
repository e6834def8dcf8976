//! Controller layer between the egui adapter and the backend bridge.

pub mod events;
pub mod orchestration;
pub mod view_state;
