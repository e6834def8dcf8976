pub mod app;
pub mod order_view;
pub mod staging;
