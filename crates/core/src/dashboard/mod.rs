pub mod chart;
#[cfg(not(target_arch = "wasm32"))]
pub mod controller;
pub mod converter_form;
mod pending;
pub mod source;
pub mod store;
