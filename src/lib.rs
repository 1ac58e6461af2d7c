pub mod config;
pub mod contact;
pub mod content;
pub mod logging;
pub mod motion;

#[cfg(target_arch = "wasm32")]
pub mod frontend;
