// src/toolbox/mod.rs

pub mod app;
pub mod catalog;
pub mod config;
pub mod crypto;
pub mod drawer;
pub mod event;
pub mod filter;
pub mod preferences;
pub mod storage;
pub mod tool_protocol;
pub mod tool_protocols;

// Export the controller at the module root so callers can write toolbox::Toolbox
pub use app::Toolbox;
