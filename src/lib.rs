//! MegaChat: student AI study assistant with a terminal UI
//!
//! This library provides:
//! - Sidebar-navigated TUI with panels for chat, essay and test generation,
//!   task history, model settings, and a profile area
//! - Typed HTTP clients for the remote auth and inference endpoints
//! - Durable on-disk session storage (token + signed-in user)

pub mod api;
pub mod config;
pub mod session;
pub mod tui;

pub use config::Config;
pub use session::SessionStore;
