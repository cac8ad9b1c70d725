//! rawg-explorer library: shared core for the TUI client and the proxy server.

pub mod api;
pub mod app_core;
pub mod model;
pub mod rawg;
pub mod server;
pub mod theme;
pub mod ui;
