//! obras - terminal front end for a municipal public-works office.
//!
//! - core: frontend-independent input events
//! - kernel: UI-free state machines (searchable select)
//! - ui: painter, hit-test tree, widgets and backends
//! - services: settings on disk
//! - app: screens (dashboard, service intake, work-order board) and the shell
//! - tui: crossterm/terminal integration, only with the `tui` feature

pub mod app;
pub mod core;
pub mod kernel;
pub mod services;
#[cfg(feature = "tui")]
pub mod tui;
pub mod ui;
