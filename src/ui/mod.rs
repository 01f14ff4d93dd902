//! UI layer.
//!
//! Everything above `backend` is terminal-agnostic: widgets paint into a [`core::painter::Painter`]
//! and register hit-test nodes; the ratatui backend only exists behind the `tui` feature.

pub mod backend;
pub mod core;
pub mod widgets;
