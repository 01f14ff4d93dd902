//! Terminal integration (crossterm + ratatui). Only compiled with the `tui` feature.

pub mod crossterm;
pub mod terminal_guard;
