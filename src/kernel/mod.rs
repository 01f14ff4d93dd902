//! Frontend-independent interaction logic.

pub mod select;
