//! Backend-independent UI primitives: geometry, styles, paint commands and pointer hit-testing.

pub mod geom;
pub mod id;
pub mod input;
pub mod painter;
pub mod runtime;
pub mod style;
pub mod tree;
pub mod widget;
