//! Searchable single-select: option model, filtering, placement and the interaction reducer.
//!
//! Nothing here knows about terminals or pointers. The UI layer feeds [`SelectAction`]s in and
//! acts on the returned [`SelectEffect`]s.

mod deferred;
mod filter;
mod option;
mod placement;
mod state;

pub use deferred::Deferred;
pub use filter::{matches_lowercase, visible_options};
pub use option::{find_selected, Glyph, SelectOption};
pub use placement::{drop_position, DropPosition, VerticalSpace};
pub use state::{
    DispatchResult, SelectAction, SelectConfig, SelectEffect, SelectState,
    DEFAULT_FLIP_THRESHOLD, DEFAULT_MAX_RESULTS, DEFAULT_SEARCH_DELAY,
};

#[cfg(test)]
#[path = "../../../tests/unit/kernel/select/mod.rs"]
mod tests;
