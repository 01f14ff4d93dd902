use super::deferred::Deferred;
use super::filter::visible_options;
use super::option::SelectOption;
use super::placement::{drop_position, DropPosition, VerticalSpace};
use std::time::{Duration, Instant};
use unicode_segmentation::UnicodeSegmentation;

pub const DEFAULT_FLIP_THRESHOLD: u16 = 300;
pub const DEFAULT_MAX_RESULTS: usize = 50;
pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectConfig {
    /// Minimum free space (below, else above) the panel wants before choosing a side.
    pub flip_threshold: u16,
    /// Rows kept after filtering; bounds render cost, not matching.
    pub max_results: usize,
    /// Upper bound on how long the filtered list may lag the typed search term.
    pub search_delay: Duration,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            flip_threshold: DEFAULT_FLIP_THRESHOLD,
            max_results: DEFAULT_MAX_RESULTS,
            search_delay: DEFAULT_SEARCH_DELAY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectAction {
    /// Opens a closed panel, closes an open one.
    Toggle {
        space: VerticalSpace,
    },
    Open {
        space: VerticalSpace,
    },
    Close,
    SearchAppend {
        ch: char,
        now: Instant,
    },
    SearchBackspace {
        now: Instant,
    },
    SetSearch {
        term: String,
        now: Instant,
    },
    MoveHighlight {
        delta: isize,
    },
    /// Chooses the row at `index` of the visible (filtered, capped) list.
    Choose {
        index: usize,
    },
    ChooseHighlighted,
    Tick {
        now: Instant,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectEffect {
    /// The user chose an option; carries its value. The caller owns the selection.
    Changed(String),
    /// The panel opened: presses outside the control should now close it.
    WatchOutsidePress,
    /// The panel closed: stop watching outside presses.
    ReleaseOutsidePress,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchResult {
    pub effects: Vec<SelectEffect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn unchanged() -> Self {
        Self::default()
    }

    fn changed() -> Self {
        Self {
            effects: Vec::new(),
            state_changed: true,
        }
    }

    pub fn changed_value(&self) -> Option<&str> {
        self.effects.iter().find_map(|e| match e {
            SelectEffect::Changed(v) => Some(v.as_str()),
            _ => None,
        })
    }
}

/// Interaction state of one searchable select. The selected value is not stored here: the
/// caller passes it in and applies [`SelectEffect::Changed`] itself.
#[derive(Debug, Clone)]
pub struct SelectState {
    config: SelectConfig,
    is_open: bool,
    search: String,
    filter: Deferred<String>,
    drop_position: DropPosition,
    highlighted: usize,
}

impl SelectState {
    pub fn new(config: SelectConfig) -> Self {
        Self {
            config,
            is_open: false,
            search: String::new(),
            filter: Deferred::new(String::new(), config.search_delay),
            drop_position: DropPosition::Down,
            highlighted: 0,
        }
    }

    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// What the user typed, updated on every keystroke.
    pub fn search_term(&self) -> &str {
        &self.search
    }

    /// The term the visible list is filtered by; trails `search_term` by up to `search_delay`.
    pub fn filter_term(&self) -> &str {
        self.filter.current()
    }

    pub fn drop_position(&self) -> DropPosition {
        self.drop_position
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.filter.deadline()
    }

    pub fn visible<'a>(&self, options: &'a [SelectOption]) -> Vec<&'a SelectOption> {
        visible_options(options, self.filter.current(), self.config.max_results)
    }

    /// Advisory marker for a required control left empty; hidden while the panel is open.
    pub fn shows_required_marker(&self, required: bool, value: &str) -> bool {
        required && value.is_empty() && !self.is_open
    }

    pub fn dispatch(&mut self, action: SelectAction, options: &[SelectOption]) -> DispatchResult {
        match action {
            SelectAction::Toggle { space } => {
                if self.is_open {
                    self.close()
                } else {
                    self.open(space)
                }
            }
            SelectAction::Open { space } => {
                if self.is_open {
                    DispatchResult::unchanged()
                } else {
                    self.open(space)
                }
            }
            SelectAction::Close => self.close(),
            SelectAction::SearchAppend { ch, now } => {
                if !self.is_open {
                    return DispatchResult::unchanged();
                }
                self.search.push(ch);
                self.queue_filter(now)
            }
            SelectAction::SearchBackspace { now } => {
                if !self.is_open {
                    return DispatchResult::unchanged();
                }
                let Some((idx, _)) = self.search.grapheme_indices(true).next_back() else {
                    return DispatchResult::unchanged();
                };
                self.search.truncate(idx);
                self.queue_filter(now)
            }
            SelectAction::SetSearch { term, now } => {
                if !self.is_open || term == self.search {
                    return DispatchResult::unchanged();
                }
                self.search = term;
                self.queue_filter(now)
            }
            SelectAction::MoveHighlight { delta } => {
                if !self.is_open {
                    return DispatchResult::unchanged();
                }
                let len = self.visible(options).len();
                let max = len.saturating_sub(1) as isize;
                let next = (self.highlighted as isize)
                    .saturating_add(delta)
                    .clamp(0, max) as usize;
                if next == self.highlighted {
                    return DispatchResult::unchanged();
                }
                self.highlighted = next;
                DispatchResult::changed()
            }
            SelectAction::Choose { index } => self.choose(index, options),
            SelectAction::ChooseHighlighted => self.choose(self.highlighted, options),
            SelectAction::Tick { now } => {
                if self.filter.poll(now) {
                    self.highlighted = 0;
                    DispatchResult::changed()
                } else {
                    DispatchResult::unchanged()
                }
            }
        }
    }

    fn open(&mut self, space: VerticalSpace) -> DispatchResult {
        self.is_open = true;
        self.highlighted = 0;
        self.drop_position = drop_position(space, self.config.flip_threshold);
        tracing::debug!(
            above = space.above,
            below = space.below,
            drop = ?self.drop_position,
            "select opened"
        );

        let mut result = DispatchResult::changed();
        result.effects.push(SelectEffect::WatchOutsidePress);
        result
    }

    fn close(&mut self) -> DispatchResult {
        if !self.is_open {
            return DispatchResult::unchanged();
        }
        self.is_open = false;
        self.search.clear();
        self.filter.reset(String::new());
        self.highlighted = 0;
        tracing::debug!("select closed");

        let mut result = DispatchResult::changed();
        result.effects.push(SelectEffect::ReleaseOutsidePress);
        result
    }

    fn choose(&mut self, index: usize, options: &[SelectOption]) -> DispatchResult {
        if !self.is_open {
            return DispatchResult::unchanged();
        }
        let Some(value) = self.visible(options).get(index).map(|o| o.value.clone()) else {
            return DispatchResult::unchanged();
        };

        let mut result = self.close();
        result.effects.insert(0, SelectEffect::Changed(value));
        result
    }

    fn queue_filter(&mut self, now: Instant) -> DispatchResult {
        if self.filter.set(self.search.clone(), now) {
            self.highlighted = 0;
        }
        DispatchResult::changed()
    }
}
