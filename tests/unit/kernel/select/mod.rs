use super::*;
use std::time::{Duration, Instant};

fn prioridades() -> Vec<SelectOption> {
    vec![
        SelectOption::new("a", "Alta"),
        SelectOption::new("n", "Normal"),
    ]
}

fn bairros(n: usize) -> Vec<SelectOption> {
    (0..n)
        .map(|i| SelectOption::new(format!("b{i}"), format!("Bairro {i}")).subtext("Zona Norte"))
        .collect()
}

fn space_down() -> VerticalSpace {
    VerticalSpace {
        above: 0,
        below: 1000,
    }
}

fn immediate() -> SelectConfig {
    SelectConfig {
        search_delay: Duration::ZERO,
        ..SelectConfig::default()
    }
}

fn open_state(config: SelectConfig, options: &[SelectOption]) -> SelectState {
    let mut state = SelectState::new(config);
    state.dispatch(SelectAction::Open { space: space_down() }, options);
    state
}

fn type_str(state: &mut SelectState, options: &[SelectOption], text: &str, now: Instant) {
    for ch in text.chars() {
        state.dispatch(SelectAction::SearchAppend { ch, now }, options);
    }
}

fn labels(visible: &[&SelectOption]) -> Vec<String> {
    visible.iter().map(|o| o.label.clone()).collect()
}

// --- filtering ---------------------------------------------------------------

fn values(options: &[SelectOption], term: &str) -> Vec<String> {
    visible_options(options, term, usize::MAX)
        .iter()
        .map(|o| o.value.clone())
        .collect()
}

#[test]
fn search_al_matches_every_label_containing_it() {
    let options = prioridades();
    // "Normal" contains "al" as well.
    assert_eq!(values(&options, "al"), vec!["a", "n"]);
    assert_eq!(values(&options, "alt"), vec!["a"]);
}

#[test]
fn empty_term_returns_the_list_unchanged() {
    let options = prioridades();
    let visible = visible_options(&options, "", 50);
    assert_eq!(labels(&visible), vec!["Alta", "Normal"]);
}

#[test]
fn filter_matches_label_or_subtext_case_insensitively() {
    let options = vec![
        SelectOption::new("ilum", "Iluminação pública").subtext("Troca de lâmpadas"),
        SelectOption::new("poda", "Poda de árvore").subtext("Parques e jardins"),
        SelectOption::new("buraco", "Tapa-buraco"),
    ];

    assert_eq!(values(&options, "LÂMPADA"), vec!["ilum"]);
    assert_eq!(values(&options, "ÁRVORE"), vec!["poda"]);
    assert_eq!(values(&options, "pa"), vec!["ilum", "poda", "buraco"]);
    assert_eq!(values(&options, "jardins"), vec!["poda"]);
    assert!(values(&options, "asfalto").is_empty());
}

#[test]
fn filter_result_is_exactly_the_matching_subset() {
    let options = vec![
        SelectOption::new("1", "Centro"),
        SelectOption::new("2", "Jardim América").subtext("Zona Sul"),
        SelectOption::new("3", "Vila Nova").subtext("zona norte"),
        SelectOption::new("4", "Zona Rural"),
    ];
    for term in ["", "zona", "ZONA", "a", "nova", "x", " "] {
        let needle = term.to_lowercase();
        let expected: Vec<String> = options
            .iter()
            .filter(|o| {
                o.label.to_lowercase().contains(&needle)
                    || o.subtext
                        .as_deref()
                        .is_some_and(|s| s.to_lowercase().contains(&needle))
            })
            .map(|o| o.value.clone())
            .collect();
        assert_eq!(values(&options, term), expected, "term {term:?}");
    }
}

#[test]
fn state_visible_filters_through_the_published_term() {
    let options = vec![
        SelectOption::new("1", "Centro"),
        SelectOption::new("2", "Jardim América").subtext("Zona Sul"),
        SelectOption::new("3", "Vila Nova").subtext("zona norte"),
    ];
    let mut state = open_state(immediate(), &options);
    type_str(&mut state, &options, "ZONA", Instant::now());
    assert_eq!(labels(&state.visible(&options)), vec!["Jardim América", "Vila Nova"]);
}

#[test]
fn visible_list_is_capped_without_changing_matches() {
    let options = bairros(120);
    assert_eq!(values(&options, "bairro").len(), 120);
    let visible = visible_options(&options, "bairro", 50);
    assert_eq!(visible.len(), 50);
    assert_eq!(visible[0].value, "b0");
    assert_eq!(visible[49].value, "b49");

    let visible = visible_options(&options, "", DEFAULT_MAX_RESULTS);
    assert_eq!(visible.len(), DEFAULT_MAX_RESULTS);
}

#[test]
fn find_selected_treats_unknown_and_empty_as_no_selection() {
    let options = prioridades();
    assert_eq!(find_selected(&options, "n").map(|o| o.label.as_str()), Some("Normal"));
    assert!(find_selected(&options, "").is_none());
    assert!(find_selected(&options, "urgente").is_none());
}

// --- placement ---------------------------------------------------------------

#[test]
fn trigger_near_bottom_of_tall_viewport_drops_up() {
    let space = VerticalSpace {
        above: 700,
        below: 120,
    };
    assert_eq!(drop_position(space, 300), DropPosition::Up);
}

#[test]
fn placement_stays_down_when_above_is_also_short() {
    let space = VerticalSpace {
        above: 200,
        below: 120,
    };
    assert_eq!(drop_position(space, 300), DropPosition::Down);
    let space = VerticalSpace {
        above: 700,
        below: 300,
    };
    assert_eq!(drop_position(space, 300), DropPosition::Down);
}

#[test]
fn every_open_recomputes_placement() {
    let options = prioridades();
    let mut state = SelectState::new(SelectConfig::default());

    let near_bottom = VerticalSpace {
        above: 900,
        below: 10,
    };
    state.dispatch(SelectAction::Toggle { space: near_bottom }, &options);
    assert_eq!(state.drop_position(), DropPosition::Up);

    state.dispatch(SelectAction::Toggle { space: near_bottom }, &options);
    assert!(!state.is_open());

    state.dispatch(SelectAction::Toggle { space: space_down() }, &options);
    assert_eq!(state.drop_position(), DropPosition::Down);
}

// --- open / close / select ---------------------------------------------------

#[test]
fn open_and_close_emit_watch_and_release() {
    let options = prioridades();
    let mut state = SelectState::new(SelectConfig::default());

    let opened = state.dispatch(SelectAction::Toggle { space: space_down() }, &options);
    assert!(opened.state_changed);
    assert_eq!(opened.effects, vec![SelectEffect::WatchOutsidePress]);

    let again = state.dispatch(SelectAction::Open { space: space_down() }, &options);
    assert!(!again.state_changed);
    assert!(again.effects.is_empty());

    let closed = state.dispatch(SelectAction::Close, &options);
    assert_eq!(closed.effects, vec![SelectEffect::ReleaseOutsidePress]);

    let noop = state.dispatch(SelectAction::Close, &options);
    assert!(!noop.state_changed);
    assert!(noop.effects.is_empty());
}

#[test]
fn choosing_emits_change_once_and_closes() {
    let options = prioridades();
    let mut state = open_state(immediate(), &options);
    type_str(&mut state, &options, "nor", Instant::now());

    let result = state.dispatch(SelectAction::Choose { index: 0 }, &options);
    assert_eq!(
        result.effects,
        vec![
            SelectEffect::Changed("n".to_string()),
            SelectEffect::ReleaseOutsidePress
        ]
    );
    assert_eq!(result.changed_value(), Some("n"));
    assert!(!state.is_open());

    let after = state.dispatch(SelectAction::Choose { index: 0 }, &options);
    assert_eq!(after.changed_value(), None);
}

#[test]
fn choosing_past_the_visible_list_is_ignored() {
    let options = prioridades();
    let mut state = open_state(immediate(), &options);
    let result = state.dispatch(SelectAction::Choose { index: 5 }, &options);
    assert!(!result.state_changed);
    assert!(state.is_open());
}

#[test]
fn closing_clears_the_search_so_reopen_is_unfiltered() {
    let options = prioridades();
    let mut state = open_state(immediate(), &options);
    type_str(&mut state, &options, "alt", Instant::now());
    assert_eq!(labels(&state.visible(&options)), vec!["Alta"]);

    state.dispatch(SelectAction::Close, &options);
    assert_eq!(state.search_term(), "");
    assert_eq!(state.filter_term(), "");

    state.dispatch(SelectAction::Open { space: space_down() }, &options);
    assert_eq!(labels(&state.visible(&options)), vec!["Alta", "Normal"]);
}

#[test]
fn close_discards_a_pending_filter() {
    let options = prioridades();
    let now = Instant::now();
    let mut state = open_state(SelectConfig::default(), &options);
    type_str(&mut state, &options, "al", now);
    assert!(state.next_deadline().is_some());

    state.dispatch(SelectAction::Close, &options);
    assert!(state.next_deadline().is_none());
    let tick = state.dispatch(
        SelectAction::Tick {
            now: now + Duration::from_secs(1),
        },
        &options,
    );
    assert!(!tick.state_changed);
    assert_eq!(state.filter_term(), "");
}

#[test]
fn empty_options_open_into_the_empty_state() {
    let options: Vec<SelectOption> = Vec::new();
    let mut state = open_state(immediate(), &options);
    type_str(&mut state, &options, "qualquer", Instant::now());
    assert!(state.visible(&options).is_empty());
    let result = state.dispatch(SelectAction::ChooseHighlighted, &options);
    assert!(result.effects.is_empty());
    let moved = state.dispatch(SelectAction::MoveHighlight { delta: 3 }, &options);
    assert!(!moved.state_changed);
}

#[test]
fn search_input_is_ignored_while_closed() {
    let options = prioridades();
    let mut state = SelectState::new(immediate());
    let result = state.dispatch(
        SelectAction::SearchAppend {
            ch: 'a',
            now: Instant::now(),
        },
        &options,
    );
    assert!(!result.state_changed);
    assert_eq!(state.search_term(), "");
}

#[test]
fn backspace_removes_one_grapheme() {
    let options = prioridades();
    let now = Instant::now();
    let mut state = open_state(immediate(), &options);
    type_str(&mut state, &options, "pé", now);
    state.dispatch(SelectAction::SearchBackspace { now }, &options);
    assert_eq!(state.search_term(), "p");
    state.dispatch(SelectAction::SearchBackspace { now }, &options);
    state.dispatch(SelectAction::SearchBackspace { now }, &options);
    assert_eq!(state.search_term(), "");
}

#[test]
fn highlight_is_clamped_and_reset_when_the_list_changes() {
    let options = bairros(5);
    let now = Instant::now();
    let mut state = open_state(immediate(), &options);

    state.dispatch(SelectAction::MoveHighlight { delta: 10 }, &options);
    assert_eq!(state.highlighted(), 4);
    state.dispatch(SelectAction::MoveHighlight { delta: -2 }, &options);
    assert_eq!(state.highlighted(), 2);
    state.dispatch(SelectAction::MoveHighlight { delta: -9 }, &options);
    assert_eq!(state.highlighted(), 0);

    state.dispatch(SelectAction::MoveHighlight { delta: 3 }, &options);
    type_str(&mut state, &options, "3", now);
    assert_eq!(state.highlighted(), 0);
    let result = state.dispatch(SelectAction::ChooseHighlighted, &options);
    assert_eq!(result.changed_value(), Some("b3"));
}

#[test]
fn required_marker_only_for_empty_closed_required_controls() {
    let options = prioridades();
    let mut state = SelectState::new(SelectConfig::default());
    assert!(state.shows_required_marker(true, ""));
    assert!(!state.shows_required_marker(false, ""));
    assert!(!state.shows_required_marker(true, "a"));

    state.dispatch(SelectAction::Open { space: space_down() }, &options);
    assert!(!state.shows_required_marker(true, ""));
}

// --- deferred filtering -------------------------------------------------------

#[test]
fn filter_trails_the_search_term_until_the_deadline() {
    let options = prioridades();
    let t0 = Instant::now();
    let config = SelectConfig {
        search_delay: Duration::from_millis(50),
        ..SelectConfig::default()
    };
    let mut state = open_state(config, &options);

    type_str(&mut state, &options, "alt", t0);
    assert_eq!(state.search_term(), "alt");
    assert_eq!(state.filter_term(), "");
    assert_eq!(state.visible(&options).len(), 2);
    assert_eq!(state.next_deadline(), Some(t0 + Duration::from_millis(50)));

    let early = state.dispatch(
        SelectAction::Tick {
            now: t0 + Duration::from_millis(49),
        },
        &options,
    );
    assert!(!early.state_changed);

    let due = state.dispatch(
        SelectAction::Tick {
            now: t0 + Duration::from_millis(50),
        },
        &options,
    );
    assert!(due.state_changed);
    assert_eq!(state.filter_term(), "alt");
    assert_eq!(labels(&state.visible(&options)), vec!["Alta"]);
    assert!(state.next_deadline().is_none());
}

#[test]
fn deferred_deadline_is_not_extended_by_later_updates() {
    let t0 = Instant::now();
    let delay = Duration::from_millis(30);
    let mut d = Deferred::new(String::new(), delay);

    assert!(!d.set("a".to_string(), t0));
    assert!(!d.set("ab".to_string(), t0 + Duration::from_millis(20)));
    assert_eq!(d.deadline(), Some(t0 + delay));
    assert!(d.is_pending());

    assert!(d.poll(t0 + delay));
    assert_eq!(d.current(), "ab");
    assert!(!d.is_pending());

    assert!(!d.set("abc".to_string(), t0 + Duration::from_millis(40)));
    assert_eq!(d.deadline(), Some(t0 + Duration::from_millis(70)));
}

#[test]
fn deferred_with_zero_delay_publishes_immediately() {
    let mut d = Deferred::new(0u32, Duration::ZERO);
    assert!(d.set(5, Instant::now()));
    assert_eq!(*d.current(), 5);
    assert!(!d.set(5, Instant::now()));
    assert!(d.deadline().is_none());
}

#[test]
fn deferred_poll_reports_no_change_for_identical_value() {
    let t0 = Instant::now();
    let mut d = Deferred::new("x".to_string(), Duration::from_millis(10));
    d.set("y".to_string(), t0);
    d.set("x".to_string(), t0);
    assert!(!d.poll(t0 + Duration::from_millis(10)));
    assert_eq!(d.current(), "x");
    assert!(d.deadline().is_none());
}

#[test]
fn deferred_reset_drops_pending_value() {
    let t0 = Instant::now();
    let mut d = Deferred::new(1u8, Duration::from_millis(10));
    d.set(2, t0);
    d.reset(0);
    assert_eq!(*d.current(), 0);
    assert!(!d.poll(t0 + Duration::from_secs(1)));
    assert!(!d.is_pending());
}

#[test]
fn glyphs_render_as_single_symbols() {
    let opt = SelectOption::new("poda", "Poda").icon(Glyph::Tree);
    assert_eq!(opt.icon.map(Glyph::symbol), Some('♣'));
}
