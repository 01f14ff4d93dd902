use super::option::SelectOption;

/// Case-insensitive substring match against the label or, when present, the subtext.
///
/// `needle_lc` must already be lowercased; callers filtering a whole list lowercase it once.
pub fn matches_lowercase(option: &SelectOption, needle_lc: &str) -> bool {
    if needle_lc.is_empty() {
        return true;
    }
    if option.label.to_lowercase().contains(needle_lc) {
        return true;
    }
    option
        .subtext
        .as_deref()
        .is_some_and(|s| s.to_lowercase().contains(needle_lc))
}

/// The rows a panel shows: matches for `term`, truncated to the first `limit`.
pub fn visible_options<'a>(
    options: &'a [SelectOption],
    term: &str,
    limit: usize,
) -> Vec<&'a SelectOption> {
    if term.is_empty() {
        return options.iter().take(limit).collect();
    }

    let needle = term.to_lowercase();
    options
        .iter()
        .filter(|o| matches_lowercase(o, &needle))
        .take(limit)
        .collect()
}
