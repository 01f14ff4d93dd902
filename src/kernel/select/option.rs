/// Decorative glyphs an option can carry. Rendering maps each to a single-cell symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Glyph {
    Road,
    Light,
    Tree,
    Drain,
    Sidewalk,
    Sign,
    Debris,
    Square,
    Alert,
    Clock,
    Check,
    Pause,
    Pin,
}

impl Glyph {
    pub fn symbol(self) -> char {
        match self {
            Glyph::Road => '≡',
            Glyph::Light => '☼',
            Glyph::Tree => '♣',
            Glyph::Drain => '◎',
            Glyph::Sidewalk => '▦',
            Glyph::Sign => '◆',
            Glyph::Debris => '▲',
            Glyph::Square => '■',
            Glyph::Alert => '!',
            Glyph::Clock => '◷',
            Glyph::Check => '✓',
            Glyph::Pause => '‖',
            Glyph::Pin => '•',
        }
    }
}

/// One selectable entry. `value` is what the caller stores; `label` and `subtext` are what the
/// user sees and searches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub subtext: Option<String>,
    pub icon: Option<Glyph>,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            subtext: None,
            icon: None,
        }
    }

    pub fn subtext(mut self, subtext: impl Into<String>) -> Self {
        self.subtext = Some(subtext.into());
        self
    }

    pub fn icon(mut self, icon: Glyph) -> Self {
        self.icon = Some(icon);
        self
    }
}

/// The option whose value equals `value`. Empty and unknown values both mean "no selection".
pub fn find_selected<'a>(options: &'a [SelectOption], value: &str) -> Option<&'a SelectOption> {
    if value.is_empty() {
        return None;
    }
    options.iter().find(|o| o.value == value)
}
