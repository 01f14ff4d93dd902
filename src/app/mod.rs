//! The public-works console: a navigation shell around three screens over mock data.

pub mod dashboard;
pub mod execution;
pub mod intake;
pub mod mock;
pub mod shell;
pub mod theme;

pub use shell::App;

use crate::ui::widgets::SelectResponse;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Dashboard,
    Intake,
    Execution,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Screen::Dashboard, Screen::Intake, Screen::Execution];

    pub fn from_index(index: usize) -> Option<Screen> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            Screen::Dashboard => 0,
            Screen::Intake => 1,
            Screen::Execution => 2,
        }
    }

    /// Short name shown in the navigation rail.
    pub fn nav_label(self) -> &'static str {
        match self {
            Screen::Dashboard => "Painel",
            Screen::Intake => "Solicitação",
            Screen::Execution => "Execução",
        }
    }
}

/// What a screen did with an input event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenResponse {
    pub consumed: bool,
    pub redraw: bool,
    /// Replaces the shell's status line.
    pub status: Option<String>,
}

impl ScreenResponse {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            consumed: true,
            redraw: true,
            status: None,
        }
    }

    pub fn with_status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::handled()
        }
    }

    pub(crate) fn merge_select(&mut self, response: &SelectResponse) {
        self.consumed |= response.consumed;
        self.redraw |= response.redraw || response.changed.is_some();
    }
}
