//! Reusable widgets built on `ui::core`.

pub mod select;
pub mod text_field;

pub use select::{
    SelectControl, SelectCx, SelectPanel, SelectResponse, SelectStyles, SelectTrigger,
    EMPTY_RESULTS_TEXT,
};
pub use text_field::{edit_text, paste_text, TextField, TextFieldStyles};
