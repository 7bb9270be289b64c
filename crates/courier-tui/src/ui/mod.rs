pub mod app;
pub mod components;
pub mod format;
pub mod layout;
pub mod status;
pub mod terminal;
pub mod theme;
pub mod views;

pub use app::{row_actions, App, InputMode, RowAction, RowMenuState, RowTarget, View};
pub use terminal::{init as init_terminal, restore as restore_terminal, Tui};
