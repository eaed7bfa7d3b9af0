//! Text front-end: a numbered menu over stdin/stdout that maps each entry to
//! one record store call.

mod app;
mod helpers;
mod menu;
mod prompt;

pub use app::Shell;
pub use menu::MenuChoice;
