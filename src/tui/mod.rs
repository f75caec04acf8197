//! Terminal front end: a code editor on the left, the rendered review on the
//! right, and a Review button that shares its action with Ctrl+Enter.

pub mod app;
pub mod events;
pub mod keymap;
pub mod markdown;
pub mod runner;
pub mod ui;

pub use app::App;
pub use events::{Event, EventHandler};
pub use keymap::Action;
pub use runner::run_tui;
