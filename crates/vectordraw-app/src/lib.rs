//! vectordraw Application
//!
//! The application shell: configuration, UI event translation and
//! headless session replay.

mod app;
mod event_handler;

pub use app::{App, AppConfig, AppError, load_session};
pub use event_handler::{EventHandler, UiEvent};
