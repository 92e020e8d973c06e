/// State management module
///
/// This module handles all application state:
/// - Per-session controller state and its transitions (session.rs)
///
/// All mutation happens on the UI thread in response to messages; the
/// only async operation is the generation call, gated by the session's
/// loading flag.

pub mod session;

pub use session::{OutputView, Session, Stage};
