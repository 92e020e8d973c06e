/// UI components
///
/// View-building helpers for the three panes:
/// - `uploader.rs` - product photo intake section
/// - `templates.rs` - style grid and detail field form
/// - `output.rs` - loading / error / result pane

pub mod output;
pub mod templates;
pub mod uploader;
