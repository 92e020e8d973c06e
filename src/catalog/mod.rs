/// Style template catalog module
///
/// This module owns the fixed catalog of staging styles:
/// - Template and field data structures (templates.rs)
/// - The built-in, ordered list of styles (templates.rs)
///
/// The catalog is loaded once at startup and never mutated.

pub mod templates;

pub use templates::{Catalog, Template, TemplateField};
