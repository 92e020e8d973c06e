/// Prompt resolution module
///
/// Turns a selected template plus the user's field inputs into the
/// final prompt string sent to the image model (resolver.rs).

pub mod resolver;

pub use resolver::{resolve, ResolveError, TemplateInputs};
