/// Prompt resolver
///
/// Validates the user's field inputs against the selected template and
/// substitutes `{field_id}` tokens in the prompt text. Pure functions,
/// no I/O.

use std::collections::HashMap;
use thiserror::Error;

use crate::catalog::Template;

/// User-entered values for the selected template, keyed by field id
pub type TemplateInputs = HashMap<String, String>;

/// A template field the user still needs to fill in
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("Please fill in the '{0}' field for the selected style.")]
    MissingField(String),
}

/// Resolve a template's prompt against the user's inputs
///
/// Every declared field must have a non-empty (post-trim) value. On
/// success, every `{field_id}` token for a declared field is replaced
/// with the as-entered (untrimmed) value. Tokens that do not name a
/// declared field are left untouched.
pub fn resolve(template: &Template, inputs: &TemplateInputs) -> Result<String, ResolveError> {
    if template.fields.is_empty() {
        // No details to collect, the prompt is used verbatim
        return Ok(template.prompt.clone());
    }

    for field in &template.fields {
        let filled = inputs
            .get(&field.id)
            .map(|value| !value.trim().is_empty())
            .unwrap_or(false);
        if !filled {
            return Err(ResolveError::MissingField(field.label.clone()));
        }
    }

    Ok(substitute(&template.prompt, template, inputs))
}

/// Replace every `{field_id}` token in a single pass
///
/// Substituted values are never re-scanned, so a value that happens to
/// contain another token does not trigger a second substitution.
fn substitute(prompt: &str, template: &Template, inputs: &TemplateInputs) -> String {
    let mut out = String::with_capacity(prompt.len());
    let mut rest = prompt;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let brace = &rest[start..];

        // A token runs to the next '}' and cannot contain another '{'
        let candidate = brace[1..].find('}').map(|end| &brace[1..=end]);
        match candidate {
            Some(token) if !token.contains('{') && is_declared(template, token) => {
                if let Some(value) = inputs.get(token) {
                    out.push_str(value);
                }
                // 1 for '{', token, 1 for '}'
                rest = &brace[token.len() + 2..];
            }
            _ => {
                // Not a declared token, keep the brace literal and keep
                // scanning right after it
                out.push('{');
                rest = &brace[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn is_declared(template: &Template, token: &str) -> bool {
    template.fields.iter().any(|field| field.id == token)
}
