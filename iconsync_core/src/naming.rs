//! Component names derived from icon file stems.

use crate::config::NamingStyle;
use convert_case::{Case, Casing};

/// Derives the component name for an icon file stem.
///
/// `Capitalize` only upper-cases the first character, so `arrowLeft` becomes
/// `ArrowLeft` but `arrow-left` becomes `Arrow-left`. No collision detection
/// happens here.
pub fn component_name(stem: &str, style: NamingStyle) -> String {
    match style {
        NamingStyle::Capitalize => capitalize(stem),
        NamingStyle::Pascal => stem.to_case(Case::Pascal),
    }
}

fn capitalize(stem: &str) -> String {
    let mut chars = stem.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whether `name` can be used as a JavaScript binding name.
///
/// Reserved words are not rejected.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first == '_' || first == '$' || first.is_alphabetic()) {
        return false;
    }
    chars.all(|c| c == '_' || c == '$' || c.is_alphanumeric())
}
