//! Name policy trait and the default Rust conventions

use super::inflect::{pluralize_word, singularize_word};
use heck::{ToSnakeCase, ToUpperCamelCase};

/// Naming capability used by the schema builder
///
/// Implementations must be pure: the same input always yields the same
/// output, otherwise builder output is not reproducible.
pub trait NamePolicy: Send + Sync {
    /// Struct name for a `_`-joined path of ancestor names
    fn struct_name(&self, path: &str) -> String;

    /// Display name for a source field
    fn exported_field(&self, name: &str) -> String;

    /// Plural form of a display name
    fn pluralize(&self, name: &str) -> String;

    /// Singular form of a name
    fn singularize(&self, name: &str) -> String;
}

/// Rust naming: `UpperCamelCase` structs, `snake_case` fields
#[derive(Debug, Clone, Copy, Default)]
pub struct RustNamePolicy;

impl RustNamePolicy {
    /// Create the default policy
    pub fn new() -> Self {
        Self
    }
}

/// Strict and reserved keywords that need escaping as identifiers
static KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be written as raw identifiers
static NON_RAW_KEYWORDS: &[&str] = &["crate", "self", "super"];

/// Apply `f` to the last `_`-separated word of a snake_case name
fn map_last_word(snake: &str, f: impl Fn(&str) -> String) -> String {
    match snake.rsplit_once('_') {
        Some((head, last)) if !last.is_empty() => format!("{head}_{}", f(last)),
        _ => f(snake),
    }
}

impl NamePolicy for RustNamePolicy {
    fn struct_name(&self, path: &str) -> String {
        let name = self.singularize(path).to_upper_camel_case();
        if name.is_empty() {
            return "Struct".to_string();
        }
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            return format!("Struct{name}");
        }
        if name == "Self" {
            return "SelfStruct".to_string();
        }
        name
    }

    fn exported_field(&self, name: &str) -> String {
        let snake = name.to_snake_case();
        if snake.is_empty() {
            return "field".to_string();
        }
        if snake.starts_with(|c: char| c.is_ascii_digit()) {
            return format!("field_{snake}");
        }
        if NON_RAW_KEYWORDS.contains(&snake.as_str()) {
            return format!("{snake}_");
        }
        if KEYWORDS.binary_search(&snake.as_str()).is_ok() {
            return format!("r#{snake}");
        }
        snake
    }

    fn pluralize(&self, name: &str) -> String {
        // Raw identifiers lose their prefix once pluralized
        let bare = name.strip_prefix("r#").unwrap_or(name);
        let plural = map_last_word(&bare.to_snake_case(), pluralize_word);
        if KEYWORDS.binary_search(&plural.as_str()).is_ok() {
            format!("r#{plural}")
        } else {
            plural
        }
    }

    fn singularize(&self, name: &str) -> String {
        map_last_word(&name.to_snake_case(), singularize_word)
    }
}
