//! Identifier case conversion and relation-name inference.
//!
//! Model names arrive as raw user input and are validated into a [`TypeName`].
//! Everything else the generators need (table names, route names, view folders,
//! related model classes) is derived from that name or from a field name with
//! the helpers below.
//!
//! Pluralization is a small English heuristic. Irregular plurals are not
//! handled (`Person` becomes `persons`, not `people`).

use std::fmt;
use std::sync::LazyLock;

use heck::{ToLowerCamelCase, ToSnakeCase};
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// Suffix that marks a field as a reference to another resource.
pub const RELATION_SUFFIX: &str = "_id";

static TYPE_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z0-9_]*$").expect("type name pattern is valid"));

/// Naming error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error(
        "Invalid identifier '{raw}': model names must start with an uppercase letter \
         and contain only letters, digits and underscores"
    )]
    InvalidIdentifier { raw: String },
}

/// A validated model name in studly form (e.g. `Product`, `BlogPost`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `BlogPost` → `blog_post`
    pub fn snake(&self) -> String {
        snake(&self.0)
    }

    /// `BlogPost` → `blog_posts`
    pub fn plural_snake(&self) -> String {
        plural_snake(&self.0)
    }

    /// `BlogPost` → `blogPost`, used for route-bound controller parameters.
    pub fn variable(&self) -> String {
        self.0.to_lower_camel_case()
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TypeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validate a raw model name and convert it to its canonical studly form.
///
/// Surrounding whitespace is ignored. The name must start with an uppercase
/// ASCII letter; lowercase input such as `post` is rejected rather than
/// silently capitalized.
pub fn to_type_name(raw: &str) -> Result<TypeName, NameError> {
    let trimmed = raw.trim();
    if !TYPE_NAME_PATTERN.is_match(trimmed) {
        return Err(NameError::InvalidIdentifier {
            raw: raw.to_string(),
        });
    }
    Ok(TypeName(studly(trimmed)))
}

/// Upper-case the first letter of every underscore-separated part and join them.
///
/// The rest of each part is kept as written, so acronyms survive
/// (`HTTP_client` → `HTTPClient`).
pub fn studly(raw: &str) -> String {
    raw.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Class name for a singular snake word (`product_category` → `ProductCategory`).
pub fn singular_studly(word: &str) -> String {
    studly(&snake(word))
}

/// Lowercase-with-underscores form (`ProductCategory` → `product_category`).
pub fn snake(name: &str) -> String {
    name.to_snake_case()
}

/// Pluralize a lowercase word with simple English heuristics.
pub fn plural(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    if word.ends_with('s')
        || word.ends_with('x')
        || word.ends_with('z')
        || word.ends_with("ch")
        || word.ends_with("sh")
    {
        format!("{}es", word)
    } else if ends_with_consonant_y(word) {
        format!("{}ies", &word[..word.len() - 1])
    } else {
        format!("{}s", word)
    }
}

fn ends_with_consonant_y(word: &str) -> bool {
    let mut rev = word.chars().rev();
    match (rev.next(), rev.next()) {
        (Some('y'), Some(prev)) => !matches!(prev, 'a' | 'e' | 'i' | 'o' | 'u'),
        _ => false,
    }
}

/// Table-style name: snake case, last word pluralized (`ProductCategory` → `product_categories`).
pub fn plural_snake(name: &str) -> String {
    plural(&snake(name))
}

/// `category_id` → `category`; names without the suffix are returned unchanged.
pub fn strip_relation_suffix(field_name: &str) -> &str {
    field_name
        .strip_suffix(RELATION_SUFFIX)
        .unwrap_or(field_name)
}
