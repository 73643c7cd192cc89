//! Field declarations and their parser.
//!
//! A field is declared on the command line as
//!
//! ```text
//! fieldToken ::= name (":" type (":" modifier ("," modifier)*)?)?
//! ```
//!
//! e.g. `title`, `price:decimal`, `category_id:select`, `email:string:unique,nullable`.
//! A missing or empty type means `string`; missing modifiers mean none.
//!
//! The parsed [`FieldSpec`] list is the single representation every generator
//! consumes. Relation inference lives here too ([`FieldSpec::related_table`]) so
//! that the validation `exists` rule and the schema foreign key can never
//! disagree about the target table.
//!
//! # Type aliases
//!
//! | Accepted spelling | Canonical type |
//! |-------------------|----------------|
//! | `str`, `varchar` | `string` |
//! | `longtext`, `textarea` | `text` |
//! | `int`, `bigint` | `integer` |
//! | `float`, `double`, `money` | `decimal` |
//! | `bool` | `boolean` |
//! | `relation`, `belongs_to` | `select` |
//! | `photo` | `image` |
//! | `gallery` | `images` |
//!
//! Anything else is kept verbatim as [`LogicalType::Other`] and handled by the
//! mapping table's fallback entry.

mod mapping;

pub use mapping::{
    ColumnType, FormControl, IMAGE_MIMES, MAX_UPLOAD_KB, Rule, RuleTemplate, TypeMapping,
    TypeMappingTable,
};

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::warn;

use crate::naming::{self, RELATION_SUFFIX};

/// Columns every generated table already has; declaring them again would
/// produce a duplicate column in the migration.
pub const RESERVED_FIELD_NAMES: [&str; 3] = ["id", "created_at", "updated_at"];

/// Column added by `--soft-deletes`.
pub const SOFT_DELETE_COLUMN: &str = "deleted_at";

static FIELD_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("field name pattern is valid"));

/// Field parsing error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Malformed field token '{token}': {reason}")]
    MalformedFieldToken { token: String, reason: &'static str },

    #[error("Duplicate field '{name}': each field may only be declared once")]
    DuplicateField { name: String },
}

/// The declared type of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogicalType {
    String,
    Text,
    Integer,
    Decimal,
    Boolean,
    /// Reference to another resource, rendered as a dropdown
    Select,
    File,
    Image,
    /// Several images stored as one JSON array of paths
    Images,
    /// Unrecognized type token, kept as written
    Other(String),
}

impl LogicalType {
    /// All recognized types, in documentation order.
    pub fn known() -> [LogicalType; 9] {
        [
            LogicalType::String,
            LogicalType::Text,
            LogicalType::Integer,
            LogicalType::Decimal,
            LogicalType::Boolean,
            LogicalType::Select,
            LogicalType::File,
            LogicalType::Image,
            LogicalType::Images,
        ]
    }

    /// Resolve a type token, canonicalizing aliases. Empty input means `string`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "string" | "str" | "varchar" => LogicalType::String,
            "text" | "longtext" | "textarea" => LogicalType::Text,
            "integer" | "int" | "bigint" => LogicalType::Integer,
            "decimal" | "float" | "double" | "money" => LogicalType::Decimal,
            "boolean" | "bool" => LogicalType::Boolean,
            "select" | "relation" | "belongs_to" => LogicalType::Select,
            "file" => LogicalType::File,
            "image" | "photo" => LogicalType::Image,
            "images" | "gallery" => LogicalType::Images,
            _ => LogicalType::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LogicalType::String => "string",
            LogicalType::Text => "text",
            LogicalType::Integer => "integer",
            LogicalType::Decimal => "decimal",
            LogicalType::Boolean => "boolean",
            LogicalType::Select => "select",
            LogicalType::File => "file",
            LogicalType::Image => "image",
            LogicalType::Images => "images",
            LogicalType::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, LogicalType::Other(_))
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A column/validation modifier attached to a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Modifier {
    Nullable,
    Unique,
    /// Unrecognized modifier, kept for round-tripping but otherwise ignored
    Other(String),
}

impl Modifier {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "nullable" => Modifier::Nullable,
            "unique" => Modifier::Unique,
            _ => Modifier::Other(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Modifier::Nullable => "nullable",
            Modifier::Unique => "unique",
            Modifier::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared field: name, type and modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub logical_type: LogicalType,
    /// Ordered, without duplicates
    pub modifiers: Vec<Modifier>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, logical_type: LogicalType) -> Self {
        Self {
            name: name.into(),
            logical_type,
            modifiers: Vec::new(),
        }
    }

    /// Add a modifier unless it is already present.
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        if !self.modifiers.contains(&modifier) {
            self.modifiers.push(modifier);
        }
        self
    }

    /// Parse a single `name:type:modifier,modifier` token.
    pub fn parse(token: &str) -> Result<Self, FieldError> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(FieldError::MalformedFieldToken {
                token: token.to_string(),
                reason: "empty field declaration",
            });
        }

        let mut parts = trimmed.splitn(3, ':');
        let name = parts.next().unwrap_or_default().trim();
        if name.is_empty() {
            return Err(FieldError::MalformedFieldToken {
                token: token.to_string(),
                reason: "field name is empty",
            });
        }
        if !FIELD_NAME_PATTERN.is_match(name) {
            return Err(FieldError::MalformedFieldToken {
                token: token.to_string(),
                reason: "field name may only contain letters, digits and underscores",
            });
        }
        if RESERVED_FIELD_NAMES.contains(&name) {
            return Err(FieldError::MalformedFieldToken {
                token: token.to_string(),
                reason: "field name is reserved for a column every table already has",
            });
        }

        let logical_type = LogicalType::parse(parts.next().unwrap_or_default());
        if logical_type == LogicalType::Select
            && !naming::strip_relation_suffix(name)
                .chars()
                .any(|c| c.is_ascii_alphanumeric())
        {
            return Err(FieldError::MalformedFieldToken {
                token: token.to_string(),
                reason: "select field needs a name before the '_id' suffix",
            });
        }

        let mut field = FieldSpec::new(name, logical_type);
        for raw in parts.next().unwrap_or_default().split(',') {
            let raw = raw.trim();
            if !raw.is_empty() {
                field = field.with_modifier(Modifier::parse(raw));
            }
        }

        Ok(field)
    }

    pub fn has_modifier(&self, modifier: &Modifier) -> bool {
        self.modifiers.contains(modifier)
    }

    pub fn is_nullable(&self) -> bool {
        self.has_modifier(&Modifier::Nullable)
    }

    pub fn is_unique(&self) -> bool {
        self.has_modifier(&Modifier::Unique)
    }

    /// True for `select` fields named with the `_id` suffix.
    pub fn is_relation(&self) -> bool {
        self.logical_type == LogicalType::Select && self.name.ends_with(RELATION_SUFFIX)
    }

    /// Field name without the relation suffix (`category_id` → `category`).
    pub fn relation_base(&self) -> &str {
        naming::strip_relation_suffix(&self.name)
    }

    /// Table referenced by this field (`category_id` → `categories`).
    ///
    /// Used by both the `exists` validation rule and the schema foreign key.
    pub fn related_table(&self) -> String {
        naming::plural_snake(self.relation_base())
    }

    /// Model class referenced by this field (`category_id` → `Category`).
    pub fn related_model(&self) -> String {
        naming::singular_studly(self.relation_base())
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.logical_type)?;
        if !self.modifiers.is_empty() {
            let modifiers: Vec<&str> = self.modifiers.iter().map(Modifier::as_str).collect();
            write!(f, ":{}", modifiers.join(","))?;
        }
        Ok(())
    }
}

/// Parse raw field tokens, preserving declaration order.
///
/// Unrecognized types are not an error; they are logged and later fall back to
/// the mapping table's default entry.
pub fn parse_fields<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<FieldSpec>, FieldError> {
    let mut seen = HashSet::new();
    let mut fields = Vec::with_capacity(tokens.len());

    for token in tokens {
        let field = FieldSpec::parse(token.as_ref())?;

        if !seen.insert(field.name.clone()) {
            return Err(FieldError::DuplicateField { name: field.name });
        }

        if !field.logical_type.is_known() {
            warn!(
                field = %field.name,
                declared_type = %field.logical_type,
                "unknown field type, falling back to the default mapping"
            );
        }

        fields.push(field);
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // =========================================================================
    // Token parsing
    // =========================================================================

    #[rstest]
    fn test_parse_name_only_defaults_to_string() {
        let field = FieldSpec::parse("title").unwrap();
        assert_eq!(field.name, "title");
        assert_eq!(field.logical_type, LogicalType::String);
        assert!(field.modifiers.is_empty());
    }

    #[rstest]
    fn test_parse_empty_type_defaults_to_string() {
        let field = FieldSpec::parse("title::nullable").unwrap();
        assert_eq!(field.logical_type, LogicalType::String);
        assert_eq!(field.modifiers, vec![Modifier::Nullable]);
    }

    #[rstest]
    fn test_parse_full_token() {
        let field = FieldSpec::parse("email:string:unique,nullable").unwrap();
        assert_eq!(field.name, "email");
        assert_eq!(field.logical_type, LogicalType::String);
        assert_eq!(field.modifiers, vec![Modifier::Unique, Modifier::Nullable]);
        assert!(field.is_unique());
        assert!(field.is_nullable());
    }

    #[rstest]
    fn test_parse_modifiers_trimmed_and_deduplicated() {
        let field = FieldSpec::parse("bio:text: nullable, ,nullable,unique").unwrap();
        assert_eq!(field.modifiers, vec![Modifier::Nullable, Modifier::Unique]);
    }

    #[rstest]
    fn test_parse_extra_colons_stay_in_modifiers() {
        let field = FieldSpec::parse("code:string:unique:extra").unwrap();
        assert_eq!(
            field.modifiers,
            vec![Modifier::Other("unique:extra".to_string())]
        );
    }

    #[rstest]
    #[case("", "empty field declaration")]
    #[case("   ", "empty field declaration")]
    #[case(":string", "field name is empty")]
    #[case("::nullable", "field name is empty")]
    #[case("first-name:string", "field name may only contain letters, digits and underscores")]
    #[case("9lives", "field name may only contain letters, digits and underscores")]
    #[case("id", "field name is reserved for a column every table already has")]
    #[case("created_at:string", "field name is reserved for a column every table already has")]
    #[case("updated_at::nullable", "field name is reserved for a column every table already has")]
    #[case("_id:select", "select field needs a name before the '_id' suffix")]
    #[case("__id:select", "select field needs a name before the '_id' suffix")]
    #[case("_:select", "select field needs a name before the '_id' suffix")]
    fn test_parse_malformed(#[case] token: &str, #[case] reason: &'static str) {
        let err = FieldSpec::parse(token).unwrap_err();
        assert_eq!(
            err,
            FieldError::MalformedFieldToken {
                token: token.to_string(),
                reason,
            }
        );
    }

    // =========================================================================
    // Type canonicalization
    // =========================================================================

    #[rstest]
    #[case("string", LogicalType::String)]
    #[case("VARCHAR", LogicalType::String)]
    #[case("str", LogicalType::String)]
    #[case("longtext", LogicalType::Text)]
    #[case("int", LogicalType::Integer)]
    #[case("Integer", LogicalType::Integer)]
    #[case("float", LogicalType::Decimal)]
    #[case("money", LogicalType::Decimal)]
    #[case("bool", LogicalType::Boolean)]
    #[case("belongs_to", LogicalType::Select)]
    #[case("photo", LogicalType::Image)]
    #[case("gallery", LogicalType::Images)]
    #[case("geometry", LogicalType::Other("geometry".to_string()))]
    fn test_logical_type_aliases(#[case] raw: &str, #[case] expected: LogicalType) {
        assert_eq!(LogicalType::parse(raw), expected);
    }

    #[rstest]
    fn test_unknown_type_keeps_original_spelling() {
        let field = FieldSpec::parse("location:Point").unwrap();
        assert_eq!(field.logical_type, LogicalType::Other("Point".to_string()));
        assert!(!field.logical_type.is_known());
        assert_eq!(field.to_string(), "location:Point");
    }

    // =========================================================================
    // Round trip
    // =========================================================================

    #[rstest]
    #[case("title:string")]
    #[case("bio:text:nullable")]
    #[case("price:decimal")]
    #[case("qty:integer:unique")]
    #[case("active:boolean")]
    #[case("category_id:select")]
    #[case("manual:file:nullable")]
    #[case("cover:image")]
    #[case("photos:images")]
    #[case("email:string:unique,nullable")]
    fn test_recognized_tokens_round_trip(#[case] token: &str) {
        let field = FieldSpec::parse(token).unwrap();
        assert_eq!(field.to_string(), token);
        assert_eq!(FieldSpec::parse(&field.to_string()).unwrap(), field);
    }

    #[rstest]
    fn test_name_only_serializes_with_default_type() {
        assert_eq!(FieldSpec::parse("title").unwrap().to_string(), "title:string");
    }

    // =========================================================================
    // Relation inference
    // =========================================================================

    #[rstest]
    fn test_select_with_suffix_is_relation() {
        let field = FieldSpec::parse("category_id:select").unwrap();
        assert!(field.is_relation());
        assert_eq!(field.relation_base(), "category");
        assert_eq!(field.related_table(), "categories");
        assert_eq!(field.related_model(), "Category");
    }

    #[rstest]
    fn test_select_without_suffix_is_not_relation() {
        let field = FieldSpec::parse("status:select").unwrap();
        assert!(!field.is_relation());
        assert_eq!(field.related_table(), "statuses");
    }

    #[rstest]
    fn test_bare_suffix_allowed_for_non_select_types() {
        let field = FieldSpec::parse("_id:string").unwrap();
        assert!(!field.is_relation());
    }

    #[rstest]
    fn test_deleted_at_parses_without_soft_deletes() {
        // only reserved when the table gets soft deletes
        assert!(FieldSpec::parse("deleted_at").is_ok());
    }

    #[rstest]
    fn test_suffix_without_select_is_not_relation() {
        let field = FieldSpec::parse("external_id:string").unwrap();
        assert!(!field.is_relation());
    }

    #[rstest]
    fn test_multi_word_relation() {
        let field = FieldSpec::parse("product_category_id:select").unwrap();
        assert_eq!(field.related_table(), "product_categories");
        assert_eq!(field.related_model(), "ProductCategory");
    }

    // =========================================================================
    // parse_fields
    // =========================================================================

    #[rstest]
    fn test_parse_fields_preserves_order() {
        let fields = parse_fields(&["title:string", "price:decimal", "category_id:select"]).unwrap();
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["title", "price", "category_id"]);
    }

    #[rstest]
    fn test_parse_fields_empty() {
        let tokens: [&str; 0] = [];
        assert!(parse_fields(&tokens).unwrap().is_empty());
    }

    #[rstest]
    fn test_parse_fields_rejects_duplicates() {
        let err = parse_fields(&["title", "body:text", "title:text"]).unwrap_err();
        assert_eq!(
            err,
            FieldError::DuplicateField {
                name: "title".to_string()
            }
        );
    }

    #[rstest]
    fn test_parse_fields_accepts_unknown_types() {
        let fields = parse_fields(&["location:point"]).unwrap();
        assert_eq!(fields[0].logical_type, LogicalType::Other("point".to_string()));
    }

    #[rstest]
    fn test_parse_fields_propagates_malformed_token() {
        let err = parse_fields(&["title", ""]).unwrap_err();
        assert!(matches!(err, FieldError::MalformedFieldToken { .. }));
    }
}
