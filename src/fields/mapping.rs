//! Logical type → (column type, validation template, form control) table.
//!
//! The table is the one place per-type behavior is decided. It is built once,
//! never mutated, and passed by reference to every generator, so a test (or a
//! caller with different conventions) can hand in a substitute table via
//! [`TypeMappingTable::with_mapping`].
//!
//! | Logical | Column | Rules | Control |
//! |---------|--------|-------|---------|
//! | string | string | required, string, max:255 | text input |
//! | text | text | nullable, string | textarea |
//! | integer | integer | required, numeric | number input |
//! | decimal | decimal | required, numeric | number input (step 0.01) |
//! | boolean | boolean | nullable, boolean | checkbox |
//! | select | unsignedBigInteger | required, exists:{related},id | select |
//! | file | string | nullable, file, max:2048 | file input |
//! | image | string | nullable, image, mimes, max:2048 | file input (images) |
//! | images | string (JSON array) | nullable, array + per-element image rules | multi-file input |
//! | other | string | required, string | none |

use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Serializer};

use super::LogicalType;

/// Accepted image extensions for `image` and `images` fields.
pub const IMAGE_MIMES: [&str; 4] = ["jpeg", "png", "jpg", "gif"];

/// Upload size limit in kilobytes.
pub const MAX_UPLOAD_KB: u32 = 2048;

/// Storage type of a schema column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Auto-incrementing primary key
    Id,
    String,
    Text,
    Integer,
    Decimal,
    Boolean,
    UnsignedBigInteger,
    Timestamp,
}

impl ColumnType {
    /// Schema builder method name for this type.
    pub fn method(&self) -> &'static str {
        match self {
            ColumnType::Id => "id",
            ColumnType::String => "string",
            ColumnType::Text => "text",
            ColumnType::Integer => "integer",
            ColumnType::Decimal => "decimal",
            ColumnType::Boolean => "boolean",
            ColumnType::UnsignedBigInteger => "unsignedBigInteger",
            ColumnType::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}

/// A single validation rule in the host framework's pipe syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Required,
    Nullable,
    String,
    Max(u32),
    Numeric,
    Boolean,
    Array,
    File,
    Image,
    Mimes(Vec<String>),
    Exists { table: String, column: String },
    Unique { table: String, column: String },
}

impl Rule {
    pub fn image_mimes() -> Self {
        Rule::Mimes(IMAGE_MIMES.iter().map(|m| m.to_string()).collect())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required => f.write_str("required"),
            Rule::Nullable => f.write_str("nullable"),
            Rule::String => f.write_str("string"),
            Rule::Max(limit) => write!(f, "max:{}", limit),
            Rule::Numeric => f.write_str("numeric"),
            Rule::Boolean => f.write_str("boolean"),
            Rule::Array => f.write_str("array"),
            Rule::File => f.write_str("file"),
            Rule::Image => f.write_str("image"),
            Rule::Mimes(mimes) => write!(f, "mimes:{}", mimes.join(",")),
            Rule::Exists { table, column } => write!(f, "exists:{},{}", table, column),
            Rule::Unique { table, column } => write!(f, "unique:{},{}", table, column),
        }
    }
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Validation rules for one logical type, before per-field resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTemplate {
    /// Rules applied to the field itself
    pub rules: Vec<Rule>,
    /// Rules applied to each element (`field.*`); empty for scalar fields
    pub element_rules: Vec<Rule>,
    /// Append an `exists` rule against the field's related table
    pub references_related: bool,
}

impl RuleTemplate {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules,
            element_rules: Vec::new(),
            references_related: false,
        }
    }

    pub fn with_element_rules(mut self, element_rules: Vec<Rule>) -> Self {
        self.element_rules = element_rules;
        self
    }

    pub fn referencing_related(mut self) -> Self {
        self.references_related = true;
        self
    }
}

/// Kind of form control rendered for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormControl {
    TextInput,
    Textarea,
    NumberInput {
        #[serde(skip_serializing_if = "Option::is_none")]
        step: Option<&'static str>,
    },
    Checkbox,
    /// Dropdown populated from an options collection supplied by the controller
    Select,
    FileInput {
        #[serde(skip_serializing_if = "Option::is_none")]
        accept: Option<&'static str>,
        multiple: bool,
    },
}

impl FormControl {
    pub fn label(&self) -> &'static str {
        match self {
            FormControl::TextInput => "text input",
            FormControl::Textarea => "textarea",
            FormControl::NumberInput { .. } => "number input",
            FormControl::Checkbox => "checkbox",
            FormControl::Select => "select",
            FormControl::FileInput { multiple: true, .. } => "multi-file input",
            FormControl::FileInput { .. } => "file input",
        }
    }

    pub fn is_upload(&self) -> bool {
        matches!(self, FormControl::FileInput { .. })
    }
}

/// Everything the generators need to know about one logical type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMapping {
    pub column: ColumnType,
    pub rules: RuleTemplate,
    /// `None` means the field is left out of generated forms
    pub control: Option<FormControl>,
    /// Attribute cast declared on the model, if any
    pub cast: Option<&'static str>,
}

impl TypeMapping {
    pub fn new(column: ColumnType, rules: RuleTemplate, control: Option<FormControl>) -> Self {
        Self {
            column,
            rules,
            control,
            cast: None,
        }
    }

    pub fn with_cast(mut self, cast: &'static str) -> Self {
        self.cast = Some(cast);
        self
    }
}

/// Immutable lookup from [`LogicalType`] to [`TypeMapping`].
#[derive(Debug, Clone)]
pub struct TypeMappingTable {
    entries: HashMap<LogicalType, TypeMapping>,
    fallback: TypeMapping,
}

impl TypeMappingTable {
    /// The built-in table.
    pub fn standard() -> Self {
        use FormControl as C;
        use Rule as R;

        let upload_limit = R::Max(MAX_UPLOAD_KB);

        let entries = HashMap::from([
            (
                LogicalType::String,
                TypeMapping::new(
                    ColumnType::String,
                    RuleTemplate::new(vec![R::Required, R::String, R::Max(255)]),
                    Some(C::TextInput),
                ),
            ),
            (
                LogicalType::Text,
                TypeMapping::new(
                    ColumnType::Text,
                    RuleTemplate::new(vec![R::Nullable, R::String]),
                    Some(C::Textarea),
                ),
            ),
            (
                LogicalType::Integer,
                TypeMapping::new(
                    ColumnType::Integer,
                    RuleTemplate::new(vec![R::Required, R::Numeric]),
                    Some(C::NumberInput { step: None }),
                )
                .with_cast("integer"),
            ),
            (
                LogicalType::Decimal,
                TypeMapping::new(
                    ColumnType::Decimal,
                    RuleTemplate::new(vec![R::Required, R::Numeric]),
                    Some(C::NumberInput { step: Some("0.01") }),
                )
                .with_cast("decimal:2"),
            ),
            (
                LogicalType::Boolean,
                TypeMapping::new(
                    ColumnType::Boolean,
                    RuleTemplate::new(vec![R::Nullable, R::Boolean]),
                    Some(C::Checkbox),
                )
                .with_cast("boolean"),
            ),
            (
                LogicalType::Select,
                TypeMapping::new(
                    ColumnType::UnsignedBigInteger,
                    RuleTemplate::new(vec![R::Required]).referencing_related(),
                    Some(C::Select),
                ),
            ),
            (
                LogicalType::File,
                TypeMapping::new(
                    ColumnType::String,
                    RuleTemplate::new(vec![R::Nullable, R::File, upload_limit.clone()]),
                    Some(C::FileInput {
                        accept: None,
                        multiple: false,
                    }),
                ),
            ),
            (
                LogicalType::Image,
                TypeMapping::new(
                    ColumnType::String,
                    RuleTemplate::new(vec![
                        R::Nullable,
                        R::Image,
                        R::image_mimes(),
                        upload_limit.clone(),
                    ]),
                    Some(C::FileInput {
                        accept: Some("image/*"),
                        multiple: false,
                    }),
                ),
            ),
            (
                LogicalType::Images,
                TypeMapping::new(
                    ColumnType::String,
                    RuleTemplate::new(vec![R::Nullable, R::Array]).with_element_rules(vec![
                        R::Image,
                        R::image_mimes(),
                        upload_limit,
                    ]),
                    Some(C::FileInput {
                        accept: Some("image/*"),
                        multiple: true,
                    }),
                )
                .with_cast("array"),
            ),
        ]);

        let fallback = TypeMapping::new(
            ColumnType::String,
            RuleTemplate::new(vec![R::Required, R::String]),
            None,
        );

        Self { entries, fallback }
    }

    /// Look up a type. Never fails: unrecognized types get the fallback entry.
    pub fn lookup(&self, logical_type: &LogicalType) -> &TypeMapping {
        self.entries.get(logical_type).unwrap_or(&self.fallback)
    }

    /// Copy of this table with one entry replaced (or added).
    pub fn with_mapping(mut self, logical_type: LogicalType, mapping: TypeMapping) -> Self {
        self.entries.insert(logical_type, mapping);
        self
    }

    /// Copy of this table with a different fallback entry.
    pub fn with_fallback(mut self, fallback: TypeMapping) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn fallback(&self) -> &TypeMapping {
        &self.fallback
    }
}

impl Default for TypeMappingTable {
    fn default() -> Self {
        Self::standard()
    }
}
