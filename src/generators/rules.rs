//! Validation rule generation.
//!
//! Produces one [`RuleExpression`] per field (two for array fields: the field
//! itself plus a `field.*` element rule). Rules are textual contracts for the
//! host framework's validator; nothing is checked against a database here.

use serde::Serialize;

use crate::fields::{FieldSpec, Rule, TypeMappingTable};

/// The rules attached to one request attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleExpression {
    /// Attribute name, `field.*` for array elements
    pub field: String,
    pub rules: Vec<Rule>,
}

impl RuleExpression {
    /// Pipe-joined form, e.g. `required|string|max:255`.
    pub fn piped(&self) -> String {
        self.rules
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join("|")
    }

    /// True when the expression carries a `unique` rule, which updates must
    /// scope to exclude the record being edited.
    pub fn has_unique(&self) -> bool {
        self.rules.iter().any(|r| matches!(r, Rule::Unique { .. }))
    }

    /// Table named by this expression's `exists` rule, if it has one.
    pub fn exists_table(&self) -> Option<&str> {
        self.rules.iter().find_map(|rule| match rule {
            Rule::Exists { table, .. } => Some(table.as_str()),
            _ => None,
        })
    }
}

pub struct ValidationRuleGenerator<'a> {
    table: &'a TypeMappingTable,
}

impl<'a> ValidationRuleGenerator<'a> {
    pub fn new(table: &'a TypeMappingTable) -> Self {
        Self { table }
    }

    /// Build the rule set for `fields`, in declaration order.
    ///
    /// `table_name` is the model's own table, used by `unique` rules.
    pub fn generate(&self, table_name: &str, fields: &[FieldSpec]) -> Vec<RuleExpression> {
        let mut expressions = Vec::with_capacity(fields.len());

        for field in fields {
            let template = &self.table.lookup(&field.logical_type).rules;
            let mut rules = template.rules.clone();

            if field.is_nullable() {
                make_nullable(&mut rules);
            }
            if template.references_related {
                rules.push(Rule::Exists {
                    table: field.related_table(),
                    column: "id".to_string(),
                });
            }
            if field.is_unique() {
                rules.push(Rule::Unique {
                    table: table_name.to_string(),
                    column: field.name.clone(),
                });
            }

            expressions.push(RuleExpression {
                field: field.name.clone(),
                rules,
            });

            if !template.element_rules.is_empty() {
                expressions.push(RuleExpression {
                    field: format!("{}.*", field.name),
                    rules: template.element_rules.clone(),
                });
            }
        }

        expressions
    }
}

/// Swap `required` for `nullable`, keeping a single `nullable` at the front.
fn make_nullable(rules: &mut Vec<Rule>) {
    rules.retain(|r| !matches!(r, Rule::Required | Rule::Nullable));
    rules.insert(0, Rule::Nullable);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::parse_fields;
    use rstest::{fixture, rstest};

    #[fixture]
    fn table() -> TypeMappingTable {
        TypeMappingTable::standard()
    }

    fn generate(table: &TypeMappingTable, tokens: &[&str]) -> Vec<(String, String)> {
        let fields = parse_fields(tokens).unwrap();
        ValidationRuleGenerator::new(table)
            .generate("products", &fields)
            .into_iter()
            .map(|e| {
                let piped = e.piped();
                (e.field, piped)
            })
            .collect()
    }

    fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
        expected
            .iter()
            .map(|(f, r)| (f.to_string(), r.to_string()))
            .collect()
    }

    #[rstest]
    fn test_product_scenario(table: TypeMappingTable) {
        let rules = generate(&table, &["title:string", "price:decimal", "category_id:select"]);
        assert_eq!(
            rules,
            pairs(&[
                ("title", "required|string|max:255"),
                ("price", "required|numeric"),
                ("category_id", "required|exists:categories,id"),
            ])
        );
    }

    #[rstest]
    fn test_empty_fields_produce_no_rules(table: TypeMappingTable) {
        assert!(generate(&table, &[]).is_empty());
    }

    #[rstest]
    fn test_nullable_text(table: TypeMappingTable) {
        assert_eq!(
            generate(&table, &["bio:text:nullable"]),
            pairs(&[("bio", "nullable|string")])
        );
    }

    #[rstest]
    fn test_nullable_modifier_replaces_required(table: TypeMappingTable) {
        assert_eq!(
            generate(&table, &["subtitle:string:nullable"]),
            pairs(&[("subtitle", "nullable|string|max:255")])
        );
    }

    #[rstest]
    fn test_unique_modifier_targets_own_table(table: TypeMappingTable) {
        assert_eq!(
            generate(&table, &["sku:string:unique"]),
            pairs(&[("sku", "required|string|max:255|unique:products,sku")])
        );
    }

    #[rstest]
    fn test_has_unique(table: TypeMappingTable) {
        let fields = parse_fields(&["title", "sku:string:unique"]).unwrap();
        let rules = ValidationRuleGenerator::new(&table).generate("products", &fields);
        assert!(!rules[0].has_unique());
        assert!(rules[1].has_unique());
    }

    #[rstest]
    fn test_upload_rules(table: TypeMappingTable) {
        assert_eq!(
            generate(&table, &["manual:file", "cover:image", "photos:images"]),
            pairs(&[
                ("manual", "nullable|file|max:2048"),
                ("cover", "nullable|image|mimes:jpeg,png,jpg,gif|max:2048"),
                ("photos", "nullable|array"),
                ("photos.*", "image|mimes:jpeg,png,jpg,gif|max:2048"),
            ])
        );
    }

    #[rstest]
    fn test_boolean_rule(table: TypeMappingTable) {
        assert_eq!(
            generate(&table, &["active:boolean"]),
            pairs(&[("active", "nullable|boolean")])
        );
    }

    #[rstest]
    fn test_unknown_type_falls_back(table: TypeMappingTable) {
        assert_eq!(
            generate(&table, &["location:point"]),
            pairs(&[("location", "required|string")])
        );
    }

    #[rstest]
    fn test_select_without_suffix_still_checks_existence(table: TypeMappingTable) {
        assert_eq!(
            generate(&table, &["status:select"]),
            pairs(&[("status", "required|exists:statuses,id")])
        );
    }

    #[rstest]
    fn test_exists_table_accessor(table: TypeMappingTable) {
        let fields = parse_fields(&["title", "category_id:select"]).unwrap();
        let rules = ValidationRuleGenerator::new(&table).generate("products", &fields);
        assert_eq!(rules[0].exists_table(), None);
        assert_eq!(rules[1].exists_table(), Some("categories"));
    }
}
