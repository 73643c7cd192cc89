//! Model (data class) generation.

use heck::ToLowerCamelCase;
use serde::Serialize;

use super::rules::RuleExpression;
use crate::fields::TypeMappingTable;
use crate::scaffold::ModuleSpec;
use crate::scaffold::module_spec::MODEL_NAMESPACE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeCast {
    pub attribute: String,
    pub cast: &'static str,
}

/// `belongsTo` relation inferred from a relation field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BelongsTo {
    /// Relation method name (`category_id` → `category`)
    pub method: String,
    pub related_model: String,
    pub foreign_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSpec {
    pub namespace: &'static str,
    pub class_name: String,
    pub table_name: String,
    /// Mass-assignable attributes, in declaration order
    pub fillable: Vec<String>,
    pub casts: Vec<AttributeCast>,
    /// Returned by the model's static `rules()` accessor
    pub rules: Vec<RuleExpression>,
    pub soft_deletes: bool,
    pub relations: Vec<BelongsTo>,
}

pub struct ModelGenerator<'a> {
    table: &'a TypeMappingTable,
}

impl<'a> ModelGenerator<'a> {
    pub fn new(table: &'a TypeMappingTable) -> Self {
        Self { table }
    }

    /// `rules` is the rule set produced for the same fields.
    pub fn generate(&self, module: &ModuleSpec, rules: Vec<RuleExpression>) -> ModelSpec {
        let fillable = module.fields.iter().map(|f| f.name.clone()).collect();

        let casts = module
            .fields
            .iter()
            .filter_map(|f| {
                self.table
                    .lookup(&f.logical_type)
                    .cast
                    .map(|cast| AttributeCast {
                        attribute: f.name.clone(),
                        cast,
                    })
            })
            .collect();

        let relations = module
            .fields
            .iter()
            .filter(|f| f.is_relation())
            .map(|f| BelongsTo {
                method: f.relation_base().to_lower_camel_case(),
                related_model: f.related_model(),
                foreign_key: f.name.clone(),
            })
            .collect();

        ModelSpec {
            namespace: MODEL_NAMESPACE,
            class_name: module.model.to_string(),
            table_name: module.table_name(),
            fillable,
            casts,
            rules,
            soft_deletes: module.soft_deletes,
            relations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::parse_fields;
    use crate::generators::ValidationRuleGenerator;
    use crate::naming::to_type_name;
    use rstest::{fixture, rstest};

    #[fixture]
    fn table() -> TypeMappingTable {
        TypeMappingTable::standard()
    }

    fn generate(table: &TypeMappingTable, tokens: &[&str], soft_deletes: bool) -> ModelSpec {
        let module = ModuleSpec::new(
            to_type_name("Product").unwrap(),
            parse_fields(tokens).unwrap(),
        )
        .soft_deletes(soft_deletes);
        let rules = ValidationRuleGenerator::new(table).generate(&module.table_name(), &module.fields);
        ModelGenerator::new(table).generate(&module, rules)
    }

    #[rstest]
    fn test_product_scenario(table: TypeMappingTable) {
        let model = generate(
            &table,
            &["title:string", "price:decimal", "category_id:select"],
            false,
        );
        assert_eq!(model.class_name, "Product");
        assert_eq!(model.table_name, "products");
        assert_eq!(model.fillable, vec!["title", "price", "category_id"]);
        assert_eq!(model.rules.len(), 3);
        assert_eq!(
            model.relations,
            vec![BelongsTo {
                method: "category".to_string(),
                related_model: "Category".to_string(),
                foreign_key: "category_id".to_string(),
            }]
        );
        assert_eq!(
            model.casts,
            vec![AttributeCast {
                attribute: "price".to_string(),
                cast: "decimal:2",
            }]
        );
    }

    #[rstest]
    fn test_empty_fields(table: TypeMappingTable) {
        let model = generate(&table, &[], false);
        assert!(model.fillable.is_empty());
        assert!(model.rules.is_empty());
        assert!(model.casts.is_empty());
        assert!(model.relations.is_empty());
    }

    #[rstest]
    fn test_soft_deletes_flag(table: TypeMappingTable) {
        assert!(generate(&table, &["title"], true).soft_deletes);
        assert!(!generate(&table, &["title"], false).soft_deletes);
    }

    #[rstest]
    fn test_images_cast_to_array(table: TypeMappingTable) {
        let model = generate(&table, &["photos:images", "active:boolean"], false);
        let casts: Vec<_> = model
            .casts
            .iter()
            .map(|c| (c.attribute.as_str(), c.cast))
            .collect();
        assert_eq!(casts, vec![("photos", "array"), ("active", "boolean")]);
    }

    #[rstest]
    fn test_multi_word_relation_method(table: TypeMappingTable) {
        let model = generate(&table, &["parent_category_id:select"], false);
        assert_eq!(model.relations[0].method, "parentCategory");
        assert_eq!(model.relations[0].related_model, "ParentCategory");
    }

    #[rstest]
    fn test_fillable_matches_rule_fields(table: TypeMappingTable) {
        let model = generate(&table, &["title", "body:text", "owner_id:select"], false);
        let ruled: Vec<_> = model.rules.iter().map(|r| r.field.as_str()).collect();
        assert_eq!(model.fillable, ruled);
    }
}
