//! Execute tests for inspect command.

#[cfg(test)]
mod tests {
    use super::super::InspectCmd;
    use super::super::execute::TABLE_PLACEHOLDER;
    use crate::fields::{ColumnType, FormControl};
    use crate::test_utils::{execute_cmd, temp_project};
    use rstest::rstest;
    use std::fs;

    fn cmd(fields: &[&str], model: Option<&str>) -> InspectCmd {
        InspectCmd {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            model: model.map(str::to_string),
        }
    }

    #[rstest]
    fn test_inspect_resolves_each_field() {
        let (_dir, project) = temp_project();
        let result = execute_cmd(
            cmd(&["title", "price:decimal", "category_id:select"], None),
            &project,
        )
        .unwrap();

        assert_eq!(result.table_name, TABLE_PLACEHOLDER);
        assert_eq!(result.fields.len(), 3);

        let price = &result.fields[1];
        assert_eq!(price.logical_type, "decimal");
        assert_eq!(price.column, ColumnType::Decimal);
        assert_eq!(price.control, Some(FormControl::NumberInput { step: Some("0.01") }));
        assert_eq!(price.rules[0].piped(), "required|numeric");

        let category = &result.fields[2];
        assert_eq!(category.column, ColumnType::UnsignedBigInteger);
        assert_eq!(category.relation.as_deref(), Some("categories"));
        assert_eq!(category.rules[0].piped(), "required|exists:categories,id");
        assert!(result.warnings.is_empty());
    }

    #[rstest]
    fn test_inspect_unique_rule_uses_model_table() {
        let (_dir, project) = temp_project();
        let result =
            execute_cmd(cmd(&["email:string:unique"], Some("BlogPost")), &project).unwrap();

        assert_eq!(result.table_name, "blog_posts");
        assert_eq!(result.fields[0].modifiers, vec!["unique"]);
        assert_eq!(
            result.fields[0].rules[0].piped(),
            "required|string|max:255|unique:blog_posts,email"
        );
    }

    #[rstest]
    fn test_inspect_unique_rule_placeholder_without_model() {
        let (_dir, project) = temp_project();
        let result = execute_cmd(cmd(&["slug:string:unique"], None), &project).unwrap();
        assert!(result.fields[0].rules[0].piped().ends_with("unique:{table},slug"));
    }

    #[rstest]
    fn test_inspect_array_field_has_element_rules() {
        let (_dir, project) = temp_project();
        let result = execute_cmd(cmd(&["photos:images"], None), &project).unwrap();

        let rules = &result.fields[0].rules;
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].piped(), "nullable|array");
        assert_eq!(rules[1].field, "photos.*");
        assert_eq!(rules[1].piped(), "image|mimes:jpeg,png,jpg,gif|max:2048");
    }

    #[rstest]
    fn test_inspect_unknown_type_warns() {
        let (_dir, project) = temp_project();
        let result = execute_cmd(cmd(&["location:point"], None), &project).unwrap();

        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.fields[0].column, ColumnType::String);
        assert_eq!(result.fields[0].control, None);
    }

    #[rstest]
    fn test_inspect_writes_nothing() {
        let (dir, project) = temp_project();
        execute_cmd(cmd(&["title"], Some("Product")), &project).unwrap();
        assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[rstest]
    fn test_inspect_empty_field_list() {
        let (_dir, project) = temp_project();
        let result = execute_cmd(cmd(&[], None), &project).unwrap();
        assert!(result.fields.is_empty());
    }

    // =========================================================================
    // Error handling tests
    // =========================================================================

    #[rstest]
    #[case(&["title", ""], None, "Malformed field token")]
    #[case(&["title", "title:text"], None, "Duplicate field 'title'")]
    #[case(&["title"], Some("blog_post"), "Invalid identifier")]
    fn test_inspect_errors(
        #[case] fields: &[&str],
        #[case] model: Option<&str>,
        #[case] message: &str,
    ) {
        let (_dir, project) = temp_project();
        let err = execute_cmd(cmd(fields, model), &project).unwrap_err();
        assert!(err.to_string().contains(message), "unexpected error: {}", err);
    }
}
