use super::php::php_string;
use super::{ArtifactKind, Render, indent};
use crate::fields::FormControl;
use crate::generators::views::{RECORD_VARIABLE, RECORDS_VARIABLE};
use crate::generators::{FormFieldMarkup, FormMode, ViewKind, ViewSpec};
use crate::naming::strip_relation_suffix;

const INPUT_CLASS: &str = "w-full border border-gray-300 rounded p-2";
const BUTTON_CLASS: &str = "px-4 py-2 bg-blue-500 text-white rounded shadow hover:bg-blue-700";

/// Human label for a field name (`category_id` → `Category`, `unit_price` → `Unit price`).
pub fn label_for(field: &str) -> String {
    let words = strip_relation_suffix(field).replace('_', " ");
    let mut chars = words.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// PHP expression for the field's current value.
fn value_expression(markup: &FormFieldMarkup) -> String {
    match markup.mode {
        FormMode::Create => format!("old({})", php_string(&markup.field)),
        FormMode::Edit => format!(
            "old({}, ${}->{})",
            php_string(&markup.field),
            RECORD_VARIABLE,
            markup.field
        ),
    }
}

fn control_lines(markup: &FormFieldMarkup) -> Vec<String> {
    let name = &markup.field;
    let value = value_expression(markup);

    match markup.control {
        FormControl::TextInput => vec![format!(
            r#"<input type="text" id="{name}" name="{name}" value="{{{{ {value} }}}}" class="{INPUT_CLASS}">"#
        )],
        FormControl::NumberInput { step } => {
            let step = step.map(|s| format!(r#" step="{}""#, s)).unwrap_or_default();
            vec![format!(
                r#"<input type="number" id="{name}" name="{name}" value="{{{{ {value} }}}}"{step} class="{INPUT_CLASS}">"#
            )]
        }
        FormControl::Textarea => vec![format!(
            r#"<textarea id="{name}" name="{name}" rows="4" class="{INPUT_CLASS}">{{{{ {value} }}}}</textarea>"#
        )],
        FormControl::Checkbox => vec![
            format!(r#"<input type="hidden" name="{name}" value="0">"#),
            format!(r#"<input type="checkbox" id="{name}" name="{name}" value="1" @checked({value})>"#),
        ],
        FormControl::Select => {
            let collection = markup
                .options
                .as_ref()
                .map(|o| o.collection.as_str())
                .unwrap_or("options");
            let (value_attr, label_attr) = markup
                .options
                .as_ref()
                .map(|o| (o.value_attribute, o.label_attribute))
                .unwrap_or(("id", "name"));
            vec![
                format!(r#"<select id="{name}" name="{name}" class="{INPUT_CLASS}">"#),
                format!(r#"    <option value="">Select {}</option>"#, label_for(name)),
                format!("    @foreach (${collection} as $option)"),
                format!(
                    r#"        <option value="{{{{ $option->{value_attr} }}}}" @selected({value} == $option->{value_attr})>{{{{ $option->{label_attr} }}}}</option>"#
                ),
                "    @endforeach".to_string(),
                "</select>".to_string(),
            ]
        }
        FormControl::FileInput { accept, multiple } => {
            let input_name = if multiple {
                format!("{}[]", name)
            } else {
                name.clone()
            };
            let accept = accept.map(|a| format!(r#" accept="{}""#, a)).unwrap_or_default();
            let multiple = if multiple { " multiple" } else { "" };
            vec![format!(
                r#"<input type="file" id="{name}" name="{input_name}"{accept}{multiple} class="{INPUT_CLASS}">"#
            )]
        }
    }
}

/// One labelled form group with its validation error slot.
pub(crate) fn render_field(markup: &FormFieldMarkup) -> String {
    let name = &markup.field;
    let mut lines = vec![
        r#"<div class="mb-4">"#.to_string(),
        format!(
            r#"    <label for="{name}" class="block text-sm font-medium text-gray-700">{}</label>"#,
            label_for(name)
        ),
    ];
    lines.extend(control_lines(markup).into_iter().map(|l| format!("    {}", l)));
    lines.push(format!("    @error('{name}')"));
    lines.push(r#"        <span class="text-red-500 text-sm">{{ $message }}</span>"#.to_string());
    lines.push("    @enderror".to_string());
    lines.push("</div>".to_string());
    lines.join("\n")
}

fn layout(spec: &ViewSpec, content: &str) -> String {
    format!(
        "<x-{layout}>\n    <div class=\"container mx-auto p-6\">\n{content}\n    </div>\n</x-{layout}>\n",
        layout = spec.layout,
        content = indent(content, 8)
    )
}

fn render_index(spec: &ViewSpec) -> String {
    let columns: Vec<String> = spec.columns.iter().map(|c| php_string(c)).collect();
    let content = [
        format!(r#"<h1 class="text-2xl font-bold mb-4">{}</h1>"#, spec.title),
        format!(
            r#"<a href="{{{{ route('{}.create') }}}}" class="{BUTTON_CLASS}">Create {}</a>"#,
            spec.route_name, spec.title
        ),
        String::new(),
        "@if (session('success'))".to_string(),
        r#"    <div class="mt-4 p-3 bg-green-100 text-green-800 rounded">{{ session('success') }}</div>"#
            .to_string(),
        "@endif".to_string(),
        String::new(),
        r#"<div class="overflow-x-auto mt-4">"#.to_string(),
        format!("    <x-{}", spec.table_component),
        format!(r#"        :columns="[{}]""#, columns.join(", ")),
        format!(r#"        :data="${}""#, RECORDS_VARIABLE),
        format!(r#"        routePrefix="{}""#, spec.route_name),
        r#"        :show="false""#.to_string(),
        r#"        :edit="true""#.to_string(),
        r#"        :delete="true""#.to_string(),
        "    />".to_string(),
        "</div>".to_string(),
    ];
    layout(spec, &content.join("\n"))
}

fn render_form(spec: &ViewSpec) -> String {
    let (heading, action, button) = match spec.kind {
        ViewKind::Edit => (
            format!("Edit {}", spec.title),
            format!("{{{{ route('{}.update', ${}) }}}}", spec.route_name, RECORD_VARIABLE),
            "Update",
        ),
        _ => (
            format!("Create {}", spec.title),
            format!("{{{{ route('{}.store') }}}}", spec.route_name),
            "Create",
        ),
    };
    let enctype = if spec.multipart {
        r#" enctype="multipart/form-data""#
    } else {
        ""
    };

    let mut form = vec![
        format!(r#"<h1 class="text-2xl font-bold mb-4">{}</h1>"#, heading),
        String::new(),
        format!(
            r#"<form action="{action}" method="POST"{enctype} class="bg-white p-6 rounded-lg shadow-md">"#
        ),
        "    @csrf".to_string(),
    ];
    if spec.kind == ViewKind::Edit {
        form.push("    @method('PUT')".to_string());
    }
    for field in &spec.form {
        form.push(String::new());
        form.push(indent(&render_field(field), 4));
    }
    form.push(String::new());
    form.push(format!(r#"    <button type="submit" class="{BUTTON_CLASS}">{button}</button>"#));
    form.push("</form>".to_string());

    layout(spec, &form.join("\n"))
}

impl Render for ViewSpec {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::View
    }

    fn render(&self) -> String {
        match self.kind {
            ViewKind::Index => render_index(self),
            ViewKind::Create | ViewKind::Edit => render_form(self),
        }
    }
}
