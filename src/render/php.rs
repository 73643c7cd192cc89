use super::{ArtifactKind, Render, indent};
use crate::generators::{
    ColumnRole, ColumnSpec, ControllerKind, ControllerSpec, MigrationSpec, MigrationStep, ModelSpec,
    RouteSpec, RuleExpression, UploadField,
};
use crate::fields::{ColumnType, Rule};
use crate::generators::views::{RECORD_VARIABLE, RECORDS_VARIABLE};
use crate::scaffold::module_spec::{CONTROLLER_NAMESPACE, MODEL_NAMESPACE};

/// Written to a routes file that does not exist yet.
pub const ROUTES_FILE_HEADER: &str = "<?php\n\nuse Illuminate\\Support\\Facades\\Route;\n";

/// Single-quoted PHP string literal.
pub fn php_string(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// `['a', 'b']` on one line.
fn php_inline_list<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items.iter().map(|i| php_string(i.as_ref())).collect();
    format!("[{}]", quoted.join(", "))
}

/// Multi-line array literal whose closing bracket sits at `indent_width`.
fn php_array(entries: &[String], indent_width: usize) -> String {
    if entries.is_empty() {
        return "[]".to_string();
    }
    let body: Vec<String> = entries
        .iter()
        .map(|e| format!("{}{},", " ".repeat(indent_width + 4), e))
        .collect();
    format!("[\n{}\n{}]", body.join("\n"), " ".repeat(indent_width))
}

/// Lines of a class method body (without the signature braces) at 4-space class indent.
fn method(signature: &str, body: &[String]) -> String {
    let mut out = format!("    {}\n    {{\n", signature);
    for line in body {
        if line.is_empty() {
            out.push('\n');
        } else {
            out.push_str(&format!("        {}\n", line));
        }
    }
    out.push_str("    }\n");
    out
}

fn lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

fn class_body(members: &[String]) -> String {
    members.join("\n")
}

// ============================================================================
// Model
// ============================================================================

/// Parameter of `rules()` naming the record a unique check should skip.
const IGNORE_ID_PARAM: &str = "$ignoreId";

/// A rules entry value: the piped string, or an array when it holds a
/// `unique` rule that has to skip the record being updated.
fn rule_value(expression: &RuleExpression) -> String {
    if !expression.has_unique() {
        return php_string(&expression.piped());
    }
    let parts: Vec<String> = expression
        .rules
        .iter()
        .map(|rule| match rule {
            Rule::Unique { table, column } => format!(
                "Rule::unique({}, {})->ignore({})",
                php_string(table),
                php_string(column),
                IGNORE_ID_PARAM
            ),
            other => php_string(&other.to_string()),
        })
        .collect();
    format!("[{}]", parts.join(", "))
}

impl Render for ModelSpec {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Model
    }

    fn render(&self) -> String {
        let mut imports = vec![r"Illuminate\Database\Eloquent\Model"];
        if !self.relations.is_empty() {
            imports.push(r"Illuminate\Database\Eloquent\Relations\BelongsTo");
        }
        if self.soft_deletes {
            imports.push(r"Illuminate\Database\Eloquent\SoftDeletes");
        }
        let scoped = self.rules.iter().any(RuleExpression::has_unique);
        if scoped {
            imports.push(r"Illuminate\Validation\Rule");
        }

        let mut members = Vec::new();
        if self.soft_deletes {
            members.push("    use SoftDeletes;\n".to_string());
        }

        let fillable: Vec<String> = self.fillable.iter().map(|f| php_string(f)).collect();
        members.push(format!("    protected $fillable = {};\n", php_array(&fillable, 4)));

        if !self.casts.is_empty() {
            let casts: Vec<String> = self
                .casts
                .iter()
                .map(|c| format!("{} => {}", php_string(&c.attribute), php_string(c.cast)))
                .collect();
            members.push(format!("    protected $casts = {};\n", php_array(&casts, 4)));
        }

        let rules: Vec<String> = self
            .rules
            .iter()
            .map(|r| format!("{} => {}", php_string(&r.field), rule_value(r)))
            .collect();
        let signature = if scoped {
            format!("public static function rules(?int {} = null): array", IGNORE_ID_PARAM)
        } else {
            "public static function rules(): array".to_string()
        };
        members.push(method(
            &signature,
            &lines(&format!("return {};", php_array(&rules, 0))),
        ));

        for relation in &self.relations {
            members.push(method(
                &format!("public function {}(): BelongsTo", relation.method),
                &[format!(
                    "return $this->belongsTo({}::class, {});",
                    relation.related_model,
                    php_string(&relation.foreign_key)
                )],
            ));
        }

        let uses: Vec<String> = imports.iter().map(|i| format!("use {};", i)).collect();
        format!(
            "<?php\n\nnamespace {};\n\n{}\n\nclass {} extends Model\n{{\n{}}}\n",
            self.namespace,
            uses.join("\n"),
            self.class_name,
            class_body(&members)
        )
    }
}

// ============================================================================
// Migration
// ============================================================================

fn column_statement(column: &ColumnSpec) -> Option<String> {
    match column.role {
        ColumnRole::Identity => Some("$table->id();".to_string()),
        ColumnRole::SoftDelete => Some("$table->softDeletes();".to_string()),
        // `timestamps()` emits both columns; render it once, at `created_at`.
        ColumnRole::Timestamp if column.name == "created_at" => Some("$table->timestamps();".to_string()),
        ColumnRole::Timestamp => None,
        ColumnRole::Field => {
            let args = match column.column_type {
                ColumnType::Decimal => format!("{}, 10, 2", php_string(&column.name)),
                _ => php_string(&column.name),
            };
            let mut statement = format!("$table->{}({})", column.column_type.method(), args);
            if column.nullable {
                statement.push_str("->nullable()");
            }
            if column.unique {
                statement.push_str("->unique()");
            }
            statement.push(';');
            Some(statement)
        }
    }
}

fn render_step(step: MigrationStep<'_>) -> Vec<String> {
    match step {
        MigrationStep::CreateTable { table, columns } => {
            let mut lines = vec![format!(
                "Schema::create({}, function (Blueprint $table) {{",
                php_string(table)
            )];
            lines.extend(columns.iter().filter_map(column_statement).map(|s| format!("    {}", s)));
            for column in columns {
                if let Some(fk) = &column.foreign_key {
                    lines.push(format!(
                        "    $table->foreign({})->references({})->on({})->onDelete({});",
                        php_string(&column.name),
                        php_string(fk.target_column),
                        php_string(&fk.target_table),
                        php_string(fk.on_delete)
                    ));
                }
            }
            lines.push("});".to_string());
            lines
        }
        MigrationStep::DropTableIfExists { table } => {
            vec![format!("Schema::dropIfExists({});", php_string(table))]
        }
    }
}

impl Render for MigrationSpec {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Migration
    }

    fn render(&self) -> String {
        let up = method("public function up(): void", &render_step(self.up()));
        let down = method("public function down(): void", &render_step(self.down()));

        format!(
            "<?php\n\n\
             use Illuminate\\Database\\Migrations\\Migration;\n\
             use Illuminate\\Database\\Schema\\Blueprint;\n\
             use Illuminate\\Support\\Facades\\Schema;\n\n\
             return new class extends Migration\n{{\n{}\n{}}};\n",
            up, down
        )
    }
}

// ============================================================================
// Controller
// ============================================================================

fn upload_lines(uploads: &[UploadField], disk: &str, dir: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for upload in uploads {
        let field = php_string(&upload.field);
        lines.push(format!("if ($request->hasFile({})) {{", field));
        if upload.multiple {
            lines.push(format!("    $validated[{}] = collect($request->file({}))", field, field));
            lines.push(format!(
                "        ->map(fn ($file) => $file->store({}, {}))",
                php_string(dir),
                php_string(disk)
            ));
            lines.push("        ->all();".to_string());
        } else {
            lines.push(format!(
                "    $validated[{}] = $request->file({})->store({}, {});",
                field,
                field,
                php_string(dir),
                php_string(disk)
            ));
        }
        lines.push("}".to_string());
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn view_data(spec: &ControllerSpec, record: Option<&str>) -> String {
    let mut entries = Vec::new();
    if let Some(record) = record {
        entries.push(format!("{} => {}", php_string(RECORD_VARIABLE), record));
    }
    for options in &spec.options {
        entries.push(format!(
            "{} => {}::all()",
            php_string(&options.variable),
            options.related_model
        ));
    }
    php_array(&entries, 0)
}

fn controller_actions(spec: &ControllerSpec) -> Vec<String> {
    let model = &spec.model_class;
    let var = format!("${}", spec.model_variable);
    let route = |action: &str| php_string(&format!("{}.{}", spec.route_name, action));
    let view = |name: &str| php_string(&format!("{}.{}", spec.view_prefix, name));
    let validate = format!("$validated = $request->validate({}::rules());", model);
    let validate_update = if spec.scopes_unique_rules {
        format!("$validated = $request->validate({}::rules({}->id));", model, var)
    } else {
        validate.clone()
    };
    let uploads = upload_lines(&spec.uploads, spec.upload_disk, &spec.upload_dir);
    let redirect = |message: &str| {
        format!(
            "return redirect()->route({})->with('success', {});",
            route("index"),
            php_string(message)
        )
    };

    let with_validation = |validate: &str, tail: Vec<String>| {
        let mut body = vec![validate.to_string(), String::new()];
        body.extend(uploads.iter().cloned());
        body.extend(tail);
        body
    };

    match spec.kind {
        ControllerKind::Api => vec![
            method(
                "public function index()",
                &[format!("return response()->json({}::all());", model)],
            ),
            method(
                "public function store(Request $request)",
                &with_validation(&validate, vec![
                    format!("{} = {}::create($validated);", var, model),
                    String::new(),
                    format!("return response()->json({}, 201);", var),
                ]),
            ),
            method(
                &format!("public function show({} {})", model, var),
                &[format!("return response()->json({});", var)],
            ),
            method(
                &format!("public function update(Request $request, {} {})", model, var),
                &with_validation(&validate_update, vec![
                    format!("{}->update($validated);", var),
                    String::new(),
                    format!("return response()->json({});", var),
                ]),
            ),
            method(
                &format!("public function destroy({} {})", model, var),
                &[
                    format!("{}->delete();", var),
                    String::new(),
                    format!(
                        "return response()->json(['message' => {}]);",
                        php_string(&spec.messages.deleted)
                    ),
                ],
            ),
        ],
        ControllerKind::Web => vec![
            method(
                "public function index()",
                &[
                    format!("${} = {}::all();", RECORDS_VARIABLE, model),
                    String::new(),
                    format!(
                        "return view({}, compact({}));",
                        view("index"),
                        php_string(RECORDS_VARIABLE)
                    ),
                ],
            ),
            method(
                "public function create()",
                &lines(&format!("return view({}, {});", view("create"), view_data(spec, None))),
            ),
            method(
                "public function store(Request $request)",
                &with_validation(&validate, vec![
                    format!("{}::create($validated);", model),
                    String::new(),
                    redirect(&spec.messages.created),
                ]),
            ),
            method(
                &format!("public function show({} {})", model, var),
                &[format!("return redirect()->route({}, {});", route("edit"), var)],
            ),
            method(
                &format!("public function edit({} {})", model, var),
                &lines(&format!(
                    "return view({}, {});",
                    view("edit"),
                    view_data(spec, Some(&var))
                )),
            ),
            method(
                &format!("public function update(Request $request, {} {})", model, var),
                &with_validation(&validate_update, vec![
                    format!("{}->update($validated);", var),
                    String::new(),
                    redirect(&spec.messages.updated),
                ]),
            ),
            method(
                &format!("public function destroy({} {})", model, var),
                &[
                    format!("{}->delete();", var),
                    String::new(),
                    redirect(&spec.messages.deleted),
                ],
            ),
        ],
    }
}

impl Render for ControllerSpec {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Controller
    }

    fn render(&self) -> String {
        let mut imports: Vec<String> = Vec::new();
        if self.namespace != CONTROLLER_NAMESPACE {
            imports.push(format!(r"{}\Controller", CONTROLLER_NAMESPACE));
        }
        imports.push(format!(r"{}\{}", MODEL_NAMESPACE, self.model_class));
        for options in &self.options {
            let import = format!(r"{}\{}", MODEL_NAMESPACE, options.related_model);
            if !imports.contains(&import) {
                imports.push(import);
            }
        }
        imports.push(r"Illuminate\Http\Request".to_string());
        imports.sort();

        let uses: Vec<String> = imports.iter().map(|i| format!("use {};", i)).collect();
        format!(
            "<?php\n\nnamespace {};\n\n{}\n\nclass {} extends Controller\n{{\n{}}}\n",
            self.namespace,
            uses.join("\n"),
            self.class_name,
            class_body(&controller_actions(self))
        )
    }
}

// ============================================================================
// Routes
// ============================================================================

/// The `Route::resource` / `Route::apiResource` line, without any group around it.
pub fn route_registration(spec: &RouteSpec) -> String {
    format!(
        "Route::{}({}, \\{}::class);",
        if spec.is_api() { "apiResource" } else { "resource" },
        php_string(&spec.resource),
        spec.controller_fqcn
    )
}

impl Render for RouteSpec {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Routes
    }

    fn render(&self) -> String {
        let registration = route_registration(self);

        if !self.is_grouped() {
            return registration;
        }

        let mut chain = Vec::new();
        if let Some(prefix) = self.prefix {
            chain.push(format!("prefix({})", php_string(prefix)));
            chain.push(format!("name({})", php_string(&format!("{}.", prefix))));
        }
        if !self.middleware.is_empty() {
            chain.push(format!("middleware({})", php_inline_list(&self.middleware)));
        }
        chain.push("group(function () {".to_string());

        format!("Route::{}\n{}\n}});", chain.join("->"), indent(&registration, 4))
    }
}
