mod execute;
mod output;

use clap::Args;

/// Generate model, migration, controller, views and routes for a model
#[derive(Args, Debug)]
#[command(after_help = "\
Field syntax: name[:type[:modifier,...]]
  types:     string (default), text, integer, decimal, boolean, select,
             file, image, images
  modifiers: nullable, unique

Examples:
  autocrud make Product title price:decimal category_id:select
  autocrud make Post title body:text:nullable --soft-deletes
  autocrud make Order total:decimal --api --middleware auth:sanctum
  autocrud make Product title --dashboard --middleware auth,verified
  autocrud make Product title --dry-run -o json      # Show what would be written")]
pub struct MakeCmd {
    /// Model class name in StudlyCase (e.g. Product, BlogPost)
    pub model: String,

    /// Field declarations
    pub fields: Vec<String>,

    /// Generate a JSON API controller and api.php routes instead of views
    #[arg(long, default_value_t = false)]
    pub api: bool,

    /// Place controller, views and routes under the dashboard prefix
    #[arg(long, default_value_t = false)]
    pub dashboard: bool,

    /// Add a deleted_at column and the SoftDeletes trait
    #[arg(long, default_value_t = false)]
    pub soft_deletes: bool,

    /// Overwrite existing model, migration, controller and view files
    #[arg(long, default_value_t = false)]
    pub force: bool,

    /// Comma-separated route middleware (e.g. auth,verified)
    #[arg(long, default_value = "")]
    pub middleware: String,

    /// Show what would be written without touching the project
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}
