mod execute;
mod execute_tests;
mod output;

use clap::Args;

/// Show how field declarations resolve, without generating anything
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  autocrud inspect title price:decimal category_id:select
  autocrud inspect email:string:unique --model User   # unique rule names the users table
  autocrud inspect location:point -o json              # Unknown types are reported as warnings")]
pub struct InspectCmd {
    /// Field declarations
    pub fields: Vec<String>,

    /// Model the fields belong to, used to name the table in unique rules
    #[arg(long)]
    pub model: Option<String>,
}
