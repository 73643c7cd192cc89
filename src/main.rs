use clap::Parser;
use tracing_subscriber::EnvFilter;

use autocrud::cli::{Args, log_filter};
use autocrud::config::Project;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let project = Project::open(&args.root)?;
    let output = args.command.run(&project, args.format)?;
    println!("{}", output);
    Ok(())
}
