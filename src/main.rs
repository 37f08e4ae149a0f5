use clap::Parser;
use minify::config::Config;
use minify::core::{format_error_with_help, MinifyResult};
use minify::{Minifier, MinifyArgs, RunConfiguration};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = match MinifyArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version also end up here
            let _ = e.print();
            process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    // Initialize tracing; RUST_LOG wins over -v
    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("\n{}", format_error_with_help(&e));
        process::exit(e.exit_code());
    }
}

fn run(args: &MinifyArgs) -> MinifyResult<()> {
    let run = RunConfiguration::validate(args)?;
    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let summary = Minifier::new(run, config).execute()?;

    eprintln!(
        "✓ Minified: {} classes retained, {} sources and {} resources copied",
        summary.retained.len(),
        summary.copy.sources.len(),
        summary.copy.resources.len()
    );
    if !summary.copy.missing.is_empty() {
        eprintln!(
            "  {} retained classes have no local source",
            summary.copy.missing.len()
        );
    }
    if summary.verified {
        eprintln!("✓ Minified build environment builds");
    }

    Ok(())
}
