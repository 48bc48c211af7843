//! Post Press CLI
//!
//! Usage:
//!   post-press [OPTIONS] --records <FILE> [FILE]
//!
//! Options:
//!   -r, --records <FILE>   Record feed (JSON with a top-level `posts` array)
//!   -o, --options <FILE>   Render options (TOML format)
//!   -t, --template <NAME>  Template to instantiate per record
//!   -m, --mount <NAME>     Mount element for rendered instances
//!   -c, --compact          Disable pretty-printed output
//!   -h, --help             Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use post_press::{
    render_feed_with_config, HtmlConfig, RenderConfig, RenderError, RenderOptions,
    DEFAULT_MOUNT, DEFAULT_TEMPLATE,
};

#[derive(Parser)]
#[command(name = "post-press")]
#[command(about = "Declarative template language for rendering blog feeds")]
struct Cli {
    /// Page source file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Record feed file (JSON with a top-level `posts` array)
    #[arg(short, long)]
    records: PathBuf,

    /// Render options file (TOML format)
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// Template to instantiate per record
    #[arg(short, long, default_value = DEFAULT_TEMPLATE)]
    template: String,

    /// Mount element for rendered instances
    #[arg(short, long, default_value = DEFAULT_MOUNT)]
    mount: String,

    /// Disable pretty-printed output
    #[arg(short, long)]
    compact: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // Load render options
    let options = match &cli.options {
        Some(path) => match RenderOptions::from_file(path) {
            Ok(o) => o,
            Err(e) => {
                eprintln!("Error loading options '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => RenderOptions::default(),
    };

    // Read the page source
    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            if io::stdin().is_terminal() {
                eprintln!("Reading page source from stdin (pipe a file or pass a path)...");
            }
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    // Read the record feed
    let records_json = match fs::read_to_string(&cli.records) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading records '{}': {}", cli.records.display(), e);
            std::process::exit(1);
        }
    };

    let config = RenderConfig::new()
        .with_template(&cli.template)
        .with_mount(&cli.mount)
        .with_options(options)
        .with_html(HtmlConfig::default().with_pretty_print(!cli.compact));

    match render_feed_with_config(&source, &records_json, config) {
        Ok(html) => {
            println!("{}", html);
        }
        Err(RenderError::Parse(errors)) => {
            for error in &errors {
                eprintln!("{}", error.format(&source, &filename));
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
