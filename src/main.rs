use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use jack_syntax::config::{Config, LineEnding, OutputFormat};
use jack_syntax::diagnostics::{SyntaxError, render_error};

#[derive(Parser)]
#[command(name = "jack-syntax", version, about = "Syntax analyzer for the Jack language")]
struct Cli {
    /// Config file (defaults to ./jack-syntax.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse .jack files (or directories of them) and write their traces
    Parse {
        /// Source files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Print traces to stdout instead of writing files next to the sources
        #[arg(long)]
        stdout: bool,
        /// Output format (overrides the config file)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Use `\n` line endings (overrides the config file)
        #[arg(long)]
        lf: bool,
        /// Maximum nesting depth (overrides the config file)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        max_depth: Option<u32>,
        /// Render errors with source context
        #[arg(long)]
        pretty: bool,
    },
    /// Scan .jack files and write their token listings (<Name>T.xml)
    Tokens {
        /// Source files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Print listings to stdout instead of writing files
        #[arg(long)]
        stdout: bool,
        /// Use `\n` line endings (overrides the config file)
        #[arg(long)]
        lf: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Expand directories into the `.jack` files they contain, sorted by name.
fn collect_sources(paths: &[PathBuf]) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = std::fs::read_dir(path)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "jack"))
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

fn load_config(explicit: Option<&Path>) -> Config {
    let result = match explicit {
        Some(path) => Config::load(path),
        None => Config::discover(Path::new(".")),
    };
    result.unwrap_or_else(|err| {
        eprintln!("error: {err}");
        std::process::exit(1);
    })
}

fn report(source: &str, err: &SyntaxError, pretty: bool) {
    if pretty {
        render_error(source, err);
    } else {
        eprintln!("{}", err.report());
    }
}

fn write_output(file: &Path, suffix: &str, extension: &str, content: &str, to_stdout: bool) -> bool {
    if to_stdout {
        print!("{content}");
        return true;
    }
    let stem = file.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default();
    let out_path = file.with_file_name(format!("{stem}{suffix}.{extension}"));
    match std::fs::write(&out_path, content) {
        Ok(()) => {
            info!(path = %out_path.display(), "wrote");
            true
        }
        Err(e) => {
            eprintln!("error [{}]: failed to write output: {e}", out_path.display());
            false
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut config = load_config(cli.config.as_deref());

    let (paths, ok) = match cli.command {
        Commands::Parse { paths, stdout, format, lf, max_depth, pretty } => {
            if let Some(format) = format {
                config.format = format;
            }
            if lf {
                config.line_ending = LineEnding::Lf;
            }
            if let Some(depth) = max_depth {
                config.max_depth = depth as usize;
            }
            let files = sources_or_exit(&paths);
            let mut ok = true;
            for file in &files {
                ok &= parse_file(file, &config, stdout, pretty);
            }
            (files, ok)
        }
        Commands::Tokens { paths, stdout, lf } => {
            if lf {
                config.line_ending = LineEnding::Lf;
            }
            let files = sources_or_exit(&paths);
            let mut ok = true;
            for file in &files {
                ok &= tokenize_file(file, &config, stdout);
            }
            (files, ok)
        }
    };

    debug!(files = paths.len(), ok, "done");
    if !ok {
        std::process::exit(1);
    }
}

fn sources_or_exit(paths: &[PathBuf]) -> Vec<PathBuf> {
    match collect_sources(paths) {
        Ok(files) if files.is_empty() => {
            eprintln!("error: no .jack files found");
            std::process::exit(1);
        }
        Ok(files) => files,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn read_source(file: &Path) -> Option<String> {
    match std::fs::read_to_string(file) {
        Ok(source) => Some(source),
        Err(e) => {
            eprintln!("error [{}]: failed to read source: {e}", file.display());
            None
        }
    }
}

fn parse_file(file: &Path, config: &Config, to_stdout: bool, pretty: bool) -> bool {
    let Some(source) = read_source(file) else {
        return false;
    };
    debug!(file = %file.display(), "parsing");
    let output = match jack_syntax::parse_with_config(&source, config) {
        Ok(output) => output,
        Err(err) => {
            report(&source, &err, pretty);
            return false;
        }
    };
    let text = match jack_syntax::emit(&output, config) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error [{}]: failed to serialize trace: {e}", file.display());
            return false;
        }
    };
    write_output(file, "", config.format.extension(), &text, to_stdout)
}

fn tokenize_file(file: &Path, config: &Config, to_stdout: bool) -> bool {
    let Some(source) = read_source(file) else {
        return false;
    };
    match jack_syntax::lexer::lex(&source) {
        Ok(tokens) => {
            let text = jack_syntax::trace::render_tokens(&tokens, config.line_ending);
            write_output(file, "T", "xml", &text, to_stdout)
        }
        Err(err) => {
            report(&source, &err, false);
            false
        }
    }
}
