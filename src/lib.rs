pub mod span;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod trace;
pub mod config;

use config::{Config, OutputFormat};
use diagnostics::SyntaxError;
use lexer::TokenStream;
use parser::{ParseOutput, Parser};

/// Scan and parse one class with default settings.
pub fn parse_str(source: &str) -> Result<ParseOutput, SyntaxError> {
    parse_with_config(source, &Config::default())
}

/// Scan and parse one class, honouring the configured nesting limit.
pub fn parse_with_config(source: &str, config: &Config) -> Result<ParseOutput, SyntaxError> {
    let stream = TokenStream::from_source(source)?;
    Parser::new(stream).with_max_depth(config.max_depth).parse()
}

/// Render a parse result in the configured output format.
pub fn emit(output: &ParseOutput, config: &Config) -> Result<String, serde_json::Error> {
    match config.format {
        OutputFormat::Xml => Ok(trace::render(&output.tree, config.line_ending)),
        OutputFormat::Json => trace::to_json(&output.tree),
    }
}

/// Parse `source` and return its trace text (lex → parse → render).
pub fn analyze(source: &str, config: &Config) -> Result<String, SyntaxError> {
    let output = parse_with_config(source, config)?;
    Ok(trace::render(&output.tree, config.line_ending))
}
