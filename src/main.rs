use std::{fs, path::PathBuf, process::ExitCode, time::Instant};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use menos::{
    lexer::lexer::{Lexer, LexerConfig},
    parser::parser::Parser,
    render_diagnostic,
};

/// Scans and parses a menos source file, printing the token and AST dumps.
#[derive(ClapParser, Debug)]
#[command(author, version, long_about = None)]
struct Args {
    /// Source file to read
    file: PathBuf,

    /// Print the token sequence before the syntax tree
    #[arg(short, long)]
    tokens: bool,

    /// Spaces per nesting level in the dumps
    #[arg(short, long, default_value_t = 2)]
    indent: usize,

    /// Fail on a string literal left open at the end of the file
    #[arg(long)]
    strict_strings: bool,

    /// Log scanner and parser progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::TRACE
        } else {
            tracing::Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    let source = fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let start = Instant::now();

    let mut lexer = Lexer::with_config(LexerConfig {
        source_name: Some(args.file.display().to_string()),
        strict_strings: args.strict_strings,
    });
    let lex_out = match lexer.scan_buffer(&source) {
        Ok(lex_out) => lex_out,
        Err(error) => {
            eprintln!("{}", error);
            eprint!("{}", render_diagnostic(&error, &source));
            return Ok(ExitCode::FAILURE);
        }
    };

    tracing::info!("Tokenized in {:?}", start.elapsed());

    if args.tokens {
        println!("{}", lex_out.tokens().dump(Some(args.indent)));
    }

    let parse_start = Instant::now();
    let mut parser = Parser::new();
    parser.link(&lex_out);

    let program = match parser.parse() {
        Ok(program) => program,
        Err(error) => {
            eprintln!("{}", error);
            eprint!("{}", render_diagnostic(&error, lex_out.source()));
            return Ok(ExitCode::FAILURE);
        }
    };

    tracing::info!("Parsed in {:?}", parse_start.elapsed());

    print!("{}", program.dump(args.indent));

    Ok(ExitCode::SUCCESS)
}
