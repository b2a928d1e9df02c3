use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use terraform_lexer::{
    errors::errors::{check, Error, ErrorImpl},
    format_error,
    lexer::{
        language::find_language,
        lexer::{relevance, tokenize_grammar, ScanOptions},
    },
    Span,
};

#[derive(Parser)]
#[command(name = "tflex", about = "Dump the highlighting token tree of a Terraform file")]
struct Cli {
    /// File to tokenize
    file: PathBuf,

    /// Language name or alias to tokenize as
    #[arg(short, long, default_value = "terraform")]
    language: String,

    /// Maximum nesting of strings, interpolations and calls
    #[arg(long, conflicts_with = "reference_depth")]
    max_depth: Option<usize>,

    /// Bound nesting at ten constructs
    #[arg(long)]
    reference_depth: bool,

    /// Exit with an error if any construct is unterminated or too deep
    #[arg(long)]
    strict: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(if cli.verbose { "terraform_lexer=debug" } else { "terraform_lexer=warn" })
        .with_writer(std::io::stderr)
        .init();

    let file_name = cli.file.clone();

    let Some(language) = find_language(&cli.language) else {
        let error = Error::new(ErrorImpl::UnknownLanguage { name: cli.language }, Span::default());
        eprintln!("Error: {} ({})", error.get_error_name(), error.get_error());
        return ExitCode::FAILURE;
    };

    let source = match read_to_string(&cli.file) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error: failed to read {}: {}", file_name.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let options = match (cli.max_depth, cli.reference_depth) {
        (Some(max_depth), _) => ScanOptions::with_max_depth(max_depth),
        (None, true) => ScanOptions::reference(),
        (None, false) => ScanOptions::default(),
    };

    let start = Instant::now();
    let tokens = tokenize_grammar(language.grammar, &source, options);
    let elapsed = start.elapsed();

    for token in &tokens {
        token.debug(&source);
    }

    println!("Tokenized {} top-level tokens in {:?}", tokens.len(), elapsed);
    println!("Relevance: {}", relevance(&tokens, &source));

    let errors = check(&tokens);
    for error in &errors {
        eprint!("{}", format_error(error, &source, &file_name));
    }

    if cli.strict && !errors.is_empty() {
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
