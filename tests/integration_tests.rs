//! Integration tests for end-to-end tokenization.
//!
//! These tests run whole Terraform documents through the public API and
//! check the token tree, the diagnostics pass and the error rendering.

use std::{
    path::Path,
    time::{Duration, Instant},
};

use pretty_assertions::assert_eq;
use terraform_lexer::{
    errors::errors::check,
    format_error,
    lexer::{language::find_language, lexer::relevance},
    tokenize, tokenize_with, ScanOptions, Token, TokenKind,
};

const MAIN_TF: &str = r#"# Web tier
provider "aws" {
  region = "${var.region}"
}

resource "aws_instance" "web" {
  count         = 2
  ami           = "${lookup(var.amis, var.region)}"
  tags          = map("Name", "web-${count.index}")
  user_data     = "${file("${path.module}/init.sh")}"

  provisioner "local-exec" {
    command = "echo ${join(",", aws_instance.web.*.private_ip)} > hosts"
    when    = "destroy"
  }
}

output "addresses" {
  value = "${element(split(",", var.list), 0)}"
}
"#;

fn flatten(tokens: &[Token]) -> Vec<(TokenKind, usize)> {
    let mut out = vec![];
    for token in tokens {
        token.walk(&mut |token, depth| out.push((token.kind, depth)));
    }
    out
}

fn assert_well_formed(token: &Token) {
    let mut cursor = token.span.start;
    for child in &token.children {
        assert!(child.span.start >= cursor, "children overlap in {}", token);
        assert!(token.span.contains(&child.span), "child escapes {}", token);
        cursor = child.span.end;
        assert_well_formed(child);
    }
}

#[test]
fn test_tokenize_document_covers_input() {
    let tokens = tokenize(MAIN_TF);

    let covered = tokens.iter().map(|token| token.text(MAIN_TF)).collect::<String>();
    assert_eq!(covered, MAIN_TF);

    let mut cursor = 0;
    for token in &tokens {
        assert_eq!(token.span.start, cursor);
        cursor = token.span.end;
        assert_well_formed(token);
    }
    assert_eq!(cursor, MAIN_TF.len());
}

#[test]
fn test_tokenize_document_is_clean() {
    let tokens = tokenize(MAIN_TF);

    assert!(check(&tokens).is_empty());
}

#[test]
fn test_tokenize_document_top_level_words() {
    let tokens = tokenize(MAIN_TF);
    let words = tokens
        .iter()
        .filter(|token| !matches!(token.kind, TokenKind::Text | TokenKind::String))
        .map(|token| (token.kind, token.text(MAIN_TF)))
        .collect::<Vec<_>>();

    assert_eq!(
        words,
        vec![
            (TokenKind::Comment, "# Web tier"),
            (TokenKind::Keyword, "provider"),
            (TokenKind::Identifier, "region"),
            (TokenKind::Keyword, "resource"),
            (TokenKind::Identifier, "count"),
            (TokenKind::Number, "2"),
            (TokenKind::Identifier, "ami"),
            (TokenKind::Identifier, "tags"),
            (TokenKind::BuiltIn, "map"),
            (TokenKind::Identifier, "user_data"),
            (TokenKind::Keyword, "provisioner"),
            (TokenKind::Literal, "command"),
            (TokenKind::Literal, "when"),
            (TokenKind::Keyword, "output"),
            (TokenKind::Identifier, "value"),
        ]
    );
}

#[test]
fn test_tokenize_nested_file_path() {
    let source = r#""${file("${path.module}/init.sh")}""#;
    let tokens = tokenize(source);

    assert_eq!(
        flatten(&tokens),
        vec![
            (TokenKind::String, 0),
            (TokenKind::Variable, 1),
            (TokenKind::Meta, 2),
            (TokenKind::String, 3),
            (TokenKind::Variable, 4),
        ]
    );
}

#[test]
fn test_tokenize_nested_calls_with_number() {
    let source = r#""${element(split(",", var.list), 0)}""#;
    let tokens = tokenize(source);

    assert_eq!(
        flatten(&tokens),
        vec![
            (TokenKind::String, 0),
            (TokenKind::Variable, 1),
            (TokenKind::Meta, 2),
            (TokenKind::Meta, 3),
            (TokenKind::String, 4),
            (TokenKind::Number, 3),
        ]
    );
}

#[test]
fn test_tokenize_with_reference_depth_matches_default_on_shallow_input() {
    assert_eq!(tokenize_with(MAIN_TF, ScanOptions::reference()), tokenize(MAIN_TF));
}

#[test]
fn test_relevance_prefers_provisioner() {
    let plain = "resource \"x\" {}";
    let provisioner = "provisioner \"x\" {}";

    assert!(relevance(&tokenize(provisioner), provisioner) > relevance(&tokenize(plain), plain));
}

#[test]
fn test_format_unterminated_interpolation() {
    let source = "locals {\n  name = \"web-${var.env\n";
    let tokens = tokenize(source);
    let errors = check(&tokens);

    assert_eq!(
        errors.iter().map(|error| error.get_error_name()).collect::<Vec<_>>(),
        vec!["UnterminatedString", "UnterminatedInterpolation"]
    );

    let rendered = format_error(&errors[0], source, Path::new("main.tf"));
    assert_eq!(
        rendered,
        "Error: UnterminatedString (string literal is never closed, add a `\"`)\n\
         -> main.tf\n  \
         |\n\
         2 | name = \"web-${var.env\n  \
         | -------^\n"
    );
}

#[test]
fn test_registered_language_uses_shared_grammar() {
    let language = find_language("hcl").unwrap();

    assert_eq!(language.name, "terraform");
    assert_eq!(language.grammar.top_level().len(), 6);
}

#[test]
fn test_long_identifier_in_interpolation_scans_quickly() {
    let source = format!("\"${{{}}}\"", "a".repeat(100_000));

    let start = Instant::now();
    let tokens = tokenize(&source);
    assert!(start.elapsed() < Duration::from_secs(2), "took {:?}", start.elapsed());

    assert_eq!(tokens.len(), 1);
    assert!(tokens[0].is_terminated());
    assert_eq!(tokens[0].children[0].span.end, source.len() - 1);
    assert!(tokens[0].children[0].children.is_empty());
}

#[test]
fn test_long_call_argument_scans_quickly() {
    let source = format!("\"${{f({})}}\"", "a".repeat(100_000));

    let start = Instant::now();
    let tokens = tokenize(&source);
    assert!(start.elapsed() < Duration::from_secs(2), "took {:?}", start.elapsed());

    let call = &tokens[0].children[0].children[0];
    assert_eq!(call.kind, TokenKind::Meta);
    assert!(call.is_terminated());
    assert_eq!(call.span.end, source.len() - 2);
}
