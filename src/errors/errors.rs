use std::fmt::Display;

use thiserror::Error;

use crate::{
    lexer::tokens::{Token, TokenFlags, TokenKind},
    Span,
};

/// A problem found in a token tree.
///
/// Tokenizing never fails; these describe constructs a caller may want to
/// flag as a malformed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    internal_error: ErrorImpl,
    span: Span,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, span: Span) -> Self {
        Error {
            internal_error: error_impl,
            span,
        }
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }

    pub fn get_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnterminatedInterpolation => "UnterminatedInterpolation",
            ErrorImpl::UnterminatedCall => "UnterminatedCall",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::DepthExceeded { .. } => "DepthExceeded",
            ErrorImpl::UnknownLanguage { .. } => "UnknownLanguage",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("string literal is never closed, add a `\"`"))
            }
            ErrorImpl::UnterminatedInterpolation => {
                ErrorTip::Suggestion(String::from("interpolation is never closed, add a `}`"))
            }
            ErrorImpl::UnterminatedCall => {
                ErrorTip::Suggestion(String::from("function call is never closed, add a `)`"))
            }
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("block comment is never closed, add a `*/`"))
            }
            ErrorImpl::DepthExceeded { depth } => ErrorTip::Suggestion(format!(
                "nesting deeper than {} levels is highlighted as plain text",
                depth
            )),
            ErrorImpl::UnknownLanguage { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}..{}", self.internal_error, self.span.start, self.span.end)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated interpolation")]
    UnterminatedInterpolation,
    #[error("unterminated function call")]
    UnterminatedCall,
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("nesting exceeds {depth} levels")]
    DepthExceeded { depth: usize },
    #[error("unknown language {name:?}")]
    UnknownLanguage { name: String },
}

/// Collects a diagnostic for every unterminated or depth-limited token in
/// `tokens`, in source order.
pub fn check(tokens: &[Token]) -> Vec<Error> {
    let mut errors = vec![];

    for token in tokens {
        token.walk(&mut |token, depth| {
            if token.flags.contains(TokenFlags::UNTERMINATED) {
                let error = match token.kind {
                    TokenKind::String => ErrorImpl::UnterminatedString,
                    TokenKind::Variable => ErrorImpl::UnterminatedInterpolation,
                    TokenKind::Meta => ErrorImpl::UnterminatedCall,
                    _ => ErrorImpl::UnterminatedComment,
                };
                errors.push(Error::new(error, token.span));
            }

            if token.flags.contains(TokenFlags::DEPTH_LIMITED) {
                errors.push(Error::new(ErrorImpl::DepthExceeded { depth: depth + 1 }, token.span));
            }
        });
    }

    errors
}
