//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_RULE!` - Declares a grammar rule
//!
//! These macros keep the grammar table and the scanner free of struct
//! literal boilerplate.

/// Creates a Token instance.
///
/// The two-argument form builds a leaf token with no children and no flags.
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, Span::new(0, 2));
/// let string = MK_TOKEN!(TokenKind::String, span, children, TokenFlags::UNTERMINATED);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $span:expr) => {
        Token {
            kind: $kind,
            span: $span,
            children: vec![],
            flags: TokenFlags::empty(),
        }
    };
    ($kind:expr, $span:expr, $children:expr, $flags:expr) => {
        Token {
            kind: $kind,
            span: $span,
            children: $children,
            flags: $flags,
        }
    };
}

/// Declares a grammar rule.
///
/// Patterns are anchored to the scan position when the rule is built.
///
/// # Arguments
///
/// * `$id` - The RuleId the rule is stored under
/// * `$kind` - The TokenKind produced on a match
/// * `begin` - Pattern opening the construct
/// * `end` - Optional pattern closing it; rules without one are leaves
/// * `escape` - Optional pattern consumed as plain interior text
/// * `contains` - Interior rules, tried in order
/// * `relevance` - Ranking hint for language detection
///
/// # Example
///
/// ```ignore
/// MK_RULE!(RuleId::Number, TokenKind::Number, begin: "[0-9]+", relevance: 0)
/// ```
#[macro_export]
macro_rules! MK_RULE {
    ($id:expr, $kind:expr, begin: $begin:literal, relevance: $relevance:expr) => {
        Rule {
            id: $id,
            kind: $kind,
            begin: anchored($begin),
            end: None,
            escape: None,
            contains: vec![],
            relevance: $relevance,
        }
    };
    (
        $id:expr, $kind:expr,
        begin: $begin:literal,
        end: $end:literal,
        $(escape: $escape:literal,)?
        contains: [$($contained:expr),* $(,)?],
        relevance: $relevance:expr
    ) => {
        Rule {
            id: $id,
            kind: $kind,
            begin: anchored($begin),
            end: Some(anchored($end)),
            escape: None$(.or(Some(anchored($escape))))?,
            contains: vec![$($contained),*],
            relevance: $relevance,
        }
    };
}
