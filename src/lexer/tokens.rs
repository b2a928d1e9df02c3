use bitflags::bitflags;
use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    /// Reserved words recognised at the top level, with their relevance.
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, (TokenKind, u32)> = {
        let mut map = HashMap::new();
        map.insert("resource", (TokenKind::Keyword, 1));
        map.insert("variable", (TokenKind::Keyword, 1));
        map.insert("provider", (TokenKind::Keyword, 1));
        map.insert("output", (TokenKind::Keyword, 1));
        map.insert("locals", (TokenKind::Keyword, 1));
        map.insert("module", (TokenKind::Keyword, 1));
        map.insert("data", (TokenKind::Keyword, 1));
        map.insert("terraform", (TokenKind::Keyword, 1));
        map.insert("provisioner", (TokenKind::Keyword, 10));

        map.insert("false", (TokenKind::Literal, 1));
        map.insert("true", (TokenKind::Literal, 1));
        map.insert("null", (TokenKind::Literal, 1));
        map.insert("when", (TokenKind::Literal, 1));
        map.insert("interpreter", (TokenKind::Literal, 1));
        map.insert("command", (TokenKind::Literal, 1));

        map.insert("map", (TokenKind::BuiltIn, 1));
        map.insert("list", (TokenKind::BuiltIn, 1));
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Comment,
    Number,
    String,
    /// `${ ... }` interpolation.
    Variable,
    /// Function call inside an interpolation, `name( ... )`.
    Meta,
    Identifier,
    Keyword,
    Literal,
    BuiltIn,
    Text,
}

impl TokenKind {
    /// Class name handed to the host renderer.
    pub fn class_name(&self) -> Option<&'static str> {
        match self {
            TokenKind::Comment => Some("comment"),
            TokenKind::Number => Some("number"),
            TokenKind::String => Some("string"),
            TokenKind::Variable => Some("variable"),
            TokenKind::Meta => Some("meta"),
            TokenKind::Keyword => Some("keyword"),
            TokenKind::Literal => Some("literal"),
            TokenKind::BuiltIn => Some("built_in"),
            TokenKind::Identifier | TokenKind::Text => None,
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TokenFlags: u8 {
        /// The closing delimiter was never found; the span runs to end of input.
        const UNTERMINATED = 1 << 0;
        /// Interior rules were skipped because the nesting limit was reached.
        const DEPTH_LIMITED = 1 << 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub children: Vec<Token>,
    pub flags: TokenFlags,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}..{})", self.kind, self.span.start, self.span.end)?;

        if self.flags.contains(TokenFlags::UNTERMINATED) {
            write!(f, " unterminated")?;
        }
        if self.flags.contains(TokenFlags::DEPTH_LIMITED) {
            write!(f, " depth-limited")?;
        }

        Ok(())
    }
}

/// A flat, fully covering piece of a token tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.start..self.span.end]
    }

    pub fn is_terminated(&self) -> bool {
        !self.flags.contains(TokenFlags::UNTERMINATED)
    }

    pub fn class_name(&self) -> Option<&'static str> {
        self.kind.class_name()
    }

    /// Flattens the token into segments covering its span exactly once.
    ///
    /// Gaps between children take the kind of the enclosing token, which is
    /// what a renderer paints them as.
    pub fn segments(&self) -> Vec<Segment> {
        let mut out = vec![];
        self.collect_segments(&mut out);
        out
    }

    fn collect_segments(&self, out: &mut Vec<Segment>) {
        let mut cursor = self.span.start;

        for child in &self.children {
            if child.span.start > cursor {
                out.push(Segment { kind: self.kind, span: Span::new(cursor, child.span.start) });
            }
            child.collect_segments(out);
            cursor = child.span.end;
        }

        if self.span.end > cursor {
            out.push(Segment { kind: self.kind, span: Span::new(cursor, self.span.end) });
        }
    }

    /// Visits this token and all of its descendants, parents first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Token, usize)) {
        self.walk_at(0, visit);
    }

    fn walk_at<'a>(&'a self, depth: usize, visit: &mut impl FnMut(&'a Token, usize)) {
        visit(self, depth);
        for child in &self.children {
            child.walk_at(depth + 1, visit);
        }
    }

    pub fn debug(&self, source: &str) {
        self.walk(&mut |token, depth| {
            println!("{}{} {:?}", "  ".repeat(depth), token, token.text(source));
        });
    }
}
