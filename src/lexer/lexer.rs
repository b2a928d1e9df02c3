use crate::{Span, MK_TOKEN};

use super::{
    grammar::{Grammar, Rule, RuleId, GRAMMAR},
    tokens::{Token, TokenFlags, TokenKind, RESERVED_LOOKUP},
};

/// Nesting limit used by [`ScanOptions::default`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Bounds nesting at ten constructs, as deep as the reference highlighting
/// grammar ever reaches. Only the depth is bounded; each construct keeps its
/// full interior rules until then.
pub const REFERENCE_MAX_DEPTH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Maximum number of nested compound constructs. A construct opened at
    /// this depth still closes on its own delimiter but its interior is text.
    pub max_depth: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions { max_depth: DEFAULT_MAX_DEPTH }
    }
}

impl ScanOptions {
    pub fn reference() -> Self {
        ScanOptions { max_depth: REFERENCE_MAX_DEPTH }
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        ScanOptions { max_depth }
    }
}

pub struct Lexer<'a> {
    grammar: &'a Grammar,
    options: ScanOptions,
    source: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Lexer<'a> {
    pub fn with_grammar(grammar: &'a Grammar, source: &'a str, options: ScanOptions) -> Lexer<'a> {
        Lexer {
            grammar,
            options,
            source,
            pos: 0,
            depth: 0,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    /// Steps over one character, never splitting a UTF-8 sequence.
    pub fn advance_char(&mut self) {
        self.pos += self.at().map_or(1, char::len_utf8);
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Tries `rules` in order at the cursor; the first one that matches is
    /// scanned to completion and returned.
    pub fn match_rules(&mut self, rules: &[RuleId]) -> Option<Token> {
        let grammar = self.grammar;

        for id in rules {
            let Some(rule) = grammar.rule(*id) else {
                continue;
            };

            let matched = match rule.begin.find(self.remainder()) {
                Some(found) if found.end() > 0 => found.end(),
                _ => continue,
            };

            return Some(if rule.is_leaf() {
                self.scan_leaf(rule, matched)
            } else {
                self.scan_compound(rule, matched)
            });
        }

        None
    }

    fn scan_leaf(&mut self, rule: &Rule, len: usize) -> Token {
        let start = self.pos;
        self.advance_n(len);
        let span = Span::new(start, self.pos);

        let kind = match rule.id {
            RuleId::Word => RESERVED_LOOKUP
                .get(&self.source[span.start..span.end])
                .map_or(TokenKind::Identifier, |(kind, _)| *kind),
            _ => rule.kind,
        };

        MK_TOKEN!(kind, span)
    }

    fn scan_compound(&mut self, rule: &'a Rule, begin_len: usize) -> Token {
        let start = self.pos;
        self.advance_n(begin_len);
        self.depth += 1;

        let mut flags = TokenFlags::empty();
        let interior: &[RuleId] = if self.depth >= self.options.max_depth {
            if !rule.contains.is_empty() {
                tracing::debug!(kind = %rule.kind, start, depth = self.depth, "nesting limit reached");
                flags |= TokenFlags::DEPTH_LIMITED;
            }
            &[]
        } else {
            &rule.contains
        };

        tracing::trace!(kind = %rule.kind, start, depth = self.depth, "entering construct");

        let mut children = vec![];
        let mut terminated = false;

        while !self.at_eof() {
            if let Some(escaped) = rule.escape.as_ref().and_then(|escape| escape.find(self.remainder())) {
                if escaped.end() > 0 {
                    self.advance_n(escaped.end());
                    continue;
                }
            }

            if let Some(child) = self.match_rules(interior) {
                children.push(child);
                continue;
            }

            if let Some(end) = rule.end.as_ref().and_then(|end| end.find(self.remainder())) {
                self.advance_n(end.end());
                terminated = true;
                break;
            }

            self.skip_interior_text();
        }

        self.depth -= 1;

        if !terminated {
            tracing::debug!(kind = %rule.kind, start, "construct runs to end of input");
            flags |= TokenFlags::UNTERMINATED;
        }

        MK_TOKEN!(rule.kind, Span::new(start, self.pos), children, flags)
    }

    /// Steps over unmatched interior text. A whole identifier run is skipped
    /// at once: no rule can start inside it once none matched at its start.
    fn skip_interior_text(&mut self) {
        let word = self
            .remainder()
            .bytes()
            .take_while(|byte| byte.is_ascii_alphanumeric() || *byte == b'_')
            .count();

        if word > 0 {
            self.advance_n(word);
        } else {
            self.advance_char();
        }
    }

    /// Consumes one unmatched character, extending a trailing Text token.
    fn push_text(&mut self, tokens: &mut Vec<Token>) {
        let start = self.pos;
        self.advance_char();

        match tokens.last_mut() {
            Some(last) if last.kind == TokenKind::Text && last.span.end == start => {
                last.span.end = self.pos;
            }
            _ => tokens.push(MK_TOKEN!(TokenKind::Text, Span::new(start, self.pos))),
        }
    }
}

/// Tokenizes `source` with the default options.
pub fn tokenize(source: &str) -> Vec<Token> {
    tokenize_with(source, ScanOptions::default())
}

/// Tokenizes `source` into an ordered sequence of tokens covering it exactly.
///
/// Never fails: text no rule matches becomes `Text`, constructs that never
/// close run to the end of input and are flagged `UNTERMINATED`.
pub fn tokenize_with(source: &str, options: ScanOptions) -> Vec<Token> {
    tokenize_grammar(&GRAMMAR, source, options)
}

/// Tokenizes `source` with a specific grammar, e.g. one resolved through
/// [`find_language`](super::language::find_language).
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn tokenize_grammar(grammar: &Grammar, source: &str, options: ScanOptions) -> Vec<Token> {
    let mut lex = Lexer::with_grammar(grammar, source, options);
    let mut tokens = vec![];
    let top_level = grammar.top_level();

    while !lex.at_eof() {
        match lex.match_rules(top_level) {
            Some(token) => tokens.push(token),
            None => lex.push_text(&mut tokens),
        }
    }

    tracing::debug!(count = tokens.len(), "tokenized");
    tokens
}

/// Sums the relevance of every matched construct and reserved word.
///
/// The host uses this score to pick a grammar when a file's language is
/// not known up front.
pub fn relevance(tokens: &[Token], source: &str) -> u32 {
    let mut total = 0;

    for token in tokens {
        token.walk(&mut |token, _| {
            total += match token.kind {
                TokenKind::Keyword | TokenKind::Literal | TokenKind::BuiltIn => RESERVED_LOOKUP
                    .get(token.text(source))
                    .map_or(0, |(_, relevance)| *relevance),
                TokenKind::Comment => 0,
                TokenKind::Number => rule_relevance(RuleId::Number),
                TokenKind::String => rule_relevance(RuleId::String),
                TokenKind::Variable => rule_relevance(RuleId::Interpolation),
                TokenKind::Meta => rule_relevance(RuleId::Call),
                TokenKind::Identifier | TokenKind::Text => 0,
            };
        });
    }

    total
}

fn rule_relevance(id: RuleId) -> u32 {
    GRAMMAR.rule(id).map_or(0, |rule| rule.relevance)
}
