//! The Terraform rule set.
//!
//! Rules are built once into [`GRAMMAR`] and never mutated. Compound rules
//! refer to their interior rules by [`RuleId`], which lets a rule contain
//! itself (calls inside calls, interpolations inside interpolations).

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::MK_RULE;

use super::tokens::TokenKind;

lazy_static! {
    pub static ref GRAMMAR: Grammar = Grammar::terraform();
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum RuleId {
    HashComment,
    LineComment,
    BlockComment,
    Number,
    String,
    Interpolation,
    Call,
    Word,
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub id: RuleId,
    pub kind: TokenKind,
    pub begin: Regex,
    /// `None` for leaf rules, whose begin match is the whole token.
    pub end: Option<Regex>,
    pub escape: Option<Regex>,
    pub contains: Vec<RuleId>,
    pub relevance: u32,
}

impl Rule {
    pub fn is_leaf(&self) -> bool {
        self.end.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct Grammar {
    rules: HashMap<RuleId, Rule>,
    top_level: Vec<RuleId>,
}

impl Grammar {
    pub fn terraform() -> Grammar {
        let rules = vec![
            MK_RULE!(RuleId::HashComment, TokenKind::Comment, begin: "#[^\r\n]*", relevance: 0),
            MK_RULE!(RuleId::LineComment, TokenKind::Comment, begin: "//[^\r\n]*", relevance: 0),
            MK_RULE!(
                RuleId::BlockComment, TokenKind::Comment,
                begin: "/\\*",
                end: "\\*/",
                contains: [],
                relevance: 0
            ),
            MK_RULE!(RuleId::Number, TokenKind::Number, begin: "[0-9]+", relevance: 0),
            MK_RULE!(
                RuleId::String, TokenKind::String,
                begin: "\"",
                end: "\"",
                escape: "(?s:\\\\.)|\\$\\$\\{",
                contains: [RuleId::Interpolation],
                relevance: 1
            ),
            MK_RULE!(
                RuleId::Interpolation, TokenKind::Variable,
                begin: "\\$\\{",
                end: "\\}",
                contains: [RuleId::String, RuleId::Call, RuleId::Interpolation],
                relevance: 9
            ),
            MK_RULE!(
                RuleId::Call, TokenKind::Meta,
                begin: "[A-Za-z_0-9]*\\(",
                end: "\\)",
                contains: [RuleId::Number, RuleId::String, RuleId::Call],
                relevance: 1
            ),
            // Classified against RESERVED_LOOKUP by the scanner.
            MK_RULE!(RuleId::Word, TokenKind::Identifier, begin: "[A-Za-z_][A-Za-z0-9_]*", relevance: 0),
        ];

        Grammar {
            rules: rules.into_iter().map(|rule| (rule.id, rule)).collect(),
            top_level: vec![
                RuleId::HashComment,
                RuleId::LineComment,
                RuleId::BlockComment,
                RuleId::Number,
                RuleId::String,
                RuleId::Word,
            ],
        }
    }

    pub fn rule(&self, id: RuleId) -> Option<&Rule> {
        self.rules.get(&id)
    }

    pub fn top_level(&self) -> &[RuleId] {
        &self.top_level
    }
}

/// Compiles `pattern` so it only matches at the start of the haystack.
pub(crate) fn anchored(pattern: &str) -> Regex {
    Regex::new(&format!("^(?:{})", pattern)).expect("grammar patterns are valid regexes")
}
