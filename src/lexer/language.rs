use lazy_static::lazy_static;

use super::grammar::{Grammar, GRAMMAR};

lazy_static! {
    pub static ref LANGUAGES: Vec<Language> = vec![Language {
        name: "terraform",
        aliases: &["hcl", "tf"],
        grammar: &GRAMMAR,
    }];
}

/// A grammar as registered with the host highlighter. Matching is always
/// case-sensitive.
#[derive(Debug)]
pub struct Language {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub grammar: &'static Grammar,
}

impl Language {
    pub fn answers_to(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(name))
    }
}

/// Resolves a language by its registered name or one of its aliases.
pub fn find_language(name: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|language| language.answers_to(name.trim()))
}
