//! Lexical analysis for Terraform configuration files.
//!
//! This module turns source text into a tree of classified tokens for a
//! syntax highlighter. It handles:
//!
//! - The static rule set (comments, numbers, strings, interpolations, calls)
//! - Recursive scanning of `${ ... }` interpolations inside strings
//! - Classification of keywords, literals and built-ins
//! - Language lookup by name or alias

pub mod grammar;
pub mod language;
pub mod lexer;
pub mod tokens;
