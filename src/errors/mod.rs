//! Diagnostics for token trees.
//!
//! The lexer itself never fails. This module turns the flags it leaves on
//! tokens into reportable errors:
//!
//! - Error structures carrying the offending span
//! - Variants for unterminated constructs and exceeded nesting
//! - Helpful tips for each variant

pub mod errors;
