//! A streaming, regex-driven builder and interpreter for branching rule graphs.
//!
//! Build a grammar with the fluent [`Grammar`] façade, hand it to a [`Parser`] with
//! [`Parser::sink`], then feed it input chunks with [`Parser::feed`]. See the crate's
//! design notes for why the rule graph is an arena of tagged nodes rather than a tree
//! of trait objects: it is what lets `goto`/`label` back-edges and cycles exist
//! without unsafe code.

pub mod error;
pub mod grammar;
pub mod match_result;
pub mod parser;
pub mod pattern;
pub mod rules;
pub mod tree;

pub use error::{BuildError, BuildResult, ParseError, ParseResult};
pub use grammar::Grammar;
pub use match_result::Match;
pub use parser::Parser;
pub use pattern::{Pattern, PatternMatch};
