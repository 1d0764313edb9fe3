/// Errors raised while building or constructing a grammar.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("bad pattern {source_text:?}: {source}")]
    BadPattern {
        source_text: String,
        #[source]
        source: regex::Error,
    },
    #[error("{0}")]
    Structural(String),
    #[error("unresolved goto target(s): {0:?}")]
    UnresolvedSymbol(Vec<String>),
}

/// Errors raised while driving a [`crate::parser::Parser`] over input.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("syntax error: {message} (at {unconsumed:?})")]
    SyntaxError { message: String, unconsumed: String },
}

pub type BuildResult<T> = Result<T, BuildError>;
pub type ParseResult<T> = Result<T, ParseError>;
