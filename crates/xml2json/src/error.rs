#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Build(#[from] grammar_engine::BuildError),
    #[error("{0}")]
    Parse(grammar_engine::ParseError),
    #[error("unbalanced tags at line {line}: expected </{expected}>, found </{found}>")]
    XmlUnbalanced {
        expected: String,
        found: String,
        line: u32,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
