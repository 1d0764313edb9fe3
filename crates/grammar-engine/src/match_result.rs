/// Carries the most recent capture set seen by the running [`crate::parser::Parser`].
///
/// Created empty, overwritten on every scan, consumed by reducers via capture index.
/// A capture set is valid only until the next scan overwrites it, so reducers must copy
/// out any text they want to retain past their own invocation.
#[derive(Debug, Default, Clone)]
pub struct Match {
    captures: Vec<Option<String>>,
}

impl Match {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set(&mut self, captures: Vec<Option<String>>) {
        self.captures = captures;
    }

    /// The whole match (capture index 0).
    pub fn whole(&self) -> &str {
        self.capture(0)
    }

    /// A capture group by index; index 0 is the whole match. Out-of-range indices
    /// and unmatched optional groups both produce an empty string, not a failure.
    pub fn capture(&self, index: usize) -> &str {
        self.captures
            .get(index)
            .and_then(|c| c.as_deref())
            .unwrap_or("")
    }

    pub fn captures(&self) -> impl Iterator<Item = &str> {
        self.captures.iter().map(|c| c.as_deref().unwrap_or(""))
    }
}
