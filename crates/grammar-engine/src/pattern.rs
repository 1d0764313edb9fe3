use crate::error::BuildError;
use regex::Regex;

/// A compiled regular expression used by [`crate::rules::RuleKind::ScanUntil`] and
/// [`crate::rules::RuleKind::Branch`] cases.
///
/// Immutable after construction: the flag set may only be re-specified by building a new
/// Pattern, so the underlying regex graph is safely shareable by reference.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    case_insensitive: bool,
    regex: Regex,
}

/// A single search hit: the matched span's position and end, the owned capture groups
/// (index 0 is the whole match), and the unmatched suffix following the match.
#[derive(Debug, Clone)]
pub struct PatternMatch {
    pub position: usize,
    pub end: usize,
    pub captures: Vec<Option<String>>,
    pub suffix: String,
}

impl Pattern {
    pub fn new(source: &str, case_insensitive: bool) -> Result<Self, BuildError> {
        let compiled = if case_insensitive {
            format!("(?i){source}")
        } else {
            source.to_string()
        };
        let regex = Regex::new(&compiled).map_err(|err| BuildError::BadPattern {
            source_text: source.to_string(),
            source: err,
        })?;
        Ok(Self {
            source: source.to_string(),
            case_insensitive,
            regex,
        })
    }

    /// Leftmost match in `text`, or `None` if the pattern does not occur.
    pub fn search(&self, text: &str) -> Option<PatternMatch> {
        let caps = self.regex.captures(text)?;
        let whole = caps.get(0).expect("capture group 0 always present on a match");
        let captures = (0..caps.len())
            .map(|i| caps.get(i).map(|m| m.as_str().to_string()))
            .collect();
        Some(PatternMatch {
            position: whole.start(),
            end: whole.end(),
            captures,
            suffix: text[whole.end()..].to_string(),
        })
    }

    pub fn render(&self) -> String {
        if self.case_insensitive {
            format!("/{}/i", self.source)
        } else {
            format!("/{}/", self.source)
        }
    }
}
