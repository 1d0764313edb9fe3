use super::RuleId;
use crate::error::ParseResult;
use crate::match_result::Match;

/// Prepends the last full match back onto `input`, restoring look-ahead a Branch
/// consumed during selection that a later rule also wants to see.
pub(crate) fn put_back_step(
    default: Option<RuleId>,
    m: &Match,
    input: &mut String,
) -> ParseResult<(Option<RuleId>, bool)> {
    let mut restored = m.whole().to_string();
    restored.push_str(input);
    *input = restored;
    Ok((default, false))
}

pub(crate) fn put_back_literal_step(
    default: Option<RuleId>,
    text: &str,
    input: &mut String,
) -> ParseResult<(Option<RuleId>, bool)> {
    let mut restored = text.to_string();
    restored.push_str(input);
    *input = restored;
    Ok((default, false))
}
