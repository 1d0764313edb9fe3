use super::{Predicate, RuleId};
use crate::error::ParseResult;

/// Follows `consequent` when `predicate()` is true, else falls through to `default`.
pub(crate) fn if_step(
    predicate: &Predicate,
    consequent: RuleId,
    default: Option<RuleId>,
) -> ParseResult<(Option<RuleId>, bool)> {
    if predicate() {
        Ok((Some(consequent), false))
    } else {
        Ok((default, false))
    }
}

/// Always suspends once, then resumes into `default` on the next call. See the Stop
/// design note: this is not a re-enterable sentinel, it is a one-shot flush point.
pub(crate) fn stop_step(default: Option<RuleId>) -> ParseResult<(Option<RuleId>, bool)> {
    Ok((default, true))
}
