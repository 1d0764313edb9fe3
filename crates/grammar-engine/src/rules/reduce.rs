use super::{ReduceAction, RuleId};
use crate::error::ParseResult;
use crate::match_result::Match;

/// Invokes the reducer with the current match; never touches `input`.
pub(crate) fn step(
    action: &ReduceAction,
    default: Option<RuleId>,
    m: &mut Match,
) -> ParseResult<(Option<RuleId>, bool)> {
    action(m)?;
    Ok((default, false))
}
