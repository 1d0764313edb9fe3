use super::RuleId;
use crate::error::ParseResult;
use crate::match_result::Match;
use crate::pattern::Pattern;

/// Runs `pattern` against `input`. On a hit, records captures, advances `input` past the
/// match, and falls through to `default`. On a miss, leaves `input` untouched and
/// re-enters `current` when more text arrives.
pub(crate) fn step(
    pattern: &Pattern,
    default: Option<RuleId>,
    current: RuleId,
    m: &mut Match,
    input: &mut String,
) -> ParseResult<(Option<RuleId>, bool)> {
    match pattern.search(input) {
        Some(hit) => {
            log::trace!(target: "grammar_engine::rules::scan_until", "hit {} at {}", pattern.render(), hit.position);
            *input = hit.suffix;
            m.set(hit.captures);
            Ok((default, false))
        }
        None => {
            log::trace!(target: "grammar_engine::rules::scan_until", "miss for {}", pattern.render());
            Ok((Some(current), true))
        }
    }
}
